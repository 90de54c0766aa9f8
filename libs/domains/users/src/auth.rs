//! HTTP Basic authentication against the credential store.

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Basic};
use std::sync::Arc;

use crate::error::UserError;
use crate::repository::CredentialStore;
use crate::service::UserService;

/// State for [`require_basic_auth`]
pub struct BasicAuth<S: CredentialStore> {
    service: Arc<UserService<S>>,
    challenge: HeaderValue,
}

impl<S: CredentialStore> Clone for BasicAuth<S> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            challenge: self.challenge.clone(),
        }
    }
}

impl<S: CredentialStore> BasicAuth<S> {
    /// A realm that is not a valid header value falls back to a bare `Basic` challenge
    pub fn new(service: Arc<UserService<S>>, realm: &str) -> Self {
        let challenge = HeaderValue::from_str(&format!("Basic realm=\"{}\"", realm))
            .unwrap_or_else(|_| HeaderValue::from_static("Basic"));

        Self { service, challenge }
    }

    fn reject(&self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, self.challenge.clone())],
            UserError::Unauthorized.to_string(),
        )
            .into_response()
    }
}

/// Require valid Basic credentials of an enabled account.
///
/// On success the caller's [`AuthenticatedUser`](crate::models::AuthenticatedUser)
/// is inserted into the request extensions.
pub async fn require_basic_auth<S: CredentialStore + 'static>(
    State(auth): State<BasicAuth<S>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(Authorization(credentials)) = request.headers().typed_get::<Authorization<Basic>>()
    else {
        tracing::debug!("No Basic credentials in Authorization header");
        return auth.reject();
    };

    match auth
        .service
        .authenticate(credentials.username(), credentials.password())
        .await
    {
        Ok(user) => {
            tracing::debug!(username = %user.username, "Authenticated request");
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Err(UserError::Unauthorized) => {
            tracing::info!(username = %credentials.username(), "Rejected Basic credentials");
            auth.reject()
        }
        Err(e) => e.into_response(),
    }
}
