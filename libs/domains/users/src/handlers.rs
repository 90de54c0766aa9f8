use axum::{
    Extension, Json, Router,
    extract::{Path, State},
    http::StatusCode,
    middleware,
    routing::{get, post},
};
use axum_helpers::errors::responses::InternalServerErrorResponse;
use std::sync::Arc;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::auth::{BasicAuth, require_basic_auth};
use crate::error::UserResult;
use crate::models::{AuthenticatedUser, UserRecord};
use crate::repository::CredentialStore;
use crate::service::UserService;

pub const TAG: &str = "users";

/// OpenAPI documentation for the account endpoints
#[derive(OpenApi)]
#[openapi(
    paths(create_user, get_user, list_users, update_user, delete_user),
    components(schemas(UserRecord), responses(InternalServerErrorResponse)),
    modifiers(&BasicAuthScheme),
    security(("basic_auth" = [])),
    tags((name = TAG, description = "User account management"))
)]
pub struct ApiDoc;

struct BasicAuthScheme;

impl Modify for BasicAuthScheme {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "basic_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

/// Account routes, all behind HTTP Basic authentication
pub fn router<S: CredentialStore + 'static>(service: UserService<S>, realm: &str) -> Router {
    let shared_service = Arc::new(service);
    let auth = BasicAuth::new(Arc::clone(&shared_service), realm);

    Router::new()
        .route("/user", post(create_user))
        .route(
            "/user/{username}",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route("/users", get(list_users))
        .route_layer(middleware::from_fn_with_state(auth, require_basic_auth::<S>))
        .with_state(shared_service)
}

/// Create a user
#[utoipa::path(
    post,
    path = "/user",
    tag = TAG,
    request_body = UserRecord,
    responses(
        (status = 200, description = "User created", body = UserRecord),
        (status = 400, description = "Missing username, password or authorities", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 409, description = "Username already exists", body = String, content_type = "text/plain"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_user<S: CredentialStore>(
    State(service): State<Arc<UserService<S>>>,
    Extension(caller): Extension<AuthenticatedUser>,
    Json(record): Json<UserRecord>,
) -> UserResult<Json<UserRecord>> {
    tracing::debug!(
        caller = %caller.username,
        username = %record.username,
        "Create user requested"
    );
    let user = service.create_user(record).await?;
    Ok(Json(user))
}

/// Get a user by username
#[utoipa::path(
    get,
    path = "/user/{username}",
    tag = TAG,
    params(("username" = String, Path, description = "Account name")),
    responses(
        (status = 200, description = "User found", body = UserRecord),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "Username not found", body = String, content_type = "text/plain"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_user<S: CredentialStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(username): Path<String>,
) -> UserResult<Json<UserRecord>> {
    let user = service.get_user(&username).await?;
    Ok(Json(user))
}

/// List all users ordered by username
#[utoipa::path(
    get,
    path = "/users",
    tag = TAG,
    responses(
        (status = 200, description = "All users", body = Vec<UserRecord>),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_users<S: CredentialStore>(
    State(service): State<Arc<UserService<S>>>,
) -> UserResult<Json<Vec<UserRecord>>> {
    let users = service.list_users().await?;
    Ok(Json(users))
}

/// Replace a user's password, enabled flag and roles
#[utoipa::path(
    put,
    path = "/user/{username}",
    tag = TAG,
    params(("username" = String, Path, description = "Account name; must match the body")),
    request_body = UserRecord,
    responses(
        (status = 200, description = "User updated", body = UserRecord),
        (status = 400, description = "Invalid record or username change", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "Username not found", body = String, content_type = "text/plain"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_user<S: CredentialStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(username): Path<String>,
    Json(record): Json<UserRecord>,
) -> UserResult<Json<UserRecord>> {
    let user = service.update_user(&username, record).await?;
    Ok(Json(user))
}

/// Delete a user and all of its roles
#[utoipa::path(
    delete,
    path = "/user/{username}",
    tag = TAG,
    params(("username" = String, Path, description = "Account name")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 401, description = "Missing or invalid credentials"),
        (status = 404, description = "Username not found", body = String, content_type = "text/plain"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_user<S: CredentialStore>(
    State(service): State<Arc<UserService<S>>>,
    Path(username): Path<String>,
) -> UserResult<StatusCode> {
    service.delete_user(&username).await?;
    Ok(StatusCode::NO_CONTENT)
}
