//! Route composition for the accounts service.

use axum::{Router, extract::State, response::IntoResponse, routing::get};
use axum_helpers::server::{HealthCheckFuture, health_router, run_health_checks};
use core_config::AppInfo;
use database::postgres::DatabaseConnection;
use domain_users::{CredentialStore, UserService, handlers};

/// Account routes plus the public `/health` and `/ready` probes.
///
/// Docs and cross-cutting layers are added afterwards by `create_router`.
pub fn routes<S: CredentialStore + 'static>(
    service: UserService<S>,
    realm: &str,
    app: AppInfo,
    db: Option<DatabaseConnection>,
) -> Router {
    handlers::router(service, realm)
        .merge(health_router(app))
        .merge(ready_router(db))
}

/// `/ready` checks the database when one is configured.
/// The in-memory store is always ready.
fn ready_router(db: Option<DatabaseConnection>) -> Router {
    Router::new()
        .route("/ready", get(ready_handler))
        .with_state(db)
}

async fn ready_handler(State(db): State<Option<DatabaseConnection>>) -> impl IntoResponse {
    let mut checks: Vec<(&str, HealthCheckFuture<'_>)> = Vec::new();

    if let Some(db) = db.as_ref() {
        checks.push((
            "database",
            Box::pin(async move {
                database::postgres::check_health(db)
                    .await
                    .map_err(|e| e.to_string())
            }),
        ));
    }

    run_health_checks(checks).await
}
