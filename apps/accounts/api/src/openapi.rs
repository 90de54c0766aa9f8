use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    components(schemas(axum_helpers::ErrorResponse, axum_helpers::HealthResponse)),
    info(
        title = "Accounts API",
        version = "0.1.0",
        description = "User account and credential management behind HTTP Basic authentication"
    )
)]
struct AccountsApiDoc;

/// Service document with the account routes merged at the root
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = AccountsApiDoc::openapi();
        doc.merge(domain_users::handlers::ApiDoc::openapi());
        doc
    }
}
