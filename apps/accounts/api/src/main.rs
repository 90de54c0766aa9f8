use axum_helpers::server::{create_production_app, create_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::DatabaseConnection;
use domain_users::{CredentialStore, InMemoryCredentialStore, PostgresCredentialStore, UserService};
use std::time::Duration;
use tracing::{info, warn};

mod config;
mod openapi;
mod routes;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    let config = Config::from_env()?;

    init_tracing(&config.environment);

    match config.database.clone() {
        Some(database) => {
            let run_migrations = database.run_migrations;
            let db = database::postgres::connect_from_config_with_retry(database, None)
                .await
                .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

            if run_migrations {
                database::postgres::run_migrations::<migration::Migrator>(&db, config.app.name)
                    .await?;
            }

            let store = PostgresCredentialStore::new(db.clone());
            serve(config, store, Some(db)).await
        }
        None => {
            warn!("DATABASE_URL not set, accounts are kept in memory and lost on restart");
            serve(config, InMemoryCredentialStore::new(), None).await
        }
    }
}

async fn serve<S: CredentialStore + 'static>(
    config: Config,
    store: S,
    db: Option<DatabaseConnection>,
) -> eyre::Result<()> {
    let service = UserService::new(store);

    if let Some(admin) = &config.auth.bootstrap_admin {
        let created = service
            .ensure_user(&admin.username, &admin.password, &["ADMIN", "USER"])
            .await
            .map_err(|e| eyre::eyre!("Failed to seed bootstrap account: {}", e))?;
        if created {
            info!(username = %admin.username, "Created bootstrap account");
        }
    } else {
        warn!("No ADMIN_USERNAME/ADMIN_PASSWORD set; only existing accounts can authenticate");
    }

    let api_routes = routes::routes(service, &config.auth.realm, config.app, db.clone());
    let app = create_router::<openapi::ApiDoc>(api_routes, &config.server)?;

    info!(
        name = config.app.name,
        version = config.app.version,
        "Starting accounts API with graceful shutdown (30s timeout)"
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        if let Some(db) = db {
            info!("Shutting down: closing database connections");
            match db.close().await {
                Ok(_) => info!("PostgreSQL connection closed successfully"),
                Err(e) => tracing::error!("Error closing PostgreSQL: {}", e),
            }
        }
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Accounts API shutdown complete");
    Ok(())
}
