use axum::middleware;
use axum_helpers::{basic_auth_middleware, create_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{PostgresUserRepository, UserService, handlers};
use tracing::info;

mod config;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    init_tracing(&config.environment);

    // Single long-lived connection handle, shared by all requests and
    // closed explicitly at shutdown
    let db = database::postgres::connect_from_config(&config.database)
        .await
        .map_err(|e| eyre::eyre!("PostgreSQL connection failed: {}", e))?;

    let repository = PostgresUserRepository::new(db.clone());
    repository
        .ensure_schema()
        .await
        .map_err(|e| eyre::eyre!("Schema setup failed: {}", e))?;

    let service = UserService::new(repository);

    // The auth gate wraps every directory route; /health stays open
    let gated_routes = handlers::router(service).layer(middleware::from_fn_with_state(
        config.basic_auth.clone(),
        basic_auth_middleware,
    ));

    let app = gated_routes.merge(health_router());

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Shutting down: closing database connection");
    db.close()
        .await
        .map_err(|e| eyre::eyre!("Error closing PostgreSQL: {}", e))?;

    info!("Directory API shutdown complete");
    Ok(())
}
