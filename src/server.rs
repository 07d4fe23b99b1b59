//! HTTP server setup.

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::Request;
use tower::ServiceBuilder;
use tracing::{debug, info, instrument};

use crate::api::{AppState, router};
use crate::config::ServerConfig;
use crate::db::GameRepository;
use crate::service::GameService;

/// Opens the database, applies migrations and returns a ready service.
///
/// # Errors
///
/// Fails if the database cannot be opened or migrated.
#[instrument(skip(config), fields(database_url = %config.database_url()))]
pub fn open_service(config: &ServerConfig) -> Result<GameService> {
    let repository = GameRepository::new(config.database_url().clone())
        .context("Invalid database path")?;
    repository
        .run_migrations()
        .context("Failed to migrate database")?;
    Ok(GameService::new(repository))
}

/// Builds the application with request logging.
pub fn app(service: GameService) -> axum::Router {
    router(AppState::new(service)).layer(ServiceBuilder::new().map_request(
        |req: Request<Body>| {
            debug!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        },
    ))
}

/// Runs the HTTP server until Ctrl-C.
///
/// # Errors
///
/// Fails if the database cannot be prepared or the address cannot be bound.
#[instrument(skip(config), fields(addr = %config.bind_address()))]
pub async fn run(config: ServerConfig) -> Result<()> {
    let service = open_service(&config)?;

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Server ready at http://{}/", addr);

    axum::serve(listener, app(service))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
