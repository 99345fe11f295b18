// src/bin/api_server.rs

use movie_catalog::infra::{logging, storage};
use movie_catalog::transport;
use movie_catalog::Config;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init(config.log_format);

    // --- Store Initialization ---
    tracing::info!("initializing catalog store");
    let store = storage::open_store(&config.storage).await?;
    match store.counts().await {
        Ok(counts) => tracing::info!(
            movies = counts.movies,
            directors = counts.directors,
            genres = counts.genres,
            "catalog store ready"
        ),
        Err(e) => tracing::warn!(error = %e, "could not count catalog rows at startup"),
    }

    let app_state = transport::http::AppState::new(store);

    // --- API Server Initialization ---
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", transport::http::ApiDoc::openapi()))
        .layer(cors);
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "API server listening");
    tracing::info!("Swagger UI available at /swagger-ui");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "failed to listen for shutdown signal");
            }
            tracing::info!("shutdown signal received");
        })
        .await?;

    tracing::info!("graceful shutdown complete");
    Ok(())
}
