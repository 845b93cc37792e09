mod config;
mod routes;
mod services;
mod state;

use std::process::ExitCode;

use scene::StoreCatalog;

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = dotenvy::dotenv();
    tracing_subscriber::fmt::init();
    if let Err(e) = dotenv {
        tracing::debug!(error = %e, "no .env loaded");
    }

    let config = config::ServerConfig::from_env();

    let catalog = match StoreCatalog::load_dir(&config.catalog_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            tracing::error!(error = %e, dir = %config.catalog_dir.display(), "store catalog failed to load");
            return ExitCode::FAILURE;
        }
    };

    let state = state::AppState::new(catalog);
    let app = routes::app(state);

    let addr = config.bind_addr();
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, %addr, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "planogram listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
