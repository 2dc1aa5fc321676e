use std::path::Path;

use axum::{routing::get, Json, Router};
use shared::{
    domain::MenuCatalog,
    protocol::{HealthResponse, HEALTH_PATH, MENU_DOCUMENT_PATH},
};
use tokio::signal;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::{check_public_dir, load_settings, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    if let Err(error) = check_public_dir(&settings.public_dir) {
        warn!(%error, "static assets unavailable");
    }
    check_menu_document(&settings.public_dir);

    let app = build_router(&settings);

    let addr = settings.bind_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(
        %addr,
        public_dir = %settings.public_dir.display(),
        "server listening on http://localhost:{}",
        settings.port
    );
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("server stopped");
    Ok(())
}

fn build_router(settings: &Settings) -> Router {
    let assets =
        ServeDir::new(&settings.public_dir).fallback(ServeFile::new(settings.index_path()));

    Router::new()
        .route(HEALTH_PATH, get(health))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Warns at startup when clients would fail to load the menu. Returns whether it parsed.
fn check_menu_document(public_dir: &Path) -> bool {
    let path = public_dir.join(MENU_DOCUMENT_PATH.trim_start_matches('/'));
    let raw = match std::fs::read(&path) {
        Ok(raw) => raw,
        Err(error) => {
            warn!(path = %path.display(), %error, "menu document missing");
            return false;
        }
    };

    match MenuCatalog::from_json_slice(&raw) {
        Ok(catalog) => {
            info!(
                categories = catalog.categories().len(),
                items = catalog.item_count(),
                "menu document ok"
            );
            true
        }
        Err(error) => {
            warn!(
                path = %path.display(),
                %error,
                "menu document is malformed; clients will show an error"
            );
            false
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(error) => {
                error!(%error, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received terminate signal, shutting down");
            }
            Err(error) => {
                error!(%error, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
