// ABOUTME: Server assembly for Command Vault
// ABOUTME: Tracing setup, the HTTP router with CORS, body limit, static client bundle, and the serve loop

use std::net::SocketAddr;
use std::path::Path;

use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method};
use axum::Router;
use cmdvault_storage::DbState;
use colored::Colorize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub mod config;


pub use config::{Config, ConfigError};

/// Largest accepted request body
pub const BODY_LIMIT_BYTES: usize = 1024 * 1024;

/// Install the global tracing subscriber; `RUST_LOG` overrides the `info` default
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn cors_layer(cors_origin: Option<&str>) -> anyhow::Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Ok(match cors_origin {
        Some(origin) => cors.allow_origin(origin.parse::<HeaderValue>()?),
        None => cors.allow_origin(Any),
    })
}

/// Build the full application router: `/api` plus the client bundle when present
pub fn build_app(db: DbState, config: &Config) -> anyhow::Result<Router> {
    let mut app = Router::new().nest("/api", cmdvault_api::create_api_router(db));

    if config.client_dist.is_dir() {
        app = app.fallback_service(static_service(&config.client_dist));
        info!("Serving client bundle from {}", config.client_dist.display());
    } else {
        warn!(
            "Client bundle not found at {}, serving API only",
            config.client_dist.display()
        );
    }

    Ok(app
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(config.cors_origin.as_deref())?))
}

/// Static files with single-page-app fallback to `index.html`
fn static_service(dist: &Path) -> ServeDir<ServeFile> {
    ServeDir::new(dist).fallback(ServeFile::new(dist.join("index.html")))
}

pub async fn run_server(config: Config) -> anyhow::Result<()> {
    let db = DbState::init_with_path(&config.db_path).await?;
    info!("Database ready at {}", config.db_path.display());

    let app = build_app(db, &config)?;
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;

    println!(
        "{} {}",
        "✅ Command Vault listening on".green().bold(),
        format!("http://localhost:{}", config.port).cyan()
    );
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
