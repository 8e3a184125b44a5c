//! # Tradechart Web
//!
//! HTTP surface for tradechart.
//!
//! | Route | Method | Handler |
//! |-------|--------|---------|
//! | `/data` | GET | chart payload for one trade |
//! | `/visualiseTrader` | GET | same as `/data` |
//! | `/upload` | POST | parse a trade-order CSV (multipart field `file`) |
//! | `/trades` | GET | `trades.html` |
//! | `/trade` | GET | `trade.html` |
//! | anything else | GET | static files from the assets directory |

pub mod config;
pub mod error;
pub mod handlers;
pub mod query;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use thiserror::Error;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tradechart_core::{ChartService, ConfigError};

pub use config::ServerConfig;
pub use error::ApiError;
pub use query::ChartQuery;

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: ChartService,
    pub public_url: Arc<str>,
}

impl AppState {
    pub fn new(service: ChartService, public_url: &str) -> Self {
        Self {
            service,
            public_url: Arc::from(public_url),
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let assets = &config.assets_dir;
    Router::new()
        .route("/data", get(handlers::chart))
        .route("/visualiseTrader", get(handlers::chart))
        .route(
            "/upload",
            post(handlers::upload).layer(DefaultBodyLimit::max(config.upload_limit_bytes)),
        )
        .route_service("/trades", ServeFile::new(assets.join("trades.html")))
        .route_service("/trade", ServeFile::new(assets.join("trade.html")))
        .fallback_service(ServeDir::new(assets))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `config.bind` and serve until the process is stopped.
pub async fn serve(config: ServerConfig) -> Result<(), StartupError> {
    let service = ChartService::from_config(&config.chart);
    tracing::info!(
        bind = %config.bind,
        source = service.source_id(),
        assets = %config.assets_dir.display(),
        "starting tradechart web server"
    );
    let app = router(AppState::new(service, &config.public_url), &config);

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
