use std::process::ExitCode;

use tracing_subscriber::EnvFilter;
use tradechart_web::{serve, ServerConfig};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();

    let result = match ServerConfig::from_env() {
        Ok(config) => serve(config).await,
        Err(error) => Err(error.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::error!(%error, "server stopped");
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
