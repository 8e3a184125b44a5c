use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] tradechart_core::ValidationError),

    #[error(transparent)]
    Config(#[from] tradechart_core::ConfigError),

    #[error("command error: {0}")]
    Command(String),

    #[error(transparent)]
    Service(#[from] tradechart_core::ServiceError),

    #[error(transparent)]
    Feed(#[from] tradechart_core::FeedError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Config(_) => 2,
            Self::Command(_) => 2,
            Self::Service(_) => 3,
            Self::Feed(_) => 4,
            Self::Serialization(_) => 4,
            Self::Io { .. } => 10,
        }
    }
}
