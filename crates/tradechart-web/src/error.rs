use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tradechart_core::ServiceError;

/// Handler errors, rendered as plain-text bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A query parameter is missing or malformed; the message names it.
    #[error("{0}")]
    BadRequest(String),

    #[error("Error retrieving the file")]
    MissingUpload,

    #[error("Error reading the CSV file")]
    UnreadableUpload(String),

    #[error("can't fetch data")]
    Chart(#[from] ServiceError),
}

impl ApiError {
    pub fn empty(parameter: &str) -> Self {
        Self::BadRequest(format!("empty {parameter}"))
    }

    pub fn invalid(parameter: &str) -> Self {
        Self::BadRequest(format!("invalid {parameter}"))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::MissingUpload | Self::UnreadableUpload(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::Chart(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Chart(error) => tracing::error!(%error, "chart request failed"),
            Self::UnreadableUpload(detail) => tracing::warn!(%detail, "rejected upload"),
            other => tracing::warn!(error = %other, "rejected request"),
        }
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tradechart_core::SourceError;

    #[test]
    fn source_failures_are_server_errors_with_a_generic_message() {
        let error = ApiError::from(ServiceError::Source(SourceError::unavailable("503")));
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.to_string(), "can't fetch data");
    }

    #[test]
    fn parameter_errors_name_the_parameter() {
        let error = ApiError::empty("symbol");
        assert_eq!(error.to_string(), "empty symbol");
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
    }
}
