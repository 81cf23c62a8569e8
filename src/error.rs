use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Library error type for photo source operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The outbound request could not be sent or its body not read.
    #[error("http request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The remote answered with a non-success HTTP status.
    #[error("remote responded with status {0}")]
    Status(reqwest::StatusCode),

    /// The photo API returned its failure envelope.
    #[error("upstream reported failure (code {code}): {message}")]
    UpstreamFailure { code: i64, message: String },

    /// Response body was not the JSON we expected.
    #[error("malformed photo payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured endpoint is not a usable URL.
    #[error("invalid endpoint url: {0}")]
    Endpoint(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::Endpoint(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_GATEWAY,
        };
        (status, "photo source unavailable").into_response()
    }
}
