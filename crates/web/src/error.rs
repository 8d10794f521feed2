use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use std::fmt;
use storage::error::StorageError;

/// Web layer errors
#[derive(Debug)]
pub enum WebError {
    Storage(StorageError),
}

impl fmt::Display for WebError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Storage(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status_code = match &self {
            Self::Storage(StorageError::InvalidUsername) => StatusCode::BAD_REQUEST,
            Self::Storage(e) if e.is_unavailable() => StatusCode::SERVICE_UNAVAILABLE,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            Self::Storage(StorageError::InvalidUsername) => {
                json!({
                    "error": StorageError::InvalidUsername.to_string()
                })
            }
            Self::Storage(e) if e.is_unavailable() => {
                tracing::error!("Counter store error: {}", e);
                json!({
                    "error": "Counter store unavailable"
                })
            }
            Self::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                json!({
                    "error": "An internal error occurred"
                })
            }
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<StorageError> for WebError {
    fn from(error: StorageError) -> Self {
        Self::Storage(error)
    }
}

pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (
                WebError::Storage(StorageError::InvalidUsername),
                StatusCode::BAD_REQUEST,
            ),
            (
                WebError::Storage(StorageError::Timeout(Duration::from_secs(2))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                WebError::Storage(StorageError::Unavailable("down".to_string())),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (
                WebError::Storage(StorageError::InvalidCount {
                    username: "Dana".to_string(),
                    value: "x".to_string(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
