//! Error handling for API endpoints

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mailscout_producer::ProducerError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "Not Found", Some(msg)),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", Some(msg)),
            ApiError::Internal(msg) => {
                tracing::error!("internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

impl From<ProducerError> for ApiError {
    fn from(err: ProducerError) -> Self {
        match err {
            ProducerError::JobNotFound(id) => ApiError::NotFound(format!("job not found: {id}")),
            ProducerError::EmptyAddressList => {
                ApiError::BadRequest("address list is empty after normalization".to_string())
            }
            ProducerError::Database(e) => ApiError::Internal(format!("database error: {e}")),
            ProducerError::Broker(e) => ApiError::Internal(format!("broker error: {e}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_serialization() {
        let error = ErrorResponse {
            error: "Not Found".to_string(),
            details: Some("Resource does not exist".to_string()),
        };

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("Not Found"));
        assert!(json.contains("Resource does not exist"));
    }

    #[test]
    fn test_error_response_without_details() {
        let error = ErrorResponse {
            error: "Bad Request".to_string(),
            details: None,
        };

        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("Bad Request"));
        assert!(!json.contains("details"));
    }
}
