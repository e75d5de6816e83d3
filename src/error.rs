use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StorageError;

/// Error response type
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant renders as `{"error": "..."}` with the status code the
/// customer API has always used for it.
#[derive(Debug)]
pub enum ApiError {
    /// Request body absent, malformed, or lacking `customer_id` / `email`
    MissingFields,
    /// Empty customer id in the request path
    InvalidCustomerId,
    /// No record stored under the requested id
    CustomerNotFound,
    /// Backend call failed
    Storage(StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingFields | ApiError::InvalidCustomerId => StatusCode::BAD_REQUEST,
            ApiError::CustomerNotFound => StatusCode::NOT_FOUND,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ApiError::MissingFields => "Missing required fields: customer_id or email".to_string(),
            ApiError::InvalidCustomerId => "Invalid customer_id".to_string(),
            ApiError::CustomerNotFound => "Customer not found".to_string(),
            ApiError::Storage(err) => format!("Error occurred: {}", err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.message(),
        });

        (self.status(), body).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        ApiError::Storage(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::MissingFields.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::InvalidCustomerId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::CustomerNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::Storage(StorageError::new("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_error_message_passes_backend_text_through() {
        let err: ApiError = StorageError::new("Test DynamoDB error").into();
        assert_eq!(err.message(), "Error occurred: Test DynamoDB error");
    }

    #[tokio::test]
    async fn test_into_response_body() {
        let response = ApiError::CustomerNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error_response: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error_response.error, "Customer not found");
    }
}
