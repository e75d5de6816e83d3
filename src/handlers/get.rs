use crate::error::{ApiError, ErrorResponse};
use crate::models::Customer;
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, extract::Path, http::StatusCode, Json};

/// GET /v1/api/customer/:customer_id handler - Retrieve a customer record
#[utoipa::path(
    get,
    path = routes::CUSTOMER_ITEM,
    params(
        ("customer_id" = String, Path, description = "Key of the customer record")
    ),
    responses(
        (status = 200, description = "Customer found", body = Customer),
        (status = 400, description = "Invalid customer_id", body = ErrorResponse),
        (status = 404, description = "Customer not found", body = ErrorResponse),
        (status = 500, description = "Storage backend error", body = ErrorResponse)
    ),
    tag = "customer"
)]
pub async fn get_customer_handler(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    fetch_customer(&state, &customer_id).await
}

/// GET /v1/api/customer/add handler - Retrieve the customer whose id is `add`
///
/// The static add route shadows `{customer_id}` for this one id.
pub async fn get_add_customer_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    fetch_customer(&state, routes::CUSTOMER_ADD_ID).await
}

async fn fetch_customer(
    state: &AppState,
    customer_id: &str,
) -> Result<(StatusCode, Json<Customer>), ApiError> {
    // Unreachable through the router, which never matches an empty segment
    if customer_id.is_empty() {
        tracing::warn!("Rejected empty customer_id");
        return Err(ApiError::InvalidCustomerId);
    }

    let found = match state.store.get(customer_id).await {
        Ok(found) => found,
        Err(e) => {
            tracing::error!("Failed to read customer {}: {}", customer_id, e);
            return Err(e.into());
        }
    };

    match found {
        Some(customer) => {
            tracing::info!("Successfully retrieved customer with id: {}", customer_id);
            Ok((StatusCode::OK, Json(customer)))
        }
        None => {
            tracing::info!("Customer not found with id: {}", customer_id);
            Err(ApiError::CustomerNotFound)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryCustomerStore;
    use axum::{body::Body, http::Request, routing::{get, post}, Router};
    use tower::ServiceExt;

    // POST handler needed for round-trip tests
    use crate::handlers::add::add_customer_handler;

    fn setup_test_app(store: InMemoryCustomerStore) -> Router {
        Router::new()
            .route(
                routes::CUSTOMER_ADD,
                post(add_customer_handler).get(get_add_customer_handler),
            )
            .route(routes::CUSTOMER_ITEM, get(get_customer_handler))
            .with_state(AppState::new(store))
    }

    async fn add_customer(app: &Router, customer_id: &str, email: &str) -> StatusCode {
        let body = serde_json::json!({"customer_id": customer_id, "email": email});
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(routes::CUSTOMER_ADD)
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&body).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap()
            .status()
    }

    async fn get_customer(app: &Router, customer_id: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/v1/api/customer/{}", customer_id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_get_customer_success() {
        let app = setup_test_app(InMemoryCustomerStore::new());

        assert_eq!(add_customer(&app, "rajesham3", "rajesham3@abc.com").await, StatusCode::OK);

        let (status, body) = get_customer(&app, "rajesham3").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            serde_json::json!({"customer_id": "rajesham3", "email": "rajesham3@abc.com"})
        );
    }

    #[tokio::test]
    async fn test_get_customer_not_found() {
        let app = setup_test_app(InMemoryCustomerStore::new());

        let (status, body) = get_customer(&app, "nonexistent123").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "Customer not found"}));
    }

    #[tokio::test]
    async fn test_second_add_overwrites_email() {
        let app = setup_test_app(InMemoryCustomerStore::new());

        assert_eq!(add_customer(&app, "c-100", "first@example.com").await, StatusCode::OK);
        assert_eq!(add_customer(&app, "c-100", "second@example.com").await, StatusCode::OK);

        let (status, body) = get_customer(&app, "c-100").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["email"], "second@example.com");
    }

    #[tokio::test]
    async fn test_whitespace_customer_id_round_trips() {
        let app = setup_test_app(InMemoryCustomerStore::new());

        assert_eq!(add_customer(&app, " ", "x@abc.com").await, StatusCode::OK);

        let (status, body) = get_customer(&app, "%20").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"customer_id": " ", "email": "x@abc.com"}));
    }

    #[tokio::test]
    async fn test_customer_named_add_round_trips() {
        let app = setup_test_app(InMemoryCustomerStore::new());

        assert_eq!(add_customer(&app, "add", "add@abc.com").await, StatusCode::OK);

        let (status, body) = get_customer(&app, "add").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"customer_id": "add", "email": "add@abc.com"}));
    }

    #[tokio::test]
    async fn test_customer_named_add_not_found() {
        let app = setup_test_app(InMemoryCustomerStore::new());

        let (status, body) = get_customer(&app, "add").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, serde_json::json!({"error": "Customer not found"}));
    }

    #[tokio::test]
    async fn test_get_customer_empty_id() {
        let state = AppState::new(InMemoryCustomerStore::new());

        let err = get_customer_handler(State(state), Path(String::new()))
            .await
            .unwrap_err();

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message(), "Invalid customer_id");
    }

    #[tokio::test]
    async fn test_get_customer_storage_error() {
        let app = setup_test_app(InMemoryCustomerStore::failing("Requested resource not found"));

        let (status, body) = get_customer(&app, "rajesham3").await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body,
            serde_json::json!({"error": "Error occurred: Requested resource not found"})
        );
    }
}
