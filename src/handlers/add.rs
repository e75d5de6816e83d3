use crate::error::{ApiError, ErrorResponse};
use crate::models::{AddCustomerRequest, AddCustomerResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};

/// POST /v1/api/customer/add handler - Store a customer record
///
/// An existing record with the same `customer_id` is overwritten.
#[utoipa::path(
    post,
    path = routes::CUSTOMER_ADD,
    request_body = AddCustomerRequest,
    responses(
        (status = 200, description = "Customer stored successfully", body = AddCustomerResponse),
        (status = 400, description = "Body absent, malformed, or missing customer_id / email", body = ErrorResponse),
        (status = 500, description = "Storage backend error", body = ErrorResponse)
    ),
    tag = "customer"
)]
pub async fn add_customer_handler(
    State(state): State<AppState>,
    payload: Result<Json<AddCustomerRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AddCustomerResponse>), ApiError> {
    let customer = match payload {
        Ok(Json(request)) => request.into_customer(),
        Err(rejection) => {
            tracing::debug!("Rejected add customer body: {}", rejection);
            None
        }
    };

    let Some(customer) = customer else {
        tracing::warn!("Add customer request missing required fields");
        return Err(ApiError::MissingFields);
    };

    if let Err(e) = state.store.put(&customer).await {
        tracing::error!("Failed to store customer {}: {}", customer.customer_id, e);
        return Err(e.into());
    }

    tracing::info!("Successfully stored customer with id: {}", customer.customer_id);
    Ok((
        StatusCode::OK,
        Json(AddCustomerResponse::added(&customer.customer_id)),
    ))
}
