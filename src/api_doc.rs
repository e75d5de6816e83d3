use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{AddCustomerRequest, AddCustomerResponse, Customer};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "spanner-customers-api",
        version = "1.0.0",
        description = "Create and fetch customer records stored in a single key-value table"
    ),
    paths(
        handlers::health::health_handler,
        handlers::add::add_customer_handler,
        handlers::get::get_customer_handler
    ),
    components(
        schemas(
            Customer,
            AddCustomerRequest,
            AddCustomerResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "customer", description = "Customer record operations")
    )
)]
pub struct ApiDoc;
