// Route path constants and the application router

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::state::AppState;

pub const HEALTH: &str = "/health";
pub const CUSTOMER_ADD: &str = "/v1/api/customer/add";
/// Id served by GET on `CUSTOMER_ADD`, where the static route shadows the item route
pub const CUSTOMER_ADD_ID: &str = "add";
pub const CUSTOMER_ITEM: &str = "/v1/api/customer/{customer_id}";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// Build the application router around an already-constructed state
pub fn app(state: AppState) -> Router {
    Router::new()
        .route(HEALTH, get(handlers::health_handler))
        .route(
            CUSTOMER_ADD,
            post(handlers::add_customer_handler).get(handlers::get_add_customer_handler),
        )
        .route(CUSTOMER_ITEM, get(handlers::get_customer_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
