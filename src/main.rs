mod api_doc;
mod config;
mod error;
mod handlers;
mod models;
mod routes;
mod state;
mod store;

use anyhow::Context;
use config::{Config, StoreConfig};
use state::AppState;
use store::{InMemoryCustomerStore, SpannerCustomerStore};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("spanner_customers_api=info,tower_http=info")),
        )
        .init();

    tracing::info!("spanner-customers-api starting");

    let config = Config::from_env()?;
    config.log_startup();

    let state = match &config.store {
        StoreConfig::Spanner(spanner) => {
            AppState::new(SpannerCustomerStore::connect(spanner, &config.customer_table).await?)
        }
        StoreConfig::Memory => {
            tracing::warn!("Using in-memory customer store; records are lost on restart");
            AppState::new(InMemoryCustomerStore::new())
        }
    };

    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind_address())
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_address()))?;

    tracing::info!("Server listening on {}", config.bind_address());

    axum::serve(listener, app)
        .await
        .context("Server failed")?;

    Ok(())
}
