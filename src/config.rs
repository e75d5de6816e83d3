use std::env;
use anyhow::{bail, Context, Result};

/// Spanner database coordinates
#[derive(Debug, Clone)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

/// Which backend holds customer records
#[derive(Debug, Clone)]
pub enum StoreConfig {
    Spanner(SpannerConfig),
    Memory,
}

impl StoreConfig {
    fn from_env() -> Result<Self> {
        match env::var("CUSTOMER_STORE").as_deref().unwrap_or("spanner") {
            "spanner" => Ok(StoreConfig::Spanner(SpannerConfig {
                emulator_host: env::var("SPANNER_EMULATOR_HOST").ok(),
                project: env::var("SPANNER_PROJECT")
                    .context("SPANNER_PROJECT environment variable is required")?,
                instance: env::var("SPANNER_INSTANCE")
                    .context("SPANNER_INSTANCE environment variable is required")?,
                database: env::var("SPANNER_DATABASE")
                    .context("SPANNER_DATABASE environment variable is required")?,
            })),
            "memory" => Ok(StoreConfig::Memory),
            other => bail!("CUSTOMER_STORE must be one of: spanner, memory, got '{}'", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreConfig,
    pub customer_table: String,
    pub service_port: u16,
    pub service_host: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let store = StoreConfig::from_env()?;

        let customer_table = env::var("CUSTOMER_TABLE")
            .unwrap_or_else(|_| "Customers".to_string());

        let service_port = env::var("SERVICE_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = env::var("SERVICE_HOST")
            .unwrap_or_else(|_| "0.0.0.0".to_string());

        Ok(Config {
            store,
            customer_table,
            service_port,
            service_host,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.service_host, self.service_port)
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Customer table: {}", self.customer_table);
        match &self.store {
            StoreConfig::Spanner(spanner) => {
                tracing::info!("  Customer store: spanner");
                tracing::info!("  Spanner emulator: {}",
                    spanner.emulator_host.as_deref().unwrap_or("disabled (using production)"));
                tracing::info!("  Spanner database: {}", spanner.database_path());
            }
            StoreConfig::Memory => tracing::info!("  Customer store: memory"),
        }
        tracing::info!("  Service listening on: {}", self.bind_address());
    }
}
