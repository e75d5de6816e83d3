use anyhow::{Context, Result};
use async_trait::async_trait;
use gcloud_gax::conn::Environment;
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig, Error as ClientError};
use gcloud_spanner::mutation::insert_or_update;
use gcloud_spanner::statement::Statement;
use std::fmt::Display;
use std::sync::Arc;

use super::{CustomerStore, StorageError};
use crate::config::SpannerConfig;
use crate::models::Customer;

/// Customer store backed by a single Cloud Spanner table
///
/// Cheap to clone; all clones share one session pool.
#[derive(Clone)]
pub struct SpannerCustomerStore {
    inner: Arc<Client>,
    table: String,
}

impl SpannerCustomerStore {
    /// Connect to the configured database, provisioning it first
    ///
    /// The instance, database and customer table are created when missing,
    /// so a fresh emulator needs no manual setup. When `emulator_host` is set
    /// the client talks to the emulator, otherwise to production Spanner.
    pub async fn connect(config: &SpannerConfig, table: &str) -> Result<Self> {
        auto_provision(config, table).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let mut client_config = ClientConfig::default();
        if let Some(host) = &config.emulator_host {
            client_config.environment = Environment::Emulator(host.clone());
        }

        let client = Client::new(&database_path, client_config)
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {} (table {})",
            database_path,
            table
        );

        Ok(Self {
            inner: Arc::new(client),
            table: table.to_string(),
        })
    }
}

fn backend_error(err: impl Display) -> StorageError {
    StorageError::new(err.to_string())
}

fn status_error(status: Status) -> StorageError {
    StorageError::new(status.message())
}

fn client_error(err: ClientError) -> StorageError {
    match err {
        ClientError::GRPC(status) => status_error(status),
        other => backend_error(other),
    }
}

#[async_trait]
impl CustomerStore for SpannerCustomerStore {
    async fn put(&self, customer: &Customer) -> Result<(), StorageError> {
        let mutation = insert_or_update(
            &self.table,
            &["customer_id", "email"],
            &[&customer.customer_id, &customer.email],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .map_err(client_error)?;

        tracing::debug!("Upserted customer with id: {}", customer.customer_id);
        Ok(())
    }

    async fn get(&self, customer_id: &str) -> Result<Option<Customer>, StorageError> {
        let mut statement = Statement::new(format!(
            "SELECT customer_id, email FROM `{}` WHERE customer_id = @customer_id",
            self.table
        ));
        statement.add_param("customer_id", &customer_id.to_string());

        let mut tx = self.inner.single().await.map_err(client_error)?;

        let mut result_set = tx.query(statement).await.map_err(status_error)?;

        match result_set.next().await.map_err(status_error)? {
            Some(row) => {
                let customer = Customer {
                    customer_id: row.column_by_name("customer_id").map_err(backend_error)?,
                    email: row.column_by_name("email").map_err(backend_error)?,
                };
                tracing::debug!("Read customer with id: {}", customer_id);
                Ok(Some(customer))
            }
            None => {
                tracing::debug!("Customer not found with id: {}", customer_id);
                Ok(None)
            }
        }
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner.single().await.map_err(client_error)?;

        let mut result_set = tx.query(statement).await.map_err(status_error)?;

        if result_set.next().await.map_err(status_error)?.is_some() {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(StorageError::new("Health check query returned no results"))
        }
    }
}

/// Automatically provision Spanner instance, database, and customer table
async fn auto_provision(config: &SpannerConfig, table: &str) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let mut admin_config = AdminClientConfig::default();
    if let Some(host) = &config.emulator_host {
        admin_config.environment = Environment::Emulator(host.clone());
    }

    let admin_client = AdminClient::new(admin_config)
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path, table).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let get_request = GetInstanceRequest {
        name: instance_path.to_string(),
        field_mask: None,
    };

    match admin_client.instance().get_instance(get_request, None).await {
        Ok(_) => {
            tracing::info!("Instance already exists: {}", instance_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Instance not found, creating: {}", instance_path);

            let instance_config = if config.emulator_host.is_some() {
                format!("{}/instanceConfigs/emulator-config", project_path)
            } else {
                format!("{}/instanceConfigs/regional-us-central1", project_path)
            };

            let create_request = CreateInstanceRequest {
                parent: project_path.to_string(),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: instance_path.to_string(),
                    config: instance_config,
                    display_name: format!("{} instance", config.instance),
                    node_count: 1,
                    ..Default::default()
                }),
            };

            let mut operation = admin_client
                .instance()
                .create_instance(create_request, None)
                .await
                .context("Failed to start instance creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create instance")?;

            tracing::info!("Instance created successfully: {}", instance_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check instance existence: {}",
            e.message()
        )),
    }
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let get_request = GetDatabaseRequest {
        name: database_path.to_string(),
    };

    match admin_client
        .database()
        .get_database(get_request, None)
        .await
    {
        Ok(_) => {
            tracing::info!("Database already exists: {}", database_path);
            Ok(())
        }
        Err(status) if status.code() == Code::NotFound => {
            tracing::info!("Database not found, creating: {}", database_path);

            let database_id = database_path
                .split('/')
                .next_back()
                .context("Invalid database path")?;

            let create_request = CreateDatabaseRequest {
                parent: instance_path.to_string(),
                create_statement: format!("CREATE DATABASE `{}`", database_id),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };

            let mut operation = admin_client
                .database()
                .create_database(create_request, None)
                .await
                .context("Failed to start database creation")?;

            operation
                .wait(None)
                .await
                .context("Failed to create database")?;

            tracing::info!("Database created successfully: {}", database_path);
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check database existence: {}",
            e.message()
        )),
    }
}

async fn ensure_table_exists(
    admin_client: &AdminClient,
    database_path: &str,
    table: &str,
) -> Result<()> {
    let get_ddl_request = GetDatabaseDdlRequest {
        database: database_path.to_string(),
    };

    let ddl_response = admin_client
        .database()
        .get_database_ddl(get_ddl_request, None)
        .await
        .context("Failed to get database DDL")?;

    let table_exists = ddl_response
        .into_inner()
        .statements
        .iter()
        .any(|stmt| ddl_declares_table(stmt, table));

    if table_exists {
        tracing::info!("Table '{}' already exists", table);
        return Ok(());
    }

    tracing::info!("Table '{}' not found, creating...", table);

    let update_request = UpdateDatabaseDdlRequest {
        database: database_path.to_string(),
        statements: vec![create_table_ddl(table)],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(update_request, None)
        .await
        .context("Failed to start table creation")?;

    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    tracing::info!("Table '{}' created successfully", table);
    Ok(())
}

fn create_table_ddl(table: &str) -> String {
    format!(
        "CREATE TABLE `{}` (\n    customer_id STRING(MAX) NOT NULL,\n    email STRING(MAX) NOT NULL,\n) PRIMARY KEY (customer_id)",
        table
    )
}

/// True if `stmt` is the `CREATE TABLE` statement for `table`, quoted or not
fn ddl_declares_table(stmt: &str, table: &str) -> bool {
    let Some(rest) = stmt.trim_start().strip_prefix("CREATE TABLE ") else {
        return false;
    };
    let name = rest
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or_default()
        .trim_matches('`');
    name == table
}
