use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::{CustomerStore, StorageError};
use crate::models::Customer;

/// Process-local customer store
///
/// Used for local runs without a database and as the injected fake in tests,
/// where `failing` builds a store that rejects every call with a fixed message.
#[derive(Clone, Default)]
pub struct InMemoryCustomerStore {
    records: Arc<RwLock<HashMap<String, Customer>>>,
    failure: Option<String>,
}

impl InMemoryCustomerStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            records: Arc::default(),
            failure: Some(message.into()),
        }
    }

    #[cfg(test)]
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }

    fn check_failure(&self) -> Result<(), StorageError> {
        match &self.failure {
            Some(message) => Err(StorageError::new(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl CustomerStore for InMemoryCustomerStore {
    async fn put(&self, customer: &Customer) -> Result<(), StorageError> {
        self.check_failure()?;
        self.records
            .write()
            .await
            .insert(customer.customer_id.clone(), customer.clone());
        tracing::debug!("Stored customer in memory: {}", customer.customer_id);
        Ok(())
    }

    async fn get(&self, customer_id: &str) -> Result<Option<Customer>, StorageError> {
        self.check_failure()?;
        Ok(self.records.read().await.get(customer_id).cloned())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        self.check_failure()
    }
}
