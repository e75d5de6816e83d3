use async_trait::async_trait;
use std::fmt;

use crate::models::Customer;

pub mod memory;
pub mod spanner;

pub use memory::InMemoryCustomerStore;
pub use spanner::SpannerCustomerStore;

/// Backend failure, carrying the backend's own description of what went wrong
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    message: String,
}

impl StorageError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StorageError {}

/// Single-table customer storage keyed by `customer_id`
///
/// Implementations perform no retries; a failed backend call surfaces as a
/// [`StorageError`] on the first attempt.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert the record, replacing any record already stored under the same id
    async fn put(&self, customer: &Customer) -> Result<(), StorageError>;

    /// Look up a record by id; `Ok(None)` means no such record
    async fn get(&self, customer_id: &str) -> Result<Option<Customer>, StorageError>;

    /// Verify the backend is reachable
    async fn health_check(&self) -> Result<(), StorageError>;
}
