use crate::store::CustomerStore;
use std::sync::Arc;

/// Shared application state
///
/// Built once at startup; handlers reach storage only through `store`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn CustomerStore>,
}

impl AppState {
    pub fn new(store: impl CustomerStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
