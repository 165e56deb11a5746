use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::store::ExpenseStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ExpenseStore>>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, store: ExpenseStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            config: Arc::new(config),
        }
    }

    /// Build the state a fresh session starts with, seeded per `config`.
    pub fn from_config(config: Config) -> Self {
        let store = if config.seed_sample_data {
            ExpenseStore::with_sample_data()
        } else {
            ExpenseStore::new()
        };
        tracing::info!(expenses = store.len(), "Initialized expense store");
        Self::new(config, store)
    }

    pub fn read_store(&self) -> AppResult<RwLockReadGuard<'_, ExpenseStore>> {
        self.store
            .read()
            .map_err(|_| AppError::Internal("Expense store lock poisoned".into()))
    }

    pub fn write_store(&self) -> AppResult<RwLockWriteGuard<'_, ExpenseStore>> {
        self.store
            .write()
            .map_err(|_| AppError::Internal("Expense store lock poisoned".into()))
    }
}
