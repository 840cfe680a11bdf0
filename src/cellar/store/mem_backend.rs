use super::backend::StorageBackend;
use super::catalog::Catalog;
use crate::error::{CellarError, Result};
use std::cell::{Cell, RefCell};
use std::path::PathBuf;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since cellar is single-threaded.
/// This keeps the `StorageBackend` trait on `&self` for all methods.
#[derive(Default)]
pub struct MemBackend {
    catalog: RefCell<Catalog>,
    simulate_write_error: Cell<bool>,
    saves: Cell<usize>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    /// Test helper to plant a catalog directly, bypassing all checks.
    pub fn replace_catalog(&self, catalog: Catalog) {
        *self.catalog.borrow_mut() = catalog;
    }
}

impl StorageBackend for MemBackend {
    fn load_catalog(&self) -> Result<Catalog> {
        Ok(self.catalog.borrow().clone())
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        if self.simulate_write_error.get() {
            return Err(CellarError::StoreUnavailable(
                "Simulated write error".to_string(),
            ));
        }
        *self.catalog.borrow_mut() = catalog.clone();
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }

    fn location(&self) -> PathBuf {
        PathBuf::from("memory://catalog")
    }
}
