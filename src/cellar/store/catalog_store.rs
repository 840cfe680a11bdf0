use super::backend::StorageBackend;
use super::catalog::Catalog;
use super::DataStore;
use crate::error::Result;
use std::path::PathBuf;

pub struct CatalogStore<B: StorageBackend> {
    /// The underlying storage backend.
    /// Exposed as pub(crate) for testing and internal access only.
    pub(crate) backend: B,
}

impl<B: StorageBackend> CatalogStore<B> {
    pub fn with_backend(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

impl<B: StorageBackend> DataStore for CatalogStore<B> {
    fn snapshot(&self) -> Result<Catalog> {
        self.backend.load_catalog()
    }

    fn transaction<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Catalog) -> Result<T>,
    {
        // Work on a private copy: nothing reaches the backend unless the whole
        // operation succeeded.
        let mut catalog = self.backend.load_catalog()?;
        let before = catalog.clone();
        let outcome = op(&mut catalog)?;

        if catalog != before {
            self.backend.save_catalog(&catalog)?;
        }

        Ok(outcome)
    }

    fn location(&self) -> PathBuf {
        self.backend.location()
    }
}
