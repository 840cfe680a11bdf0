use super::catalog_store::CatalogStore;
use super::fs_backend::FsBackend;
use std::path::{Path, PathBuf};

/// Production store: a `catalog.json` file in the data directory.
pub type FileStore = CatalogStore<FsBackend>;

impl CatalogStore<FsBackend> {
    pub fn new(root: PathBuf) -> Self {
        CatalogStore::with_backend(FsBackend::new(root))
    }

    pub fn root(&self) -> &Path {
        self.backend.root()
    }
}
