use super::catalog::Catalog;
use crate::error::Result;
use std::path::PathBuf;

/// Abstract interface for raw catalog I/O.
/// This trait handles the "how" of storage (filesystem vs memory),
/// while [`CatalogStore`](super::catalog_store::CatalogStore) handles the
/// "what" (transactions, queries).
pub trait StorageBackend {
    /// Load the whole catalog. A backend with nothing saved yet returns an
    /// empty catalog.
    fn load_catalog(&self) -> Result<Catalog>;

    /// Replace the persisted catalog.
    /// MUST be atomic (e.g. write to tmp then rename) so a crash leaves either
    /// the old or the new catalog, never a mix.
    fn save_catalog(&self, catalog: &Catalog) -> Result<()>;

    /// Where the catalog lives. For FsBackend this is the real path,
    /// for MemBackend a virtual one.
    fn location(&self) -> PathBuf;
}
