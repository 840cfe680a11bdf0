use super::backend::StorageBackend;
use super::catalog::Catalog;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

const CATALOG_FILENAME: &str = "catalog.json";

pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn catalog_file(&self) -> PathBuf {
        self.root.join(CATALOG_FILENAME)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }
}

impl StorageBackend for FsBackend {
    fn load_catalog(&self) -> Result<Catalog> {
        let data_file = self.catalog_file();
        if !data_file.exists() {
            return Ok(Catalog::default());
        }
        let content = fs::read_to_string(data_file)?;
        let catalog: Catalog = serde_json::from_str(&content)?;
        Ok(catalog)
    }

    fn save_catalog(&self, catalog: &Catalog) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(catalog)?;

        // Atomic write
        let tmp_file = self.root.join(format!(".catalog-{}.tmp", Uuid::new_v4()));
        fs::write(&tmp_file, content)?;
        if let Err(err) = fs::rename(&tmp_file, self.catalog_file()) {
            let _ = fs::remove_file(&tmp_file);
            return Err(err.into());
        }

        Ok(())
    }

    fn location(&self) -> PathBuf {
        self.catalog_file()
    }
}
