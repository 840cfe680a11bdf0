//! # Storage Layer
//!
//! This module defines the storage abstraction for cellar. The [`DataStore`]
//! trait lets the lifecycle rules run unchanged against any backend.
//!
//! ## Split of Responsibilities
//!
//! - [`backend::StorageBackend`]: raw I/O. Loads and saves one [`Catalog`]
//!   snapshot holding all three collections (storage configurations,
//!   positions, wines). Saves are atomic.
//! - [`catalog_store::CatalogStore`]: the one `DataStore` implementation. Runs
//!   every mutation as a transaction over a private copy of the catalog and
//!   only persists it when the whole operation succeeded.
//!
//! The occupancy rules (add, consume, move/swap, delete) live once, in
//! [`crate::lifecycle`], never per backend.
//!
//! ## Atomicity
//!
//! Because a backend replaces the whole catalog in one atomic write, a crash
//! mid-operation leaves either the old catalog or the new one. A backend that
//! cannot do this (a remote table API without multi-row transactions) would
//! have to order its row writes release-first, so an interruption leaves at
//! worst a freed position rather than a doubly occupied one; `doctor` repairs
//! what is left.
//!
//! ## Reads
//!
//! Reads never fail on empty results, and lookups by id return `Ok(None)`
//! rather than an error so callers can phrase absence for the user.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: `catalog.json` in the data directory.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O.

use crate::error::Result;
use crate::model::{Position, StorageConfig, Wine};
use std::path::PathBuf;
use uuid::Uuid;

pub mod backend;
pub mod catalog;
pub mod catalog_store;
pub mod fs;
pub mod fs_backend;
pub mod mem_backend;
pub mod memory;

pub use catalog::{Catalog, PositionView, Violation};

/// Abstract interface for catalog storage.
pub trait DataStore {
    /// A consistent read-only copy of the whole catalog.
    fn snapshot(&self) -> Result<Catalog>;

    /// Run `op` against the catalog and persist its changes atomically.
    /// If `op` fails nothing is written.
    fn transaction<T, F>(&mut self, op: F) -> Result<T>
    where
        F: FnOnce(&mut Catalog) -> Result<T>;

    /// Where the data lives (file path or virtual location).
    fn location(&self) -> PathBuf;

    fn has_storage(&self) -> Result<bool> {
        Ok(!self.snapshot()?.storages().is_empty())
    }

    fn list_storages(&self) -> Result<Vec<StorageConfig>> {
        Ok(self.snapshot()?.storages().into_iter().cloned().collect())
    }

    fn get_wine(&self, id: &Uuid) -> Result<Option<Wine>> {
        Ok(self.snapshot()?.wine(id).cloned())
    }

    /// Wines in added order; consumed ones only when asked for.
    fn list_wines(&self, include_consumed: bool) -> Result<Vec<Wine>> {
        Ok(self
            .snapshot()?
            .wines(include_consumed)
            .into_iter()
            .cloned()
            .collect())
    }

    fn get_position(&self, id: &Uuid) -> Result<Option<Position>> {
        Ok(self.snapshot()?.position(id).cloned())
    }

    fn list_positions(&self) -> Result<Vec<Position>> {
        Ok(self.snapshot()?.positions().into_iter().cloned().collect())
    }

    /// Positions with no occupant.
    fn available_positions(&self) -> Result<Vec<Position>> {
        Ok(self
            .snapshot()?
            .available_positions()
            .into_iter()
            .cloned()
            .collect())
    }

    /// Positions carrying the given identifier, across all zones.
    fn find_positions(&self, identifier: &str) -> Result<Vec<Position>> {
        Ok(self
            .snapshot()?
            .positions_by_identifier(identifier)
            .into_iter()
            .cloned()
            .collect())
    }

    /// All positions joined with their occupant's name, for display.
    fn position_listing(&self) -> Result<Vec<PositionView>> {
        Ok(self.snapshot()?.position_listing())
    }
}
