//! # Command Layer
//!
//! This module contains the user-level operations of cellar. Each command lives
//! in its own submodule as a plain function over a [`DataStore`] and returns a
//! [`CmdResult`].
//!
//! ## Role and Responsibilities
//!
//! Commands sit between the API facade and the core:
//! - Resolve what the user asked for into lifecycle or allocator calls
//! - Turn outcomes into structured data (`DisplayWine`, zone listings, status)
//! - Phrase what happened as leveled messages
//!
//! The occupancy rules themselves are not here; they live in
//! [`crate::lifecycle`] so every command gets them the same way.
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O**: No stdout, stderr, or terminal concerns
//! - **Argument parsing**: Selectors arrive parsed from the API layer
//! - **Exit codes**: Return `Result`, let the caller decide
//!
//! ## Testing Strategy
//!
//! Command tests use `InMemoryStore` (via `StoreFixture`) and check both the
//! returned `CmdResult` and the resulting store state.
//!
//! ## Command Modules
//!
//! - [`setup`]: Create a storage configuration from a description or layout
//! - [`add`]: Add a wine, at a suggested or given position
//! - [`suggest`]: Propose a position for a wine description
//! - [`scan`]: Read a label and propose a position, without saving
//! - [`consume`]: Mark a wine consumed
//! - [`relocate`]: Move a wine, swapping when the destination is taken
//! - [`delete`]: Remove a wine record
//! - [`list`]: List wines with their locations
//! - [`positions`]: Zone tables of positions and occupants
//! - [`pairing`]: Ask for pairing recommendations from the collection
//! - [`status`]: Collection and storage counts
//! - [`doctor`]: Detect and repair occupancy inconsistencies
//! - [`helpers`]: Selector resolution shared by the above

use crate::allocator::Suggestion;
use crate::model::NewWine;
use crate::selector::DisplayWine;
use crate::store::PositionView;
use serde::Serialize;
use std::path::PathBuf;

pub mod add;
pub mod consume;
pub mod delete;
pub mod doctor;
pub mod helpers;
pub mod list;
pub mod pairing;
pub mod positions;
pub mod relocate;
pub mod scan;
pub mod setup;
pub mod status;
pub mod suggest;

/// Message shown when a wine needs a place and none is left.
pub const NO_FREE_POSITIONS: &str =
    "No available positions in your storage. Please free up space by consuming wines.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Positions of one zone, in layout order.
#[derive(Debug, Clone)]
pub struct ZoneListing {
    pub zone: String,
    pub rows: Vec<PositionView>,
}

impl ZoneListing {
    pub fn free(&self) -> usize {
        self.rows.iter().filter(|r| r.position.is_available()).count()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CellarStatus {
    pub storages: usize,
    pub positions: usize,
    pub free_positions: usize,
    pub active_wines: usize,
    pub consumed_wines: usize,
    pub unpositioned_wines: usize,
    pub location: PathBuf,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Wines changed by the operation, in their new state.
    pub affected_wines: Vec<DisplayWine>,
    /// Wines to display.
    pub listed_wines: Vec<DisplayWine>,
    pub zones: Vec<ZoneListing>,
    pub suggestion: Option<Suggestion>,
    /// A label read but not yet saved.
    pub draft: Option<NewWine>,
    pub recommendation: Option<String>,
    pub status: Option<CellarStatus>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_wines(mut self, wines: Vec<DisplayWine>) -> Self {
        self.listed_wines = wines;
        self
    }
}
