use crate::assist::LayoutInterpreter;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::{CellarError, Result};
use crate::layout::{self, StorageLayout};
use crate::store::DataStore;
use tracing::{info, warn};

/// Set up storage from a free-text description.
///
/// The interpreter's output is parsed and validated; if either step fails the
/// default grid is used instead and a warning says so. A failing interpreter
/// call is returned as an error.
pub fn run<S: DataStore, I: LayoutInterpreter>(
    store: &mut S,
    interpreter: &I,
    description: &str,
) -> Result<CmdResult> {
    let raw = interpreter.interpret(description)?;

    // build() rejects an invalid layout before anything is written, so a
    // ValidationFailed from either step leaves the store untouched.
    let outcome = layout::parse_layout(&raw).and_then(|mut parsed| {
        if parsed.description.trim().is_empty() {
            parsed.description = description.trim().to_string();
        }
        from_layout(store, &parsed)
    });

    match outcome {
        Err(CellarError::ValidationFailed(reason)) => {
            warn!(reason = %reason, "storage description not understood, using default layout");
            let mut result = default_layout(store)?;
            result.messages.insert(
                0,
                CmdMessage::warning(format!(
                    "Could not understand the storage description ({}). Using the default layout instead.",
                    reason
                )),
            );
            Ok(result)
        }
        other => other,
    }
}

/// Set up storage from an already structured layout.
pub fn from_layout<S: DataStore>(store: &mut S, layout: &StorageLayout) -> Result<CmdResult> {
    let built = layout::build(layout)?;
    let had_storage = store.has_storage()?;

    let storage = built.storage.clone();
    let count = built.positions.len();
    store.transaction(|catalog| {
        catalog.insert_storage(built.storage);
        for position in built.positions {
            catalog.insert_position(position);
        }
        Ok(())
    })?;

    info!(
        storage_id = %storage.id,
        zones = storage.zones.len(),
        positions = count,
        "storage configured"
    );

    let mut result = CmdResult::default();
    for warning in built.warnings {
        result.add_message(CmdMessage::warning(warning));
    }
    if had_storage {
        result.add_message(CmdMessage::info(
            "Storage already existed; the new positions were added to it.",
        ));
    }
    let label = if storage.description.is_empty() {
        "Storage".to_string()
    } else {
        storage.description.clone()
    };
    result.add_message(CmdMessage::success(format!(
        "{} configured with {} positions in {} zones.",
        label,
        count,
        storage.zones.len()
    )));
    Ok(result)
}

pub fn default_layout<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    from_layout(store, &StorageLayout::default_grid())
}
