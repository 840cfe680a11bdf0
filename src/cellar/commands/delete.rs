use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lifecycle;
use crate::selector::DisplayWine;
use crate::store::DataStore;
use uuid::Uuid;

/// Remove a wine record permanently. Prefer `consume` for bottles drunk; this
/// is for records that should never have existed.
pub fn run<S: DataStore>(store: &mut S, wine_id: &Uuid) -> Result<CmdResult> {
    let removed = lifecycle::delete(store, wine_id)?;

    let mut result = CmdResult::default();
    let message = match &removed.released {
        Some(position) => format!(
            "Deleted {}; {} is free again",
            removed.wine.name,
            position.label()
        ),
        None => format!("Deleted {}", removed.wine.name),
    };
    result.add_message(CmdMessage::success(message));
    result.affected_wines.push(DisplayWine {
        index: None,
        wine: removed.wine,
        position: None,
    });
    Ok(result)
}
