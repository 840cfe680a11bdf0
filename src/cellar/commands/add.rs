use crate::allocator::{PositionAllocator, WineClassifier};
use crate::commands::helpers::display_wine;
use crate::commands::{CmdMessage, CmdResult, NO_FREE_POSITIONS};
use crate::error::Result;
use crate::lifecycle;
use crate::model::NewWine;
use crate::store::DataStore;
use uuid::Uuid;

/// Where a new wine should go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementRequest {
    /// Let the allocator pick a free position.
    Suggested,
    /// This exact position; fails if it is taken.
    At(Uuid),
    /// No position at all.
    Unpositioned,
}

pub fn run<S: DataStore, C: WineClassifier>(
    store: &mut S,
    allocator: &PositionAllocator<C>,
    attrs: NewWine,
    placement: PlacementRequest,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let position_id = match placement {
        PlacementRequest::At(id) => Some(id),
        PlacementRequest::Unpositioned => None,
        PlacementRequest::Suggested => {
            let available = store.available_positions()?;
            match allocator.suggest(&available, &attrs.description) {
                Some(position) => Some(position.id),
                None => {
                    result.add_message(CmdMessage::warning(NO_FREE_POSITIONS));
                    None
                }
            }
        }
    };

    let placed = lifecycle::add(store, attrs, position_id)?;
    let shown = display_wine(store, &placed.wine.id)?;

    let message = match &placed.position {
        Some(position) => format!("Added {} at {}", placed.wine.name, position.label()),
        None => format!("Added {} without a position", placed.wine.name),
    };
    result.add_message(CmdMessage::success(message));
    result.affected_wines.push(shown);
    Ok(result)
}
