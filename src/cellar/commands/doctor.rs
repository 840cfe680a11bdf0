//! Repair of occupancy inconsistencies.
//!
//! Lifecycle operations keep the occupancy invariant on their own; this exists
//! for catalogs edited by hand or written by older versions. All repairs run in
//! one transaction, in this order:
//!
//! 1. consumed wines drop any position they still reference
//! 2. wines pointing at a missing position become unpositioned
//! 3. when several wines claim one position, the one the position records
//!    keeps it (else the earliest added) and the rest become unpositioned
//! 4. every position is set to match its single remaining claimant, or freed

use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::{Catalog, DataStore};
use tracing::warn;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &mut S) -> Result<CmdResult> {
    let repairs = store.transaction(|catalog| Ok(repair(catalog)))?;

    let mut result = CmdResult::default();
    if repairs.is_empty() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
    } else {
        result.add_message(CmdMessage::warning("Inconsistencies found and fixed:"));
        for repair in repairs {
            warn!(repair = %repair, "occupancy repaired");
            result.add_message(CmdMessage::info(format!("  - {}", repair)));
        }
    }
    Ok(result)
}

/// Bring `catalog` back to a consistent state, describing each change made.
fn repair(catalog: &mut Catalog) -> Vec<String> {
    let mut repairs = Vec::new();

    let wines: Vec<_> = catalog.wines(true).into_iter().cloned().collect();
    for mut wine in wines {
        let Some(pid) = wine.position_id else {
            continue;
        };
        if wine.consumed {
            repairs.push(format!("Consumed wine {} no longer holds a position", wine.name));
        } else if catalog.position(&pid).is_none() {
            repairs.push(format!(
                "Wine {} pointed at a missing position and is now unpositioned",
                wine.name
            ));
        } else {
            continue;
        }
        wine.position_id = None;
        catalog.insert_wine(wine);
    }

    let position_ids: Vec<Uuid> = catalog.positions().iter().map(|p| p.id).collect();
    for pid in position_ids {
        let Some(position) = catalog.position(&pid).cloned() else {
            continue;
        };
        let claimants: Vec<_> = catalog.occupants_of(&pid).into_iter().cloned().collect();

        let keeper = if claimants.len() > 1 {
            // occupants_of lists wines in added order.
            let keeper = claimants
                .iter()
                .find(|w| Some(w.id) == position.wine_id)
                .unwrap_or(&claimants[0])
                .clone();
            for mut other in claimants.into_iter().filter(|w| w.id != keeper.id) {
                repairs.push(format!(
                    "Wine {} shared {} with {} and is now unpositioned",
                    other.name,
                    position.identifier,
                    keeper.name
                ));
                other.position_id = None;
                catalog.insert_wine(other);
            }
            Some(keeper)
        } else {
            claimants.into_iter().next()
        };

        let Some(slot) = catalog.position_mut(&pid) else {
            continue;
        };
        match keeper {
            Some(wine) if !slot.is_occupied || slot.wine_id != Some(wine.id) => {
                slot.occupy(wine.id);
                repairs.push(format!(
                    "Position {} now records {}",
                    position.identifier, wine.name
                ));
            }
            None if slot.is_occupied || slot.wine_id.is_some() => {
                slot.release();
                repairs.push(format!(
                    "Position {} held no wine and was freed",
                    position.identifier
                ));
            }
            _ => {}
        }
    }

    repairs
}
