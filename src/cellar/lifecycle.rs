//! # Wine Lifecycle
//!
//! State transitions of a wine record and the position occupancy that goes
//! with them:
//!
//! ```text
//!   absent ──add(pos)──▶ active-positioned ◀──move──▶ active-positioned
//!     │                        │    ▲
//!     └──add(none)──▶ active-unpositioned ──move──┘
//!                              │
//!                 consume ─────┴────▶ consumed (terminal for position ops)
//! ```
//!
//! Every operation runs inside one [`DataStore::transaction`], so the wine row
//! and the position rows it touches are written together or not at all. The
//! occupancy invariant (a position is occupied exactly when one active wine
//! points at it) holds after each call.
//!
//! Operations re-validate against the stored state rather than trusting the
//! caller: a position handed to [`add`] is checked for occupancy inside the
//! same transaction that claims it.

use crate::error::{CellarError, Result};
use crate::model::{NewWine, Position, Wine};
use crate::store::{Catalog, DataStore};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Result of [`add`].
#[derive(Debug, Clone)]
pub struct Placement {
    pub wine: Wine,
    pub position: Option<Position>,
}

/// Result of [`mark_consumed`] and [`delete`].
#[derive(Debug, Clone)]
pub struct Release {
    pub wine: Wine,
    /// The position freed by the operation, if the wine held one.
    pub released: Option<Position>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKind {
    /// The wine was already at the destination; nothing changed.
    AlreadyThere,
    /// The destination was free.
    Moved,
    /// The destination's occupant took the moving wine's old place.
    Swapped,
}

/// Result of [`relocate`].
#[derive(Debug, Clone)]
pub struct Relocation {
    pub kind: MoveKind,
    pub wine: Wine,
    pub from: Option<Position>,
    pub to: Position,
    /// The wine that was at the destination, in its new state.
    pub displaced: Option<Wine>,
}

/// Insert a new active wine, optionally claiming a position for it.
///
/// Fails with `PositionUnavailable` if the position is already held, and
/// `NotFound` if it does not exist.
pub fn add<S: DataStore>(
    store: &mut S,
    attrs: NewWine,
    position_id: Option<Uuid>,
) -> Result<Placement> {
    let placement = store.transaction(|catalog| {
        let mut wine = Wine::new(attrs);

        let position = match position_id {
            Some(pid) => {
                let position = claimable_position(catalog, &pid)?;
                let mut position = position.clone();
                position.occupy(wine.id);
                wine.position_id = Some(pid);
                catalog.insert_position(position.clone());
                Some(position)
            }
            None => None,
        };

        catalog.insert_wine(wine.clone());
        Ok(Placement { wine, position })
    })?;

    info!(
        wine_id = %placement.wine.id,
        name = %placement.wine.name,
        position = placement.position.as_ref().map(|p| p.identifier.as_str()).unwrap_or("-"),
        "wine added"
    );
    Ok(placement)
}

/// Mark a wine consumed and free its position.
///
/// A second call reports `AlreadyConsumed` and changes nothing.
pub fn mark_consumed<S: DataStore>(store: &mut S, wine_id: &Uuid) -> Result<Release> {
    let release = store.transaction(|catalog| {
        let mut wine = catalog
            .wine(wine_id)
            .cloned()
            .ok_or_else(|| CellarError::wine_not_found(wine_id))?;
        if wine.consumed {
            return Err(CellarError::AlreadyConsumed(wine.id));
        }

        let released = release_holdings(catalog, &wine);
        wine.consumed = true;
        wine.consumed_at = Some(Utc::now());
        wine.position_id = None;
        catalog.insert_wine(wine.clone());

        Ok(Release { wine, released })
    })?;

    info!(
        wine_id = %release.wine.id,
        name = %release.wine.name,
        released = release.released.as_ref().map(|p| p.identifier.as_str()).unwrap_or("-"),
        "wine consumed"
    );
    Ok(release)
}

/// Remove a wine record for good, freeing its position first.
pub fn delete<S: DataStore>(store: &mut S, wine_id: &Uuid) -> Result<Release> {
    let release = store.transaction(|catalog| {
        let wine = catalog
            .wine(wine_id)
            .cloned()
            .ok_or_else(|| CellarError::wine_not_found(wine_id))?;

        let released = release_holdings(catalog, &wine);
        catalog.remove_wine(wine_id);

        Ok(Release { wine, released })
    })?;

    info!(wine_id = %release.wine.id, name = %release.wine.name, "wine deleted");
    Ok(release)
}

/// Move a wine to `destination_id`, swapping with the wine already there.
///
/// - destination free: the source is released and the destination claimed.
/// - destination held by another active wine: that wine takes the source
///   position (or becomes unpositioned when the moving wine had none).
/// - destination is the wine's own position: success, nothing changes.
pub fn relocate<S: DataStore>(
    store: &mut S,
    wine_id: &Uuid,
    destination_id: &Uuid,
) -> Result<Relocation> {
    let relocation = store.transaction(|catalog| {
        let mut wine = catalog
            .wine(wine_id)
            .cloned()
            .ok_or_else(|| CellarError::wine_not_found(wine_id))?;
        if wine.consumed {
            return Err(CellarError::AlreadyConsumed(wine.id));
        }
        let mut destination = catalog
            .position(destination_id)
            .cloned()
            .ok_or_else(|| CellarError::position_not_found(destination_id))?;

        if wine.position_id == Some(destination.id) {
            return Ok(Relocation {
                kind: MoveKind::AlreadyThere,
                from: Some(destination.clone()),
                to: destination,
                wine,
                displaced: None,
            });
        }

        // A source id pointing nowhere is treated as no source.
        let mut source = wine
            .position_id
            .and_then(|pid| catalog.position(&pid).cloned());

        let occupant = catalog
            .occupants_of(&destination.id)
            .into_iter()
            .find(|w| w.id != wine.id)
            .cloned();

        let (kind, displaced) = match occupant {
            Some(mut other) => {
                match source.as_mut() {
                    Some(src) => {
                        src.occupy(other.id);
                        other.position_id = Some(src.id);
                    }
                    None => other.position_id = None,
                }
                catalog.insert_wine(other.clone());
                (MoveKind::Swapped, Some(other))
            }
            None => {
                if let Some(src) = source.as_mut() {
                    if src.wine_id.map_or(true, |id| id == wine.id) {
                        src.release();
                    }
                }
                (MoveKind::Moved, None)
            }
        };

        destination.occupy(wine.id);
        wine.position_id = Some(destination.id);

        if let Some(src) = &source {
            catalog.insert_position(src.clone());
        }
        catalog.insert_position(destination.clone());
        catalog.insert_wine(wine.clone());

        Ok(Relocation {
            kind,
            wine,
            from: source,
            to: destination,
            displaced,
        })
    })?;

    match relocation.kind {
        MoveKind::AlreadyThere => {}
        MoveKind::Moved => info!(
            wine_id = %relocation.wine.id,
            to = %relocation.to.identifier,
            "wine moved"
        ),
        MoveKind::Swapped => info!(
            wine_id = %relocation.wine.id,
            to = %relocation.to.identifier,
            displaced_id = %relocation.displaced.as_ref().map(|w| w.id.to_string()).unwrap_or_default(),
            "wines swapped"
        ),
    }
    Ok(relocation)
}

/// The position `pid`, if it exists and no other active wine holds it.
fn claimable_position<'a>(catalog: &'a Catalog, pid: &Uuid) -> Result<&'a Position> {
    let position = catalog
        .position(pid)
        .ok_or_else(|| CellarError::position_not_found(pid))?;

    let held_by = catalog
        .occupants_of(pid)
        .first()
        .map(|w| w.name.clone());

    if let Some(name) = held_by {
        return Err(CellarError::PositionUnavailable {
            position: position.label(),
            occupant: name,
        });
    }
    if position.is_occupied {
        return Err(CellarError::PositionUnavailable {
            position: position.label(),
            occupant: position
                .wine_id
                .map(|id| id.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
        });
    }

    Ok(position)
}

/// Free every position recorded as holding `wine`. Returns the one the wine
/// pointed at, if any.
///
/// A position recorded as holding a different wine is left alone.
fn release_holdings(catalog: &mut Catalog, wine: &Wine) -> Option<Position> {
    let mut released = None;

    if let Some(pid) = wine.position_id {
        if let Some(position) = catalog.position_mut(&pid) {
            if position.wine_id.map_or(true, |id| id == wine.id) {
                position.release();
            }
            released = Some(position.clone());
        }
    }

    let stale: Vec<Uuid> = catalog
        .positions()
        .into_iter()
        .filter(|p| p.wine_id == Some(wine.id))
        .map(|p| p.id)
        .collect();
    for pid in stale {
        if let Some(position) = catalog.position_mut(&pid) {
            position.release();
        }
    }

    released
}
