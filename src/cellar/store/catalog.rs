use crate::model::{Position, StorageConfig, Wine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A position joined with the name of the active wine stored in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionView {
    pub position: Position,
    pub wine_name: Option<String>,
}

/// A breach of the occupancy invariant: a position is occupied exactly when
/// one active wine points at it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// Position flagged occupied but no active wine points at it.
    FlagWithoutOccupant { position_id: Uuid },
    /// An active wine points at a position that is not marked as holding it.
    OccupantNotRecorded { position_id: Uuid, wine_id: Uuid },
    /// An active wine points at a position that does not exist.
    DanglingPosition { wine_id: Uuid, position_id: Uuid },
    /// More than one active wine points at the same position.
    SharedPosition { position_id: Uuid, wine_ids: Vec<Uuid> },
    /// A consumed wine still references a position.
    ConsumedHoldsPosition { wine_id: Uuid, position_id: Uuid },
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Violation::FlagWithoutOccupant { position_id } => {
                write!(f, "position {} is marked occupied but holds no wine", position_id)
            }
            Violation::OccupantNotRecorded {
                position_id,
                wine_id,
            } => write!(
                f,
                "wine {} sits at position {} which does not record it",
                wine_id, position_id
            ),
            Violation::DanglingPosition {
                wine_id,
                position_id,
            } => write!(
                f,
                "wine {} references missing position {}",
                wine_id, position_id
            ),
            Violation::SharedPosition {
                position_id,
                wine_ids,
            } => write!(
                f,
                "position {} is claimed by {} wines",
                position_id,
                wine_ids.len()
            ),
            Violation::ConsumedHoldsPosition {
                wine_id,
                position_id,
            } => write!(
                f,
                "consumed wine {} still references position {}",
                wine_id, position_id
            ),
        }
    }
}

/// The full persisted state: storage configurations, positions and wines.
///
/// Backends load and save a `Catalog` as one unit, which is what makes every
/// store transaction all-or-nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    storages: BTreeMap<Uuid, StorageConfig>,
    #[serde(default)]
    positions: BTreeMap<Uuid, Position>,
    #[serde(default)]
    wines: BTreeMap<Uuid, Wine>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Storage configurations ---

    /// Storage configurations, oldest first.
    pub fn storages(&self) -> Vec<&StorageConfig> {
        let mut storages: Vec<&StorageConfig> = self.storages.values().collect();
        storages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        storages
    }

    pub fn storage(&self, id: &Uuid) -> Option<&StorageConfig> {
        self.storages.get(id)
    }

    pub fn insert_storage(&mut self, storage: StorageConfig) {
        self.storages.insert(storage.id, storage);
    }

    // --- Positions ---

    /// All positions ordered by zone name, then layout order.
    pub fn positions(&self) -> Vec<&Position> {
        let mut positions: Vec<&Position> = self.positions.values().collect();
        positions.sort_by(|a, b| {
            a.zone
                .cmp(&b.zone)
                .then(a.ordinal.cmp(&b.ordinal))
                .then(a.identifier.cmp(&b.identifier))
        });
        positions
    }

    pub fn available_positions(&self) -> Vec<&Position> {
        self.positions()
            .into_iter()
            .filter(|p| p.is_available())
            .collect()
    }

    pub fn positions_by_identifier(&self, identifier: &str) -> Vec<&Position> {
        self.positions()
            .into_iter()
            .filter(|p| p.identifier == identifier)
            .collect()
    }

    pub fn position(&self, id: &Uuid) -> Option<&Position> {
        self.positions.get(id)
    }

    pub fn position_mut(&mut self, id: &Uuid) -> Option<&mut Position> {
        self.positions.get_mut(id)
    }

    pub fn insert_position(&mut self, position: Position) {
        self.positions.insert(position.id, position);
    }

    /// Positions joined with their active occupant's name.
    pub fn position_listing(&self) -> Vec<PositionView> {
        self.positions()
            .into_iter()
            .map(|p| PositionView {
                position: p.clone(),
                wine_name: p
                    .wine_id
                    .and_then(|id| self.wines.get(&id))
                    .filter(|w| w.is_active())
                    .map(|w| w.name.clone()),
            })
            .collect()
    }

    // --- Wines ---

    /// Wines in the order they were added.
    pub fn wines(&self, include_consumed: bool) -> Vec<&Wine> {
        let mut wines: Vec<&Wine> = self
            .wines
            .values()
            .filter(|w| include_consumed || w.is_active())
            .collect();
        wines.sort_by(|a, b| a.added_at.cmp(&b.added_at).then(a.name.cmp(&b.name)));
        wines
    }

    pub fn wine(&self, id: &Uuid) -> Option<&Wine> {
        self.wines.get(id)
    }

    pub fn insert_wine(&mut self, wine: Wine) {
        self.wines.insert(wine.id, wine);
    }

    pub fn remove_wine(&mut self, id: &Uuid) -> Option<Wine> {
        self.wines.remove(id)
    }

    /// Active wines that currently point at `position_id`.
    pub fn occupants_of(&self, position_id: &Uuid) -> Vec<&Wine> {
        self.wines(false)
            .into_iter()
            .filter(|w| w.position_id == Some(*position_id))
            .collect()
    }

    // --- Consistency ---

    /// Every occupancy invariant breach in the catalog. Empty when consistent.
    pub fn occupancy_violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();

        for wine in self.wines.values() {
            let Some(position_id) = wine.position_id else {
                continue;
            };
            if !wine.is_active() {
                violations.push(Violation::ConsumedHoldsPosition {
                    wine_id: wine.id,
                    position_id,
                });
            } else if !self.positions.contains_key(&position_id) {
                violations.push(Violation::DanglingPosition {
                    wine_id: wine.id,
                    position_id,
                });
            }
        }

        for position in self.positions() {
            let occupants = self.occupants_of(&position.id);
            match occupants.as_slice() {
                [] => {
                    if position.is_occupied || position.wine_id.is_some() {
                        violations.push(Violation::FlagWithoutOccupant {
                            position_id: position.id,
                        });
                    }
                }
                [wine] => {
                    if !position.is_occupied || position.wine_id != Some(wine.id) {
                        violations.push(Violation::OccupantNotRecorded {
                            position_id: position.id,
                            wine_id: wine.id,
                        });
                    }
                }
                many => violations.push(Violation::SharedPosition {
                    position_id: position.id,
                    wine_ids: many.iter().map(|w| w.id).collect(),
                }),
            }
        }

        violations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewWine;

    fn storage_id() -> Uuid {
        Uuid::new_v4()
    }

    #[test]
    fn positions_are_ordered_by_zone_then_layout_order() {
        let sid = storage_id();
        let mut catalog = Catalog::new();
        catalog.insert_position(Position::new(sid, "White Wine Zone", "W2", 1));
        catalog.insert_position(Position::new(sid, "White Wine Zone", "W1", 0));
        catalog.insert_position(Position::new(sid, "Red Wine Zone", "R1", 2));

        let idents: Vec<&str> = catalog
            .positions()
            .iter()
            .map(|p| p.identifier.as_str())
            .collect();
        assert_eq!(idents, vec!["R1", "W1", "W2"]);
    }

    #[test]
    fn listing_hides_consumed_occupants() {
        let sid = storage_id();
        let mut catalog = Catalog::new();
        let mut pos = Position::new(sid, "Red Wine Zone", "R1", 0);
        let mut wine = Wine::new(NewWine::new("Malbec", "red"));
        wine.consumed = true;
        pos.wine_id = Some(wine.id);
        catalog.insert_position(pos);
        catalog.insert_wine(wine);

        let listing = catalog.position_listing();
        assert_eq!(listing.len(), 1);
        assert_eq!(listing[0].wine_name, None);
    }

    #[test]
    fn empty_catalog_is_consistent() {
        assert!(Catalog::new().occupancy_violations().is_empty());
    }

    #[test]
    fn detects_flag_without_occupant() {
        let mut pos = Position::new(storage_id(), "Red Wine Zone", "R1", 0);
        pos.is_occupied = true;
        let id = pos.id;
        let mut catalog = Catalog::new();
        catalog.insert_position(pos);

        assert_eq!(
            catalog.occupancy_violations(),
            vec![Violation::FlagWithoutOccupant { position_id: id }]
        );
    }

    #[test]
    fn detects_shared_and_dangling_positions() {
        let pos = Position::new(storage_id(), "Red Wine Zone", "R1", 0);
        let pid = pos.id;
        let mut catalog = Catalog::new();
        catalog.insert_position(pos);

        let mut a = Wine::new(NewWine::new("A", ""));
        a.position_id = Some(pid);
        let mut b = Wine::new(NewWine::new("B", ""));
        b.position_id = Some(pid);
        let mut c = Wine::new(NewWine::new("C", ""));
        c.position_id = Some(Uuid::new_v4());
        catalog.insert_wine(a);
        catalog.insert_wine(b);
        catalog.insert_wine(c);

        let violations = catalog.occupancy_violations();
        assert_eq!(violations.len(), 2);
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::SharedPosition { wine_ids, .. } if wine_ids.len() == 2)));
        assert!(violations
            .iter()
            .any(|v| matches!(v, Violation::DanglingPosition { .. })));
    }
}
