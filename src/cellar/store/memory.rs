use super::catalog_store::CatalogStore;
use super::mem_backend::MemBackend;

pub type InMemoryStore = CatalogStore<MemBackend>;

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        CatalogStore::with_backend(MemBackend::new())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::layout::{self, PositionLayout, StorageLayout, ZoneLayout};
    use crate::model::{NewWine, Position, Wine};
    use crate::store::DataStore;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        /// Two zones of two positions each: `White Wine Zone` (W1, W2) and
        /// `Red Wine Zone` (R1, R2).
        pub fn with_small_cellar(self) -> Self {
            self.with_layout(StorageLayout {
                description: "Test fridge".to_string(),
                zones: vec![
                    zone("White Wine Zone", &["W1", "W2"]),
                    zone("Red Wine Zone", &["R1", "R2"]),
                ],
                total_positions: 4,
            })
        }

        pub fn with_default_layout(self) -> Self {
            self.with_layout(StorageLayout::default_grid())
        }

        pub fn with_layout(mut self, layout: StorageLayout) -> Self {
            let built = layout::build(&layout).unwrap();
            self.store
                .transaction(|catalog| {
                    catalog.insert_storage(built.storage);
                    for position in built.positions {
                        catalog.insert_position(position);
                    }
                    Ok(())
                })
                .unwrap();
            self
        }

        /// Adds an active wine, seated at `identifier` when given.
        pub fn with_wine(mut self, name: &str, description: &str, identifier: Option<&str>) -> Self {
            let position = identifier.map(|ident| self.position(ident).id);
            crate::lifecycle::add(&mut self.store, NewWine::new(name, description), position)
                .unwrap();
            self
        }

        pub fn with_consumed_wine(mut self, name: &str) -> Self {
            let wine = crate::lifecycle::add(&mut self.store, NewWine::new(name, ""), None)
                .unwrap()
                .wine;
            crate::lifecycle::mark_consumed(&mut self.store, &wine.id).unwrap();
            self
        }

        /// The first position with this identifier. Panics if there is none.
        pub fn position(&self, identifier: &str) -> Position {
            self.store.find_positions(identifier).unwrap().remove(0)
        }

        /// The wine with this exact name. Panics if there is none.
        pub fn wine(&self, name: &str) -> Wine {
            self.store
                .list_wines(true)
                .unwrap()
                .into_iter()
                .find(|w| w.name == name)
                .unwrap()
        }

        pub fn assert_consistent(&self) {
            let violations = self.store.snapshot().unwrap().occupancy_violations();
            assert!(violations.is_empty(), "violations: {:?}", violations);
        }
    }

    fn zone(name: &str, identifiers: &[&str]) -> ZoneLayout {
        ZoneLayout {
            name: name.to_string(),
            description: String::new(),
            positions: identifiers
                .iter()
                .map(|i| PositionLayout {
                    identifier: i.to_string(),
                    description: String::new(),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use crate::store::DataStore;

    #[test]
    fn test_fixtures_coverage() {
        let fixture = StoreFixture::default()
            .with_small_cellar()
            .with_wine("Chablis", "white", Some("W1"))
            .with_wine("Loose", "", None)
            .with_consumed_wine("Gone");

        assert_eq!(fixture.store.list_positions().unwrap().len(), 4);
        assert_eq!(fixture.store.list_wines(false).unwrap().len(), 2);
        assert_eq!(fixture.store.list_wines(true).unwrap().len(), 3);
        assert_eq!(
            fixture.position("W1").wine_id,
            Some(fixture.wine("Chablis").id)
        );
        fixture.assert_consistent();
    }

    #[test]
    fn test_default_layout_fixture() {
        let fixture = StoreFixture::new().with_default_layout();
        assert!(fixture.store.has_storage().unwrap());
        assert_eq!(fixture.store.available_positions().unwrap().len(), 12);
    }
}
