//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It serves as the
//! single entry point for all cellar operations, whichever front end drives it.
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs**: wine and position references typed by the user are
//!   parsed into selectors and resolved to ids
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: That belongs in `commands/*.rs` and `lifecycle.rs`
//! - **I/O operations**: No stdout, stderr, or file formatting
//!
//! ## References
//!
//! - Wine: `2` (list number), a UUID, or a name fragment (`chab`)
//! - Position: an identifier (`W1`) or a UUID
//!
//! See [`crate::selector`] for the exact rules.
//!
//! ## Dependency Injection
//!
//! `CellarApi<S: DataStore, C: WineClassifier>` owns one store and one
//! allocator, built once by the caller. Collaborators (label reader, layout
//! interpreter, pairing advisor) are passed per call, since a front end may
//! not have all of them.

use crate::allocator::{KeywordClassifier, PositionAllocator, WineClassifier};
use crate::assist::{FoodInput, LabelReader, LayoutInterpreter, PairingAdvisor};
use crate::commands::{self, add::PlacementRequest, CmdResult};
use crate::error::{CellarError, Result};
use crate::layout::StorageLayout;
use crate::model::{NewWine, WineDescription};
use crate::selector::{PositionSelector, WineSelector};
use crate::store::DataStore;
use uuid::Uuid;

/// The main API facade for cellar operations.
pub struct CellarApi<S: DataStore, C: WineClassifier = KeywordClassifier> {
    store: S,
    allocator: PositionAllocator<C>,
}

impl<S: DataStore, C: WineClassifier> CellarApi<S, C> {
    pub fn new(store: S, allocator: PositionAllocator<C>) -> Self {
        Self { store, allocator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // --- Storage setup ---

    pub fn setup_from_description<I: LayoutInterpreter>(
        &mut self,
        interpreter: &I,
        description: &str,
    ) -> Result<CmdResult> {
        commands::setup::run(&mut self.store, interpreter, description)
    }

    pub fn setup_from_layout(&mut self, layout: &StorageLayout) -> Result<CmdResult> {
        commands::setup::from_layout(&mut self.store, layout)
    }

    pub fn setup_default(&mut self) -> Result<CmdResult> {
        commands::setup::default_layout(&mut self.store)
    }

    // --- Adding wines ---

    /// Add a wine at the allocator's suggested position.
    pub fn add_wine(&mut self, attrs: NewWine) -> Result<CmdResult> {
        commands::add::run(
            &mut self.store,
            &self.allocator,
            attrs,
            PlacementRequest::Suggested,
        )
    }

    pub fn add_wine_at(&mut self, attrs: NewWine, position: &str) -> Result<CmdResult> {
        let position_id = self.resolve_position(position)?;
        commands::add::run(
            &mut self.store,
            &self.allocator,
            attrs,
            PlacementRequest::At(position_id),
        )
    }

    pub fn add_wine_unpositioned(&mut self, attrs: NewWine) -> Result<CmdResult> {
        commands::add::run(
            &mut self.store,
            &self.allocator,
            attrs,
            PlacementRequest::Unpositioned,
        )
    }

    pub fn suggest_position(&self, description: &WineDescription) -> Result<CmdResult> {
        commands::suggest::run(&self.store, &self.allocator, description)
    }

    pub fn scan_label<R: LabelReader>(&self, reader: &R, image: &[u8]) -> Result<CmdResult> {
        commands::scan::run(&self.store, reader, &self.allocator, image)
    }

    // --- Lifecycle ---

    pub fn consume_wine(&mut self, wine: &str) -> Result<CmdResult> {
        let id = self.resolve_wine(wine)?;
        commands::consume::run(&mut self.store, &id)
    }

    pub fn move_wine(&mut self, wine: &str, position: &str) -> Result<CmdResult> {
        let id = self.resolve_wine(wine)?;
        let destination = self.resolve_position(position)?;
        commands::relocate::run(&mut self.store, &id, &destination)
    }

    pub fn delete_wine(&mut self, wine: &str) -> Result<CmdResult> {
        let id = self.resolve_wine(wine)?;
        commands::delete::run(&mut self.store, &id)
    }

    // --- Reads ---

    pub fn list_wines(&self, include_consumed: bool) -> Result<CmdResult> {
        commands::list::run(&self.store, include_consumed)
    }

    pub fn list_positions(&self) -> Result<CmdResult> {
        commands::positions::run(&self.store)
    }

    pub fn recommend_pairing<A: PairingAdvisor>(
        &self,
        advisor: &A,
        food: &FoodInput,
    ) -> Result<CmdResult> {
        commands::pairing::run(&self.store, advisor, food)
    }

    pub fn status(&self) -> Result<CmdResult> {
        commands::status::run(&self.store)
    }

    pub fn doctor(&mut self) -> Result<CmdResult> {
        commands::doctor::run(&mut self.store)
    }

    fn resolve_wine(&self, reference: &str) -> Result<Uuid> {
        let selector: WineSelector = reference.parse().map_err(CellarError::ValidationFailed)?;
        commands::helpers::resolve_wine(&self.store, &selector)
    }

    fn resolve_position(&self, reference: &str) -> Result<Uuid> {
        let selector: PositionSelector =
            reference.parse().map_err(CellarError::ValidationFailed)?;
        commands::helpers::resolve_position(&self.store, &selector)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;

    fn make_api() -> CellarApi<InMemoryStore> {
        let mut api = CellarApi::new(InMemoryStore::new(), PositionAllocator::default());
        api.setup_default().unwrap();
        api
    }

    fn location_of(api: &CellarApi<InMemoryStore>, name: &str) -> String {
        api.list_wines(false)
            .unwrap()
            .listed_wines
            .into_iter()
            .find(|dw| dw.wine.name == name)
            .map(|dw| dw.location())
            .unwrap()
    }

    #[test]
    fn add_then_move_by_references() {
        let mut api = make_api();
        api.add_wine(NewWine::new("Chablis", "Crisp white Burgundy"))
            .unwrap();
        api.add_wine(NewWine::new("Malbec", "Mendoza")).unwrap();
        assert_eq!(location_of(&api, "Chablis"), "W1 (White Wine Zone)");
        assert_eq!(location_of(&api, "Malbec"), "R1 (Red Wine Zone)");

        let result = api.move_wine("chablis", "R1").unwrap();
        assert_eq!(result.affected_wines.len(), 2);
        assert_eq!(location_of(&api, "Malbec"), "W1 (White Wine Zone)");

        api.consume_wine("2").unwrap();
        let remaining = api.list_wines(false).unwrap().listed_wines;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].wine.name, "Chablis");
        assert!(api.store().find_positions("W1").unwrap()[0].is_available());
    }

    #[test]
    fn add_at_named_position() {
        let mut api = make_api();
        api.add_wine_at(NewWine::new("Barolo", "red"), "R4").unwrap();
        assert_eq!(location_of(&api, "Barolo"), "R4 (Red Wine Zone)");

        assert!(matches!(
            api.add_wine_at(NewWine::new("Barolo 2", "red"), "R4"),
            Err(CellarError::PositionUnavailable { .. })
        ));
        assert!(matches!(
            api.add_wine_at(NewWine::new("Nowhere", "red"), "Z9"),
            Err(CellarError::NotFound { .. })
        ));
    }

    #[test]
    fn unpositioned_add_and_delete() {
        let mut api = make_api();
        api.add_wine_unpositioned(NewWine::new("Magnum", "")).unwrap();
        assert_eq!(location_of(&api, "Magnum"), "-");

        api.delete_wine("magnum").unwrap();
        assert!(api.list_wines(true).unwrap().listed_wines.is_empty());
    }

    #[test]
    fn bad_references_are_rejected() {
        let mut api = make_api();
        assert!(matches!(
            api.consume_wine("0"),
            Err(CellarError::ValidationFailed(_))
        ));
        assert!(matches!(
            api.consume_wine("nothing like this"),
            Err(CellarError::NotFound { .. })
        ));
        assert!(matches!(
            api.move_wine("1", "W1"),
            Err(CellarError::NotFound { .. })
        ));
    }

    #[test]
    fn status_and_doctor_dispatch() {
        let mut api = make_api();
        let status = api.status().unwrap().status.unwrap();
        assert_eq!(status.positions, 12);
        assert!(api.doctor().unwrap().messages[0]
            .content
            .contains("No inconsistencies"));
        assert_eq!(api.list_positions().unwrap().zones.len(), 2);
    }
}
