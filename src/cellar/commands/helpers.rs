use crate::error::{CellarError, Result};
use crate::selector::{index_wines, DisplayWine, PositionSelector, WineSelector};
use crate::store::DataStore;
use uuid::Uuid;

/// Wines numbered as the user sees them in `list`.
pub fn indexed_wines<S: DataStore>(store: &S, include_consumed: bool) -> Result<Vec<DisplayWine>> {
    let wines = store.list_wines(include_consumed)?;
    let positions = store.list_positions()?;
    Ok(index_wines(wines, &positions))
}

/// The current display form of one wine. Its list number is looked up in the
/// active listing, so consumed wines come back without one.
pub fn display_wine<S: DataStore>(store: &S, id: &Uuid) -> Result<DisplayWine> {
    indexed_wines(store, true)?
        .into_iter()
        .find(|dw| dw.wine.id == *id)
        .ok_or_else(|| CellarError::wine_not_found(id))
}

/// Resolve a wine reference to its id.
///
/// Numbers count active wines only. A name matches the first wine, in added
/// order, whose name contains the text (case-insensitive); active wines are
/// tried before consumed ones.
pub fn resolve_wine<S: DataStore>(store: &S, selector: &WineSelector) -> Result<Uuid> {
    match selector {
        WineSelector::Id(id) => store
            .get_wine(id)?
            .map(|w| w.id)
            .ok_or_else(|| CellarError::wine_not_found(id)),
        WineSelector::Number(n) => indexed_wines(store, false)?
            .into_iter()
            .find(|dw| dw.index == Some(*n))
            .map(|dw| dw.wine.id)
            .ok_or_else(|| CellarError::wine_not_found(selector)),
        WineSelector::Name(term) => {
            let term = term.to_lowercase();
            let mut wines = store.list_wines(true)?;
            // Stable sort keeps added order within each group.
            wines.sort_by_key(|w| !w.is_active());
            wines
                .into_iter()
                .find(|w| w.name.to_lowercase().contains(&term))
                .map(|w| w.id)
                .ok_or_else(|| CellarError::wine_not_found(selector))
        }
    }
}

/// Resolve a position reference to its id.
///
/// Identifiers are not unique across zones; an identifier naming more than
/// one position must be given by id instead.
pub fn resolve_position<S: DataStore>(store: &S, selector: &PositionSelector) -> Result<Uuid> {
    match selector {
        PositionSelector::Id(id) => store
            .get_position(id)?
            .map(|p| p.id)
            .ok_or_else(|| CellarError::position_not_found(id)),
        PositionSelector::Identifier(ident) => {
            let matches = store.find_positions(ident)?;
            match matches.as_slice() {
                [] => Err(CellarError::position_not_found(ident)),
                [only] => Ok(only.id),
                many => Err(CellarError::ValidationFailed(format!(
                    "Position {} exists in {} zones ({}); use its id instead",
                    ident,
                    many.len(),
                    many.iter()
                        .map(|p| format!("{} = {}", p.zone, p.id))
                        .collect::<Vec<_>>()
                        .join(", ")
                ))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{PositionLayout, StorageLayout, ZoneLayout};
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_small_cellar()
            .with_wine("Chablis Premier Cru", "white", Some("W1"))
            .with_wine("Malbec", "red", Some("R1"))
            .with_wine("Chardonnay", "white", None)
    }

    #[test]
    fn resolves_wine_by_number() {
        let f = fixture();
        let id = resolve_wine(&f.store, &WineSelector::Number(2)).unwrap();
        assert_eq!(id, f.wine("Malbec").id);
        assert!(matches!(
            resolve_wine(&f.store, &WineSelector::Number(9)),
            Err(CellarError::NotFound { .. })
        ));
    }

    #[test]
    fn resolves_wine_by_name_fragment() {
        let f = fixture();
        let id = resolve_wine(&f.store, &WineSelector::Name("CHABLIS".to_string())).unwrap();
        assert_eq!(id, f.wine("Chablis Premier Cru").id);

        // "ch" matches Chablis first (added first).
        let id = resolve_wine(&f.store, &WineSelector::Name("ch".to_string())).unwrap();
        assert_eq!(id, f.wine("Chablis Premier Cru").id);
    }

    #[test]
    fn name_prefers_active_wines() {
        let f = StoreFixture::new()
            .with_consumed_wine("Rioja 2015")
            .with_wine("Rioja 2019", "", None);
        let id = resolve_wine(&f.store, &WineSelector::Name("rioja".to_string())).unwrap();
        assert_eq!(id, f.wine("Rioja 2019").id);
    }

    #[test]
    fn resolves_wine_by_id() {
        let f = fixture();
        let wine = f.wine("Malbec");
        assert_eq!(
            resolve_wine(&f.store, &WineSelector::Id(wine.id)).unwrap(),
            wine.id
        );
        assert!(resolve_wine(&f.store, &WineSelector::Id(Uuid::new_v4())).is_err());
    }

    #[test]
    fn resolves_position_by_identifier() {
        let f = fixture();
        let id = resolve_position(&f.store, &PositionSelector::Identifier("R2".to_string()))
            .unwrap();
        assert_eq!(id, f.position("R2").id);
        assert!(matches!(
            resolve_position(&f.store, &PositionSelector::Identifier("X9".to_string())),
            Err(CellarError::NotFound { .. })
        ));
    }

    #[test]
    fn ambiguous_identifier_is_rejected() {
        let zone = |name: &str| ZoneLayout {
            name: name.to_string(),
            description: String::new(),
            positions: vec![PositionLayout {
                identifier: "1".to_string(),
                description: String::new(),
            }],
        };
        let f = StoreFixture::new().with_layout(StorageLayout {
            description: "Racks".to_string(),
            zones: vec![zone("Top"), zone("Bottom")],
            total_positions: 2,
        });

        assert!(matches!(
            resolve_position(&f.store, &PositionSelector::Identifier("1".to_string())),
            Err(CellarError::ValidationFailed(_))
        ));
    }

    #[test]
    fn display_wine_has_location() {
        let f = fixture();
        let dw = display_wine(&f.store, &f.wine("Malbec").id).unwrap();
        assert_eq!(dw.index, Some(2));
        assert_eq!(dw.location(), "R1 (Red Wine Zone)");
    }
}
