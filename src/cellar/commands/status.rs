use crate::commands::{CellarStatus, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let catalog = store.snapshot()?;
    let all_wines = catalog.wines(true);
    let active = all_wines.iter().filter(|w| w.is_active()).count();

    let status = CellarStatus {
        storages: catalog.storages().len(),
        positions: catalog.positions().len(),
        free_positions: catalog.available_positions().len(),
        active_wines: active,
        consumed_wines: all_wines.len() - active,
        unpositioned_wines: all_wines
            .iter()
            .filter(|w| w.is_active() && w.position_id.is_none())
            .count(),
        location: store.location(),
    };

    let mut result = CmdResult::default();
    if status.storages == 0 {
        result.add_message(CmdMessage::warning(
            "No storage configured yet. Run setup first.",
        ));
    }
    let violations = catalog.occupancy_violations().len();
    if violations > 0 {
        result.add_message(CmdMessage::warning(format!(
            "{} occupancy problem(s) found. Run doctor to repair them.",
            violations
        )));
    }
    result.status = Some(status);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn counts_everything() {
        let f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Chablis", "white", Some("W1"))
            .with_wine("Loose", "", None)
            .with_consumed_wine("Gone");

        let result = run(&f.store).unwrap();
        let status = result.status.unwrap();

        assert_eq!(status.storages, 1);
        assert_eq!(status.positions, 4);
        assert_eq!(status.free_positions, 3);
        assert_eq!(status.active_wines, 2);
        assert_eq!(status.consumed_wines, 1);
        assert_eq!(status.unpositioned_wines, 1);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn warns_without_storage() {
        let f = StoreFixture::new();
        let result = run(&f.store).unwrap();
        assert!(result.messages[0].content.contains("setup"));
    }
}
