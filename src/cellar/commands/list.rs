use crate::commands::helpers::indexed_wines;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Wines in added order, numbered for selection. Consumed wines are included
/// only when asked for, and carry no number.
pub fn run<S: DataStore>(store: &S, include_consumed: bool) -> Result<CmdResult> {
    let wines = indexed_wines(store, include_consumed)?;

    let mut result = CmdResult::default();
    if wines.is_empty() {
        result.add_message(CmdMessage::info(
            "Your collection is empty. Add a wine to get started.",
        ));
    }
    Ok(result.with_listed_wines(wines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_active_wines_with_locations() {
        let f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Chablis", "white", Some("W1"))
            .with_consumed_wine("Gone")
            .with_wine("Loose", "", None);

        let result = run(&f.store, false).unwrap();

        let rows: Vec<(Option<usize>, &str, String)> = result
            .listed_wines
            .iter()
            .map(|dw| (dw.index, dw.wine.name.as_str(), dw.location()))
            .collect();
        assert_eq!(
            rows,
            vec![
                (Some(1), "Chablis", "W1 (White Wine Zone)".to_string()),
                (Some(2), "Loose", "-".to_string()),
            ]
        );
        assert!(result.messages.is_empty());
    }

    #[test]
    fn include_consumed_shows_everything() {
        let f = StoreFixture::new()
            .with_wine("Chablis", "white", None)
            .with_consumed_wine("Gone");

        let result = run(&f.store, true).unwrap();

        assert_eq!(result.listed_wines.len(), 2);
        assert_eq!(result.listed_wines[1].index, None);
        assert!(result.listed_wines[1].wine.consumed);
    }

    #[test]
    fn empty_collection_says_so() {
        let f = StoreFixture::new();
        let result = run(&f.store, false).unwrap();
        assert!(result.listed_wines.is_empty());
        assert!(result.messages[0].content.contains("empty"));
    }
}
