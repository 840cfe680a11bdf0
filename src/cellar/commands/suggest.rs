use crate::allocator::{PositionAllocator, WineClassifier};
use crate::commands::{CmdMessage, CmdResult, NO_FREE_POSITIONS};
use crate::error::Result;
use crate::model::WineDescription;
use crate::store::DataStore;

/// Propose a free position for a wine. Nothing is written.
pub fn run<S: DataStore, C: WineClassifier>(
    store: &S,
    allocator: &PositionAllocator<C>,
    description: &WineDescription,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let available = store.available_positions()?;

    match allocator.suggest_with_reason(&available, description) {
        Some(suggestion) => {
            let mut message = format!(
                "Suggested position: {} (looks {})",
                suggestion.position.label(),
                suggestion.preference
            );
            if !suggestion.zone_matched {
                message.push_str(&format!(
                    "; no free position in a {} zone",
                    suggestion.preference
                ));
            }
            result.add_message(CmdMessage::info(message));
            result.suggestion = Some(suggestion);
        }
        None => result.add_message(CmdMessage::warning(NO_FREE_POSITIONS)),
    }

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::ColorPreference;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn suggests_matching_zone() {
        let f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Rioja", "red", Some("R1"));

        let result = run(&f.store, &PositionAllocator::default(), &"Barolo".into()).unwrap();

        let suggestion = result.suggestion.unwrap();
        assert_eq!(suggestion.position.identifier, "R2");
        assert_eq!(suggestion.preference, ColorPreference::Red);
        assert!(result.messages[0].content.contains("looks red"));
    }

    #[test]
    fn reports_zone_fallback() {
        let f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("A", "white", Some("W1"))
            .with_wine("B", "white", Some("W2"));

        let result = run(&f.store, &PositionAllocator::default(), &"Vin blanc".into()).unwrap();

        assert_eq!(result.suggestion.unwrap().position.identifier, "R1");
        assert!(result.messages[0].content.contains("no free position in a white zone"));
    }

    #[test]
    fn no_storage_means_no_suggestion() {
        let store = InMemoryStore::new();
        let result = run(&store, &PositionAllocator::default(), &"white".into()).unwrap();
        assert!(result.suggestion.is_none());
        assert!(matches!(result.messages[0].level, MessageLevel::Warning));
    }
}
