use crate::commands::helpers::display_wine;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lifecycle;
use crate::store::DataStore;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &mut S, wine_id: &Uuid) -> Result<CmdResult> {
    let release = lifecycle::mark_consumed(store, wine_id)?;

    let mut result = CmdResult::default();
    let message = match &release.released {
        Some(position) => format!(
            "Marked {} as consumed; {} is free again",
            release.wine.name,
            position.label()
        ),
        None => format!("Marked {} as consumed", release.wine.name),
    };
    result.add_message(CmdMessage::success(message));
    result.affected_wines.push(display_wine(store, wine_id)?);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CellarError;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn consume_frees_position() {
        let mut f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Malbec", "red", Some("R1"));
        let id = f.wine("Malbec").id;

        let result = run(&mut f.store, &id).unwrap();

        assert!(result.messages[0].content.contains("R1 (Red Wine Zone) is free again"));
        assert!(result.affected_wines[0].wine.consumed);
        assert_eq!(result.affected_wines[0].index, None);
        assert!(f.position("R1").is_available());
        f.assert_consistent();
    }

    #[test]
    fn second_consume_is_reported() {
        let mut f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Malbec", "red", Some("R1"));
        let id = f.wine("Malbec").id;
        run(&mut f.store, &id).unwrap();

        assert!(matches!(
            run(&mut f.store, &id),
            Err(CellarError::AlreadyConsumed(_))
        ));
    }
}
