use crate::commands::helpers::display_wine;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::lifecycle::{self, MoveKind};
use crate::store::DataStore;
use uuid::Uuid;

pub fn run<S: DataStore>(store: &mut S, wine_id: &Uuid, destination: &Uuid) -> Result<CmdResult> {
    let moved = lifecycle::relocate(store, wine_id, destination)?;
    let mut result = CmdResult::default();

    match moved.kind {
        MoveKind::AlreadyThere => {
            result.add_message(CmdMessage::info(format!(
                "{} is already at {}",
                moved.wine.name,
                moved.to.label()
            )));
        }
        MoveKind::Moved => {
            result.add_message(CmdMessage::success(format!(
                "Moved {} to {}",
                moved.wine.name,
                moved.to.label()
            )));
        }
        MoveKind::Swapped => {
            let other = moved
                .displaced
                .as_ref()
                .map(|w| w.name.as_str())
                .unwrap_or("the previous occupant");
            let whereto = moved
                .from
                .as_ref()
                .map(|p| p.label())
                .unwrap_or_else(|| "no position".to_string());
            result.add_message(CmdMessage::success(format!(
                "Moved {} to {}; swapped {} to {}",
                moved.wine.name,
                moved.to.label(),
                other,
                whereto
            )));
        }
    }

    result.affected_wines.push(display_wine(store, wine_id)?);
    if let Some(displaced) = &moved.displaced {
        result.affected_wines.push(display_wine(store, &displaced.id)?);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn swap_reports_both_wines() {
        let mut f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Chablis", "white", Some("W1"))
            .with_wine("Malbec", "red", Some("R1"));
        let chablis = f.wine("Chablis").id;
        let r1 = f.position("R1").id;

        let result = run(&mut f.store, &chablis, &r1).unwrap();

        assert_eq!(
            result.messages[0].content,
            "Moved Chablis to R1 (Red Wine Zone); swapped Malbec to W1 (White Wine Zone)"
        );
        assert_eq!(result.affected_wines.len(), 2);
        assert_eq!(result.affected_wines[1].location(), "W1 (White Wine Zone)");
        f.assert_consistent();
    }

    #[test]
    fn move_to_free_position() {
        let mut f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Chablis", "white", Some("W1"));
        let chablis = f.wine("Chablis").id;
        let w2 = f.position("W2").id;

        let result = run(&mut f.store, &chablis, &w2).unwrap();

        assert_eq!(result.messages[0].content, "Moved Chablis to W2 (White Wine Zone)");
        assert_eq!(result.affected_wines.len(), 1);
        assert!(f.position("W1").is_available());
    }

    #[test]
    fn self_move_is_info() {
        let mut f = StoreFixture::new()
            .with_small_cellar()
            .with_wine("Chablis", "white", Some("W1"));
        let chablis = f.wine("Chablis").id;
        let w1 = f.position("W1").id;

        let result = run(&mut f.store, &chablis, &w1).unwrap();

        assert!(result.messages[0].content.contains("already at W1"));
        assert_eq!(f.store.backend().save_count(), 2);
    }
}
