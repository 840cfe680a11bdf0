use crate::assist::{FoodInput, PairingAdvisor, WineSummary};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;
use tracing::debug;

/// Ask the advisor which of the active wines go with a dish.
///
/// An empty collection is answered locally, without calling the advisor.
pub fn run<S: DataStore, A: PairingAdvisor>(
    store: &S,
    advisor: &A,
    food: &FoodInput,
) -> Result<CmdResult> {
    let wines: Vec<WineSummary> = store
        .list_wines(false)?
        .iter()
        .map(WineSummary::from)
        .collect();

    let mut result = CmdResult::default();
    if wines.is_empty() {
        result.add_message(CmdMessage::warning(
            "Your collection is empty, so there is nothing to pair. Add some wines first.",
        ));
        return Ok(result);
    }

    debug!(wines = wines.len(), "requesting pairing");
    let recommendation = advisor.recommend(food, &wines)?;
    result.recommendation = Some(recommendation);
    Ok(result)
}
