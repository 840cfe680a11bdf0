use crate::commands::{CmdMessage, CmdResult, ZoneListing};
use crate::error::Result;
use crate::store::DataStore;

/// Every position grouped by zone, each row joined with its occupant's name.
pub fn run<S: DataStore>(store: &S) -> Result<CmdResult> {
    let mut zones: Vec<ZoneListing> = Vec::new();

    // The listing is sorted by zone, so each zone's rows are contiguous.
    for view in store.position_listing()? {
        match zones.last_mut() {
            Some(listing) if listing.zone == view.position.zone => listing.rows.push(view),
            _ => zones.push(ZoneListing {
                zone: view.position.zone.clone(),
                rows: vec![view],
            }),
        }
    }

    let mut result = CmdResult::default();
    if zones.is_empty() {
        result.add_message(CmdMessage::info(
            "No storage configured yet. Run setup first.",
        ));
    }
    result.zones = zones;
    Ok(result)
}
