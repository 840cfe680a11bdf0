use crate::allocator::{PositionAllocator, WineClassifier};
use crate::assist::LabelReader;
use crate::commands::{suggest, CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::DataStore;

/// Read a label and propose a position for the wine on it.
///
/// The draft is returned for the user to confirm; saving it is a separate
/// `add`.
pub fn run<S: DataStore, R: LabelReader, C: WineClassifier>(
    store: &S,
    reader: &R,
    allocator: &PositionAllocator<C>,
    image: &[u8],
) -> Result<CmdResult> {
    let draft = reader.read_label(image)?;

    let mut result = suggest::run(store, allocator, &draft.description)?;
    result.messages.insert(
        0,
        CmdMessage::info(format!("Label read: {}", draft.name)),
    );
    result.draft = Some(draft);
    Ok(result)
}
