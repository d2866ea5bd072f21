use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::EntryId;
use crate::store::FeedbackStore;

/// Remove entries by id. Unknown ids are reported, not treated as failures.
pub fn run<S: FeedbackStore + ?Sized>(store: &S, ids: &[EntryId]) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    for id in ids {
        if store.delete(id)? {
            tracing::info!(id = %id, "Feedback deleted");
            result.add_message(CmdMessage::success(format!("Deleted feedback {}", id)));
            result.removed_ids.push(id.clone());
        } else {
            result.add_message(CmdMessage::warning(format!("No feedback with id {}", id)));
            result.missing_ids.push(id.clone());
        }
    }

    Ok(result)
}
