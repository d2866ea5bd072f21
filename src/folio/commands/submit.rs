use crate::commands::{CmdMessage, CmdResult, THANK_YOU};
use crate::error::Result;
use crate::model::Submission;
use crate::store::FeedbackStore;
use crate::validate::validate;

/// Validate and store one submission. Invalid input never reaches the store.
pub fn run<S: FeedbackStore + ?Sized>(store: &S, submission: &Submission) -> Result<CmdResult> {
    let entry = validate(submission)?;
    let stored = store.create(entry)?;

    tracing::info!(
        id = %stored.id,
        contact_type = %stored.contact_type,
        "Feedback received"
    );

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(THANK_YOU));
    Ok(result.with_affected_entries(vec![stored]))
}
