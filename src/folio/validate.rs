//! Submission validation.
//!
//! Rules:
//! - `full_name`, `email`, `contact_type` and `comment` are required and must
//!   be non-empty after trimming. They are checked in that order and the
//!   first missing one is reported.
//! - `email` must look like `local@domain.tld`. Nothing is resolved or sent.
//! - `phone` is optional; blank input becomes [`Phone::NotProvided`].

use crate::error::{FolioError, Result};
use crate::model::{Field, NewEntry, Phone, Submission};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern compiles")
});

pub fn validate(submission: &Submission) -> Result<NewEntry> {
    let full_name = required(&submission.full_name, Field::FullName)?;
    let email = required(&submission.email, Field::Email)?;
    let contact_type = required(&submission.contact_type, Field::ContactType)?;
    let comment = required(&submission.comment, Field::Comment)?;

    if !is_valid_email(email) {
        return Err(FolioError::InvalidEmail(email.to_string()));
    }

    Ok(NewEntry {
        full_name: full_name.to_string(),
        email: email.to_string(),
        phone: Phone::from_option(submission.phone.as_deref()),
        contact_type: contact_type.to_string(),
        comment: comment.to_string(),
    })
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

fn required(value: &str, field: Field) -> Result<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(FolioError::MissingField(field))
    } else {
        Ok(trimmed)
    }
}
