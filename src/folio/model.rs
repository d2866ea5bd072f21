use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Marker persisted in place of a phone number the visitor left blank.
pub const PHONE_NOT_PROVIDED: &str = "N/A";

/// Submission fields, named as they appear on the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    FullName,
    Email,
    Phone,
    ContactType,
    Comment,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "full_name",
            Field::Email => "email",
            Field::Phone => "phone",
            Field::ContactType => "contact_type",
            Field::Comment => "comment",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque entry identifier.
///
/// The document store issues clock-derived tokens, the table store issues
/// integers; both travel as strings so callers never depend on the shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The numeric form, when the id was issued by a sequence.
    ///
    /// Only the exact rendering a sequence produces counts: `"01"` or
    /// `"+1"` name no entry, even though they parse to 1.
    pub fn as_seq(&self) -> Option<i64> {
        self.0
            .parse::<i64>()
            .ok()
            .filter(|seq| seq.to_string() == self.0)
    }
}

impl From<i64> for EntryId {
    fn from(seq: i64) -> Self {
        Self(seq.to_string())
    }
}

impl From<&str> for EntryId {
    fn from(token: &str) -> Self {
        Self(token.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Optional phone number. Absence is explicit, never an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Phone {
    Provided(String),
    NotProvided,
}

impl Phone {
    pub fn from_option(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(p) if !p.is_empty() && p != PHONE_NOT_PROVIDED => Phone::Provided(p.to_string()),
            _ => Phone::NotProvided,
        }
    }

    pub fn as_option(&self) -> Option<&str> {
        match self {
            Phone::Provided(p) => Some(p),
            Phone::NotProvided => None,
        }
    }
}

impl From<String> for Phone {
    fn from(raw: String) -> Self {
        Phone::from_option(Some(&raw))
    }
}

impl From<Phone> for String {
    fn from(phone: Phone) -> Self {
        match phone {
            Phone::Provided(p) => p,
            Phone::NotProvided => PHONE_NOT_PROVIDED.to_string(),
        }
    }
}

impl fmt::Display for Phone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_option().unwrap_or(PHONE_NOT_PROVIDED))
    }
}

/// Raw contact-form input, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Submission {
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub contact_type: String,
    pub comment: String,
}

/// A validated entry that has not been stored yet.
///
/// Only [`crate::validate::validate`] builds one, so every store write
/// carries content that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntry {
    pub(crate) full_name: String,
    pub(crate) email: String,
    pub(crate) phone: Phone,
    pub(crate) contact_type: String,
    pub(crate) comment: String,
}

impl NewEntry {
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn contact_type(&self) -> &str {
        &self.contact_type
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn into_entry(self, id: EntryId, timestamp: DateTime<Utc>) -> FeedbackEntry {
        FeedbackEntry {
            id,
            full_name: self.full_name,
            email: self.email,
            phone: self.phone,
            contact_type: self.contact_type,
            comment: self.comment,
            timestamp,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEntry {
    pub id: EntryId,
    pub full_name: String,
    pub email: String,
    pub phone: Phone,
    pub contact_type: String,
    pub comment: String,
    pub timestamp: DateTime<Utc>,
}
