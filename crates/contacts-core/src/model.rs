// # Contact Model
//
// The contact book has exactly one entity. A `Contact` is what the store
// returns; a `ContactDraft` is the five editable fields a client submits for
// insert or update.
//
// ## Wire Format
//
// ```json
// {
//   "contact_id": 7,
//   "first_name": "Ada",
//   "last_name": "Lovelace",
//   "phone": "+44 20 7946 0000",
//   "email": "ada@example.com",
//   "address": "12 St James's Square, London",
//   "created_at": "2026-10-16T09:30:00.125Z"
// }
// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Store-assigned contact identifier
pub type ContactId = i64;

/// Maximum length (in characters) of `first_name`
pub const FIRST_NAME_MAX_LEN: usize = 50;
/// Maximum length (in characters) of `last_name`
pub const LAST_NAME_MAX_LEN: usize = 50;
/// Maximum length (in characters) of `phone`
pub const PHONE_MAX_LEN: usize = 20;
/// Maximum length (in characters) of `email`
pub const EMAIL_MAX_LEN: usize = 100;
/// Maximum length (in characters) of `address`
pub const ADDRESS_MAX_LEN: usize = 255;

/// A persisted contact record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Contact {
    /// Primary key, assigned on insert and never changed
    #[serde(rename = "contact_id")]
    #[sqlx(rename = "contact_id")]
    pub id: ContactId,
    pub first_name: String,
    pub last_name: Option<String>,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    /// Set once by the store at insert time
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Build a record from a draft plus the store-assigned fields
    pub fn from_draft(id: ContactId, draft: ContactDraft, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            created_at,
        }
    }

    /// Copy of the editable fields
    pub fn draft(&self) -> ContactDraft {
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }

    /// Replace every editable field, keeping `id` and `created_at`
    pub fn apply(&mut self, draft: ContactDraft) {
        self.first_name = draft.first_name;
        self.last_name = draft.last_name;
        self.phone = draft.phone;
        self.email = draft.email;
        self.address = draft.address;
    }

    /// Case-insensitive substring match over the five searchable fields
    ///
    /// `needle` must already be lower-cased.
    pub fn matches(&self, needle: &str) -> bool {
        let hit = |value: &str| value.to_lowercase().contains(needle);

        hit(&self.first_name)
            || self.last_name.as_deref().is_some_and(hit)
            || hit(&self.phone)
            || self.email.as_deref().is_some_and(hit)
            || self.address.as_deref().is_some_and(hit)
    }
}

/// The editable fields of a contact
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDraft {
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ContactDraft {
    /// Create a draft with only the required fields
    pub fn new(first_name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Set the last name
    pub fn with_last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// Set the email
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the address
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Map blank optional fields to `None`
    ///
    /// A blank email is "absent" and must not take part in the email
    /// uniqueness rule.
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name,
            last_name: non_blank(self.last_name),
            phone: self.phone,
            email: non_blank(self.email),
            address: non_blank(self.address),
        }
    }

    /// Evaluate the column length constraints declared by the schema
    ///
    /// The error messages match what SQLite reports for the named CHECK
    /// constraints, so both stores fail identically.
    pub fn check_constraints(&self) -> Result<()> {
        check_len("first_name_length", Some(&self.first_name), FIRST_NAME_MAX_LEN)?;
        check_len("last_name_length", self.last_name.as_deref(), LAST_NAME_MAX_LEN)?;
        check_len("phone_length", Some(&self.phone), PHONE_MAX_LEN)?;
        check_len("email_length", self.email.as_deref(), EMAIL_MAX_LEN)?;
        check_len("address_length", self.address.as_deref(), ADDRESS_MAX_LEN)?;
        Ok(())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn check_len(constraint: &str, value: Option<&str>, max: usize) -> Result<()> {
    match value {
        Some(v) if v.chars().count() > max => Err(Error::constraint(format!(
            "CHECK constraint failed: {constraint}"
        ))),
        _ => Ok(()),
    }
}

/// Normalize a free-text search filter
///
/// Returns `None` when the filter is absent or empty, meaning "list everything".
/// Whitespace is searched for like any other text.
pub fn normalize_filter(filter: Option<&str>) -> Option<&str> {
    filter.filter(|f| !f.is_empty())
}
