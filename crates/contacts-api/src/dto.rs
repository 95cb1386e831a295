//! Request and response bodies
//!
//! Request bodies are deliberately loose (every field optional) so that a
//! missing required field is reported like the database would report it,
//! as a 400 with a message, instead of a framework-level rejection.

use contacts_core::{ContactDraft, Error};
use serde::{Deserialize, Serialize};

/// Body of `POST /contacts` and `PUT /contacts/{id}`
///
/// Unknown fields such as `contact_id` or `created_at` are ignored, so a
/// client may send back a record it received.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContactPayload {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl TryFrom<ContactPayload> for ContactDraft {
    type Error = Error;

    fn try_from(payload: ContactPayload) -> Result<Self, Self::Error> {
        let first_name = payload
            .first_name
            .ok_or_else(|| Error::invalid_input("NOT NULL constraint failed: contacts.first_name"))?;
        let phone = payload
            .phone
            .ok_or_else(|| Error::invalid_input("NOT NULL constraint failed: contacts.phone"))?;

        Ok(ContactDraft {
            first_name,
            last_name: payload.last_name,
            phone,
            email: payload.email,
            address: payload.address,
        })
    }
}

/// Query string of `GET /contacts`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Free-text search filter
    pub q: Option<String>,
}

/// Body of a successful `DELETE /contacts/{id}`
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Body of every error response
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_requires_first_name_and_phone() {
        let payload: ContactPayload = serde_json::from_str(r#"{"phone":"555-0100"}"#).unwrap();
        let err = ContactDraft::try_from(payload).unwrap_err();
        assert_eq!(err.to_string(), "NOT NULL constraint failed: contacts.first_name");

        let payload: ContactPayload = serde_json::from_str(r#"{"first_name":"Ada"}"#).unwrap();
        let err = ContactDraft::try_from(payload).unwrap_err();
        assert_eq!(err.to_string(), "NOT NULL constraint failed: contacts.phone");
    }

    #[test]
    fn test_payload_ignores_server_fields() {
        let payload: ContactPayload = serde_json::from_str(
            r#"{"contact_id":3,"first_name":"Ada","phone":"555-0100","email":null,"created_at":"x"}"#,
        )
        .unwrap();
        let draft = ContactDraft::try_from(payload).unwrap();
        assert_eq!(draft, ContactDraft::new("Ada", "555-0100"));
    }
}
