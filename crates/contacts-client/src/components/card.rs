//! Single contact card

use contacts_core::{Contact, ContactId};

/// Read-only view of one contact
#[derive(Debug, Clone, Copy)]
pub struct ContactCard<'a> {
    contact: &'a Contact,
}

impl<'a> ContactCard<'a> {
    pub fn new(contact: &'a Contact) -> Self {
        Self { contact }
    }

    pub fn contact(&self) -> &'a Contact {
        self.contact
    }

    /// First letter of the first name and of the last name, upper-cased
    pub fn initials(&self) -> String {
        let first = self.contact.first_name.chars().next();
        let last = self
            .contact
            .last_name
            .as_deref()
            .and_then(|name| name.chars().next());

        first
            .into_iter()
            .chain(last)
            .flat_map(char::to_uppercase)
            .collect()
    }

    /// First and last name joined by a space, trimmed
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.contact.first_name,
            self.contact.last_name.as_deref().unwrap_or_default()
        )
        .trim()
        .to_string()
    }

    pub fn phone_href(&self) -> String {
        format!("tel:{}", self.contact.phone)
    }

    pub fn email_href(&self) -> Option<String> {
        self.contact
            .email
            .as_deref()
            .map(|email| format!("mailto:{}", email))
    }

    pub fn address(&self) -> Option<&'a str> {
        self.contact.address.as_deref()
    }

    /// Plain-text rendering, one line per visible field
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec![
            format!("[{}] {}", self.initials(), self.full_name()),
            format!("  {} <{}>", self.contact.phone, self.phone_href()),
        ];
        if let (Some(email), Some(href)) = (self.contact.email.as_deref(), self.email_href()) {
            lines.push(format!("  {} <{}>", email, href));
        }
        if let Some(address) = self.address() {
            lines.push(format!("  {}", address));
        }
        lines
    }

    /// Invoke `on_edit` with the contact
    pub fn edit<F>(&self, on_edit: F)
    where
        F: FnOnce(&'a Contact),
    {
        on_edit(self.contact);
    }

    /// Invoke `on_delete` with the contact's id
    pub fn delete<F>(&self, on_delete: F)
    where
        F: FnOnce(ContactId),
    {
        on_delete(self.contact.id);
    }
}
