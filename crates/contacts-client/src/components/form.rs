//! Create/edit form
//!
//! A controlled form over the five editable fields. The form is reseeded
//! from the edit target (or cleared) whenever it opens or the target
//! changes, and closes itself after a submit.

use crate::controller::ScreenState;
use contacts_core::{Contact, ContactDraft, ContactId, Error, Result};

/// Form inputs, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    FirstName,
    LastName,
    Phone,
    Email,
    Address,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::FirstName,
        Field::LastName,
        Field::Phone,
        Field::Email,
        Field::Address,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "First Name *",
            Field::LastName => "Last Name",
            Field::Phone => "Phone *",
            Field::Email => "Email",
            Field::Address => "Address",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::FirstName => "John",
            Field::LastName => "Doe",
            Field::Phone => "+1 (555) 000-0000",
            Field::Email => "john@example.com",
            Field::Address => "123 Main St, City, State ZIP",
        }
    }

    pub fn is_required(self) -> bool {
        matches!(self, Field::FirstName | Field::Phone)
    }
}

/// What a submitted form asks the controller to do
///
/// `id` present means update that contact, absent means create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveRequest {
    pub id: Option<ContactId>,
    pub draft: ContactDraft,
}

/// Create/edit form bindings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    open: bool,
    target: Option<ContactId>,
    first_name: String,
    last_name: String,
    phone: String,
    email: String,
    address: String,
}

impl ContactForm {
    /// A closed, blank form
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the form, seeded from `target` or blank
    pub fn open(&mut self, target: Option<&Contact>) {
        self.seed(target);
        self.open = true;
    }

    /// Follow the controller's form state
    ///
    /// Reseeds when the form opens or the edit target changes; edits in
    /// progress are kept otherwise.
    pub fn sync(&mut self, state: &ScreenState) {
        if !state.form_open {
            self.open = false;
            return;
        }

        let target = state.editing.as_ref().map(|c| c.id);
        if !self.open || target != self.target {
            self.open(state.editing.as_ref());
        }
    }

    fn seed(&mut self, target: Option<&Contact>) {
        let owned = |value: &Option<String>| value.clone().unwrap_or_default();

        *self = match target {
            Some(contact) => Self {
                open: self.open,
                target: Some(contact.id),
                first_name: contact.first_name.clone(),
                last_name: owned(&contact.last_name),
                phone: contact.phone.clone(),
                email: owned(&contact.email),
                address: owned(&contact.address),
            },
            None => Self {
                open: self.open,
                ..Self::default()
            },
        };
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_editing(&self) -> bool {
        self.target.is_some()
    }

    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::FirstName => &self.first_name,
            Field::LastName => &self.last_name,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::Address => &self.address,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::FirstName => self.first_name = value,
            Field::LastName => self.last_name = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::Address => self.address = value,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Contact"
        } else {
            "Add New Contact"
        }
    }

    pub fn description(&self) -> &'static str {
        if self.is_editing() {
            "Update the contact information below."
        } else {
            "Fill in the details to add a new contact."
        }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_editing() {
            "Update Contact"
        } else {
            "Add Contact"
        }
    }

    /// First required field left blank, if any
    pub fn missing_required(&self) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.is_required() && self.field(*field).trim().is_empty())
    }

    /// Current bindings as a draft (blank optionals become `None`)
    pub fn draft(&self) -> ContactDraft {
        let optional = |value: &str| Some(value.to_string());
        ContactDraft {
            first_name: self.first_name.clone(),
            last_name: optional(&self.last_name),
            phone: self.phone.clone(),
            email: optional(&self.email),
            address: optional(&self.address),
        }
        .normalized()
    }

    /// Hand the draft to `on_save` and close the form
    ///
    /// # Errors
    ///
    /// `Error::InvalidInput` if a required field is blank; the form stays
    /// open and `on_save` is not called.
    pub fn submit<F>(&mut self, on_save: F) -> Result<()>
    where
        F: FnOnce(SaveRequest),
    {
        if let Some(field) = self.missing_required() {
            return Err(Error::invalid_input(format!(
                "{} is required",
                field.label().trim_end_matches(" *")
            )));
        }

        on_save(SaveRequest {
            id: self.target,
            draft: self.draft(),
        });
        self.open = false;
        Ok(())
    }

    /// Close without saving
    pub fn cancel(&mut self) {
        self.open = false;
    }

    /// Plain-text rendering; empty when closed
    pub fn render(&self) -> Vec<String> {
        if !self.open {
            return Vec::new();
        }

        let mut lines = vec![self.title().to_string(), self.description().to_string()];
        for field in Field::ALL {
            let value = self.field(field);
            let shown = if value.is_empty() {
                format!("({})", field.placeholder())
            } else {
                value.to_string()
            };
            lines.push(format!("  {}: {}", field.label(), shown));
        }
        lines.push(format!("[Cancel] [{}]", self.submit_label()));
        lines
    }
}
