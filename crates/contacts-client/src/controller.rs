//! Screen controller for the contact book
//!
//! [`ContactBook`] owns every piece of screen state: the contact list, the
//! search text, the edit target and whether the form is open. Components
//! never mutate it directly; they read a [`ScreenState`] snapshot and call
//! back into the controller.
//!
//! ## Flow
//!
//! 1. `load()` fetches the unfiltered list
//! 2. `set_search_text()` updates the text immediately and schedules a
//!    debounced refetch; only the last change in a burst fetches
//! 3. `save()` / `delete()` send one request each; success emits a notice
//!    and refetches with the current search text, failure emits the server
//!    message and leaves the list alone
//!
//! Fetches are not sequenced against each other: a slow response can land
//! after a newer one and overwrite the list.

use crate::api::{ContactsApi, HttpContactsApi};
use crate::components::SaveRequest;
use crate::debounce::Debouncer;
use contacts_core::config::ClientConfig;
use contacts_core::{Contact, ContactId, Error, Result};
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, warn};

/// Severity of a user-facing notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A user-facing notification (toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Create a success notice
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    /// Create an error notice
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Read-only view of the screen
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenState {
    /// Contacts as last fetched, newest first
    pub contacts: Vec<Contact>,

    /// Text in the search box
    pub search_text: String,

    /// Contact being edited, `None` when creating
    pub editing: Option<Contact>,

    /// Whether the create/edit form is showing
    pub form_open: bool,
}

impl ScreenState {
    /// Whether a search is active; any non-empty text counts, spaces included
    pub fn is_searching(&self) -> bool {
        !self.search_text.is_empty()
    }

    /// Line shown above the list
    pub fn summary(&self) -> String {
        match (self.contacts.len(), self.is_searching()) {
            (0, false) => "No contacts yet".to_string(),
            (0, true) => "No contacts found".to_string(),
            (1, searching) => format!("1 contact{}", found_suffix(searching)),
            (n, searching) => format!("{} contacts{}", n, found_suffix(searching)),
        }
    }

    /// Hint shown under the summary when the list is empty
    pub fn empty_hint(&self) -> Option<&'static str> {
        if !self.contacts.is_empty() {
            return None;
        }
        Some(if self.is_searching() {
            "Try adjusting your search terms"
        } else {
            "Get started by adding your first contact"
        })
    }
}

fn found_suffix(searching: bool) -> &'static str {
    if searching { " found" } else { "" }
}

/// State shared with debounced fetch tasks
struct Shared {
    api: Arc<dyn ContactsApi>,
    state: RwLock<ScreenState>,
    notices: mpsc::Sender<Notice>,
}

impl Shared {
    fn read<T>(&self, f: impl FnOnce(&ScreenState) -> T) -> T {
        f(&self.state.read().unwrap_or_else(PoisonError::into_inner))
    }

    fn write<T>(&self, f: impl FnOnce(&mut ScreenState) -> T) -> T {
        f(&mut self.state.write().unwrap_or_else(PoisonError::into_inner))
    }

    fn emit(&self, notice: Notice) {
        if self.notices.try_send(notice).is_err() {
            warn!("Notice channel full or closed, dropping notice");
        }
    }

    /// Fetch the list for `query` and replace the screen's contacts
    async fn fetch(&self, query: &str) -> Result<()> {
        debug!("Fetching contacts (q={:?})", query);
        match self.api.list(query).await {
            Ok(contacts) => {
                self.write(|state| state.contacts = contacts);
                Ok(())
            }
            Err(e) => {
                warn!("Failed to fetch contacts: {}", e);
                self.emit(Notice::error("Failed to fetch contacts"));
                Err(e)
            }
        }
    }

    async fn refresh(&self) -> Result<()> {
        let query = self.read(|state| state.search_text.clone());
        self.fetch(&query).await
    }
}

/// Server message for API failures, `fallback` for anything else
fn failure_message(err: &Error, fallback: &str) -> String {
    match err {
        Error::Api { message, .. } => message.clone(),
        _ => fallback.to_string(),
    }
}

/// Screen controller
///
/// # Usage
///
/// ```rust,ignore
/// let (book, mut notices) = ContactBook::connect(&ClientConfig::default())?;
/// book.load().await;
/// book.set_search_text("ada");
/// while let Some(notice) = notices.next().await { /* show toast */ }
/// ```
pub struct ContactBook {
    shared: Arc<Shared>,
    search: Debouncer,
}

impl ContactBook {
    /// Create a controller over an API implementation
    ///
    /// # Returns
    ///
    /// A tuple of (controller, notices) where notices yields user-facing
    /// notifications in emission order
    pub fn new(api: Arc<dyn ContactsApi>, config: &ClientConfig) -> (Self, ReceiverStream<Notice>) {
        let (tx, rx) = mpsc::channel(config.notice_channel_capacity.max(1));

        let book = Self {
            shared: Arc::new(Shared {
                api,
                state: RwLock::new(ScreenState::default()),
                notices: tx,
            }),
            search: Debouncer::new(config.search_debounce()),
        };

        (book, ReceiverStream::new(rx))
    }

    /// Create a controller talking HTTP to `config.api_base_url`
    pub fn connect(config: &ClientConfig) -> Result<(Self, ReceiverStream<Notice>)> {
        let api = HttpContactsApi::new(config)?;
        Ok(Self::new(Arc::new(api), config))
    }

    /// Copy of the current screen state
    pub fn snapshot(&self) -> ScreenState {
        self.shared.read(ScreenState::clone)
    }

    /// Initial fetch
    pub async fn load(&self) -> bool {
        self.refresh().await
    }

    /// Refetch with the current search text
    ///
    /// Returns `false` (after emitting an error notice) if the fetch failed.
    pub async fn refresh(&self) -> bool {
        self.shared.refresh().await.is_ok()
    }

    /// Update the search text and schedule a debounced refetch
    ///
    /// Must be called from within a tokio runtime.
    pub fn set_search_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.shared.write(|state| state.search_text = text.clone());

        let shared = self.shared.clone();
        self.search.schedule(async move {
            // Failures are already reported as a notice
            let _ = shared.fetch(&text).await;
        });
    }

    /// Whether a debounced search is still waiting to fire
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Open the form blank for a new contact
    pub fn open_create(&self) {
        self.shared.write(|state| {
            state.editing = None;
            state.form_open = true;
        });
    }

    /// Open the form pre-populated from `contact`
    pub fn open_edit(&self, contact: Contact) {
        self.shared.write(|state| {
            state.editing = Some(contact);
            state.form_open = true;
        });
    }

    /// Close the form and drop the edit target
    pub fn close_form(&self) {
        self.shared.write(|state| {
            state.editing = None;
            state.form_open = false;
        });
    }

    /// Submit a form: update when the request carries an id, create otherwise
    ///
    /// Returns `true` if the server accepted the write.
    pub async fn save(&self, request: SaveRequest) -> bool {
        let result = match request.id {
            Some(id) => self
                .shared
                .api
                .update(id, &request.draft)
                .await
                .map(|_| "Contact updated successfully!")
                .map_err(|e| failure_message(&e, "Failed to update contact")),
            None => self
                .shared
                .api
                .create(&request.draft)
                .await
                .map(|_| "Contact added successfully!")
                .map_err(|e| failure_message(&e, "Failed to add contact")),
        };

        self.close_form();

        match result {
            Ok(message) => {
                self.shared.emit(Notice::success(message));
                let _ = self.shared.refresh().await;
                true
            }
            Err(message) => {
                warn!("Save rejected: {}", message);
                self.shared.emit(Notice::error(message));
                false
            }
        }
    }

    /// Delete a contact
    ///
    /// Returns `true` if the server accepted the delete.
    pub async fn delete(&self, id: ContactId) -> bool {
        match self.shared.api.delete(id).await {
            Ok(()) => {
                self.shared.emit(Notice::success("Contact deleted successfully!"));
                let _ = self.shared.refresh().await;
                true
            }
            Err(e) => {
                warn!("Delete of contact {} failed: {}", id, e);
                self.shared
                    .emit(Notice::error(failure_message(&e, "Failed to delete contact")));
                false
            }
        }
    }
}
