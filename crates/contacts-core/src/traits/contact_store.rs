// # Contact Store Trait
//
// Defines the interface for contact persistence.
//
// ## Purpose
//
// The store is the only place constraints live:
// - `phone` is unique across all contacts
// - `email` is unique when present
// - column lengths are bounded
//
// Violations fail the write with `Error::ConstraintViolation` carrying the
// store's own message.
//
// ## Implementations
//
// - SQLite: `SqliteContactStore` (durable, the default)
// - Memory: `MemoryContactStore` (tests, throwaway deployments)
//
// ## Usage
//
// ```rust,ignore
// use contacts_core::{ContactDraft, ContactStore};
//
// let store = /* ContactStore implementation */;
// let ada = store.insert(ContactDraft::new("Ada", "555-0100")).await?;
// let found = store.list(Some("ada")).await?;
// store.delete(ada.id).await?;
// ```

use async_trait::async_trait;

use crate::model::{Contact, ContactDraft, ContactId};

/// Trait for contact store implementations
///
/// # Thread Safety
///
/// All methods must be safe to call concurrently from multiple tasks.
/// Implementations rely on their backing storage for write atomicity; no
/// coordination happens above this trait.
///
/// # Missing Records
///
/// `update` and `delete` on an id that does not exist succeed without doing
/// anything. Callers that care re-fetch with [`ContactStore::get`].
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// List contacts, newest first
    ///
    /// # Parameters
    ///
    /// - `filter`: optional free text; when present (and not blank) only
    ///   contacts containing it, case-insensitively, in first name, last name,
    ///   phone, email or address are returned
    ///
    /// # Returns
    ///
    /// Contacts ordered by `created_at` descending, ties broken by id descending
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Contact>, crate::Error>;

    /// Fetch a single contact
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Contact))`: the record
    /// - `Ok(None)`: no record with this id
    /// - `Err(Error)`: storage error
    async fn get(&self, id: ContactId) -> Result<Option<Contact>, crate::Error>;

    /// Insert a new contact
    ///
    /// The store assigns `id` and `created_at`.
    ///
    /// # Returns
    ///
    /// - `Ok(Contact)`: the stored record
    /// - `Err(Error::ConstraintViolation)`: duplicate phone/email or a length check failed
    async fn insert(&self, draft: ContactDraft) -> Result<Contact, crate::Error>;

    /// Replace all editable fields of a contact
    ///
    /// # Returns
    ///
    /// - `Ok(())`: updated, or no record with this id
    /// - `Err(Error::ConstraintViolation)`: same rules as [`ContactStore::insert`]
    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<(), crate::Error>;

    /// Delete a contact
    ///
    /// # Returns
    ///
    /// - `Ok(())`: deleted (or didn't exist)
    /// - `Err(Error)`: storage error
    async fn delete(&self, id: ContactId) -> Result<(), crate::Error>;

    /// Number of stored contacts
    async fn count(&self) -> Result<usize, crate::Error>;

    /// Short backend name for logs
    fn backend_name(&self) -> &'static str;
}

/// Convenience operations built on top of [`ContactStore`]
#[async_trait]
pub trait ContactStoreExt: ContactStore {
    /// Update a contact and re-fetch it
    ///
    /// Returns `None` when the id does not exist, since the update itself is
    /// a silent no-op in that case.
    async fn update_and_get(
        &self,
        id: ContactId,
        draft: ContactDraft,
    ) -> Result<Option<Contact>, crate::Error> {
        self.update(id, draft).await?;
        self.get(id).await
    }
}

impl<T: ContactStore + ?Sized> ContactStoreExt for T {}
