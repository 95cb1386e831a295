// # Memory Contact Store
//
// In-memory implementation of ContactStore.
//
// ## Purpose
//
// Same semantics as the SQLite store without any persistence. Useful for
// tests, demos and throwaway deployments.
//
// ## Crash Behavior
//
// - All contacts are lost on restart
// - Ids restart at 1

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::Error;
use crate::model::{Contact, ContactDraft, ContactId, normalize_filter};
use crate::traits::contact_store::ContactStore;

/// In-memory contact store
///
/// Records live in a vector behind a RwLock; the write lock is held for the
/// whole check-then-write sequence, so uniqueness holds under concurrent
/// writers.
///
/// # Example
///
/// ```rust,no_run
/// use contacts_core::{ContactDraft, ContactStore, MemoryContactStore};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let store = MemoryContactStore::new();
///     let ada = store.insert(ContactDraft::new("Ada", "555-0100")).await?;
///     assert_eq!(store.get(ada.id).await?, Some(ada));
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryContactStore {
    inner: Arc<RwLock<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    contacts: Vec<Contact>,
    last_id: ContactId,
}

impl MemoryState {
    /// Uniqueness checks, skipping the record being updated
    fn check_unique(&self, draft: &ContactDraft, skip: Option<ContactId>) -> Result<(), Error> {
        let others = self
            .contacts
            .iter()
            .filter(|c| Some(c.id) != skip);

        for other in others {
            if other.phone == draft.phone {
                return Err(Error::constraint("UNIQUE constraint failed: contacts.phone"));
            }
            if draft.email.is_some() && other.email == draft.email {
                return Err(Error::constraint("UNIQUE constraint failed: contacts.email"));
            }
        }
        Ok(())
    }
}

impl MemoryContactStore {
    /// Create a new empty memory store
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every contact (ids keep counting up)
    pub async fn clear(&self) {
        self.inner.write().await.contacts.clear();
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn list(&self, filter: Option<&str>) -> Result<Vec<Contact>, Error> {
        let guard = self.inner.read().await;
        let needle = normalize_filter(filter).map(str::to_lowercase);

        let mut contacts: Vec<Contact> = guard
            .contacts
            .iter()
            .filter(|c| needle.as_deref().is_none_or(|n| c.matches(n)))
            .cloned()
            .collect();

        contacts.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(contacts)
    }

    async fn get(&self, id: ContactId) -> Result<Option<Contact>, Error> {
        let guard = self.inner.read().await;
        Ok(guard.contacts.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, draft: ContactDraft) -> Result<Contact, Error> {
        let draft = draft.normalized();
        draft.check_constraints()?;

        let mut guard = self.inner.write().await;
        guard.check_unique(&draft, None)?;

        guard.last_id += 1;
        let contact = Contact::from_draft(guard.last_id, draft, chrono::Utc::now());
        guard.contacts.push(contact.clone());

        tracing::debug!("Inserted contact {} into memory store", contact.id);
        Ok(contact)
    }

    async fn update(&self, id: ContactId, draft: ContactDraft) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        if !guard.contacts.iter().any(|c| c.id == id) {
            tracing::debug!("Update of missing contact {} is a no-op", id);
            return Ok(());
        }

        let draft = draft.normalized();
        draft.check_constraints()?;
        guard.check_unique(&draft, Some(id))?;

        if let Some(contact) = guard.contacts.iter_mut().find(|c| c.id == id) {
            contact.apply(draft);
        }
        Ok(())
    }

    async fn delete(&self, id: ContactId) -> Result<(), Error> {
        let mut guard = self.inner.write().await;
        guard.contacts.retain(|c| c.id != id);
        Ok(())
    }

    async fn count(&self) -> Result<usize, Error> {
        Ok(self.inner.read().await.contacts.len())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
