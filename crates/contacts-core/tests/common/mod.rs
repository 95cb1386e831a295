//! Shared fixtures for store contract tests
//!
//! Every contract is checked against each store backend, so the SQLite and
//! in-memory implementations cannot drift apart.

#![allow(dead_code)]

use contacts_core::{
    Contact, ContactDraft, ContactStore, MemoryContactStore, SqliteContactStore,
};

/// All store backends under test, labelled for assertion messages
pub async fn all_stores() -> Vec<(&'static str, Box<dyn ContactStore>)> {
    vec![
        ("memory", Box::new(MemoryContactStore::new())),
        (
            "sqlite",
            Box::new(
                SqliteContactStore::in_memory()
                    .await
                    .expect("in-memory sqlite opens"),
            ),
        ),
    ]
}

pub fn ada() -> ContactDraft {
    ContactDraft::new("Ada", "555-0100")
        .with_last_name("Lovelace")
        .with_email("ada@example.com")
        .with_address("12 St James's Square, London")
}

pub fn charles() -> ContactDraft {
    ContactDraft::new("Charles", "555-0101")
        .with_last_name("Babbage")
        .with_address("1 Dorset Street, Marylebone")
}

pub fn grace() -> ContactDraft {
    ContactDraft::new("Grace", "555-0102")
        .with_last_name("Hopper")
        .with_email("grace@navy.example")
        .with_address("Arlington, Virginia")
}

/// Insert Ada, Charles, Grace in that order
pub async fn seed(store: &dyn ContactStore) -> Vec<Contact> {
    let mut inserted = Vec::new();
    for draft in [ada(), charles(), grace()] {
        inserted.push(store.insert(draft).await.expect("seed insert succeeds"));
    }
    inserted
}

/// First names of a list, in order
pub fn first_names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.first_name.as_str()).collect()
}
