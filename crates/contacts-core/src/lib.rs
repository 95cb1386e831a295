// # contacts-core
//
// Core library for the contact book.
//
// ## Architecture Overview
//
// This library provides everything below the HTTP layer:
// - **Contact / ContactDraft**: the single persisted entity and its editable fields
// - **ContactStore**: trait for persistence with uniqueness enforcement
// - **SqliteContactStore**: durable store backed by a SQLite file (sqlx)
// - **MemoryContactStore**: non-persistent store with identical semantics
// - **ContactsConfig**: server, store and client settings
//
// ## Design Principles
//
// 1. **Store owns the constraints**: uniqueness and length limits are enforced
//    where the data lives, never in handlers
// 2. **Thin layers above**: the API crate maps one request to one store call
// 3. **Library-First**: the daemon and the client are both built on this crate

pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod traits;

// Re-export core types for convenience
pub use config::{ClientConfig, ContactsConfig, ServerConfig, StoreConfig};
pub use error::{Error, Result};
pub use model::{Contact, ContactDraft, ContactId};
pub use store::{MemoryContactStore, SqliteContactStore, open_store};
pub use traits::{ContactStore, ContactStoreExt};
