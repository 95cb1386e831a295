//! Core traits for the contact book
//!
//! - [`ContactStore`]: persistence of contact records with uniqueness enforcement

pub mod contact_store;

pub use contact_store::{ContactStore, ContactStoreExt};
