// # contacts-client
//
// Client side of the contact book.
//
// ## Architecture
//
// ```text
// ┌────────────────────┐     read-only      ┌──────────────────────┐
// │    ContactBook     │ ── ScreenState ──▶ │ ContactCard / Form   │
// │ (screen controller)│ ◀── callbacks ──── │ (components)         │
// └────────────────────┘                    └──────────────────────┘
//           │
//           ▼
// ┌────────────────────┐        HTTP        ┌──────────────────────┐
// │    ContactsApi     │ ─────────────────▶ │ contactsd (REST API) │
// └────────────────────┘                    └──────────────────────┘
// ```
//
// - **ContactsApi**: one HTTP call per operation, no retries
// - **Debouncer**: single outstanding timer for search input
// - **ContactBook**: owns all screen state, emits user-facing notices
// - **components**: pure rendering of cards and the create/edit form

pub mod api;
pub mod components;
pub mod controller;
pub mod debounce;

pub use api::{ContactsApi, HttpContactsApi};
pub use components::{ContactCard, ContactForm, Field, SaveRequest, render_screen};
pub use controller::{ContactBook, Notice, NoticeLevel, ScreenState};
pub use debounce::Debouncer;
