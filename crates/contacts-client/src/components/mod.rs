//! Presentation components
//!
//! Components are plain values built from controller state. They hold no
//! state of their own beyond form field bindings and report user actions
//! through caller-supplied callbacks.

mod card;
mod form;
mod screen;

pub use card::ContactCard;
pub use form::{ContactForm, Field, SaveRequest};
pub use screen::render_screen;
