//! Whole-screen rendering

use super::card::ContactCard;
use crate::controller::ScreenState;

/// Render the header, search box, summary and every card as text lines
pub fn render_screen(state: &ScreenState) -> Vec<String> {
    let mut lines = vec![
        "Contact Book".to_string(),
        "Manage your connections".to_string(),
        format!("Search: {}", state.search_text),
        state.summary(),
    ];

    if let Some(hint) = state.empty_hint() {
        lines.push(hint.to_string());
    }

    for contact in &state.contacts {
        lines.push(String::new());
        lines.extend(ContactCard::new(contact).render());
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use contacts_core::{Contact, ContactDraft};

    #[test]
    fn test_empty_screen_shows_hint() {
        let lines = render_screen(&ScreenState::default());
        assert_eq!(lines[3], "No contacts yet");
        assert_eq!(lines[4], "Get started by adding your first contact");
    }

    #[test]
    fn test_screen_lists_cards_in_order() {
        let state = ScreenState {
            contacts: vec![
                Contact::from_draft(2, ContactDraft::new("Grace", "555-0102"), Utc::now()),
                Contact::from_draft(1, ContactDraft::new("Ada", "555-0100"), Utc::now()),
            ],
            search_text: "a".to_string(),
            ..ScreenState::default()
        };

        let lines = render_screen(&state);
        assert_eq!(lines[3], "2 contacts found");
        let names: Vec<&String> = lines.iter().filter(|l| l.starts_with('[')).collect();
        assert_eq!(names, vec!["[G] Grace", "[A] Ada"]);
    }
}
