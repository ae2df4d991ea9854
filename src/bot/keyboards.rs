//! Reply keyboards and the button routing table.
//!
//! Every button carries an explicit [`ButtonAction`]; keyboards are
//! rendered from the same literals [`button_action`] resolves, so
//! routing and display text cannot drift apart.

use teloxide::types::{KeyboardButton, KeyboardMarkup};

pub const BTN_SCHEDULE: &str = "📅 Schedule";
pub const BTN_DEADLINES: &str = "⏰ Deadlines";
pub const BTN_NOTES: &str = "📝 Notes";
pub const BTN_SEARCH: &str = "🔍 Search";
pub const BTN_TODAY: &str = "📋 Today";
pub const BTN_HELP: &str = "ℹ️ Help";

pub const BTN_ADD_CLASS: &str = "➕ Add class";
pub const BTN_VIEW_SCHEDULE: &str = "📋 View schedule";
pub const BTN_NEW_DEADLINE: &str = "➕ New deadline";
pub const BTN_MY_DEADLINES: &str = "📋 My deadlines";
pub const BTN_NEW_NOTE: &str = "➕ New note";
pub const BTN_ALL_NOTES: &str = "📋 All notes";

/// Cancel token. Always wins over state-specific interpretation of
/// mid-flow text.
pub const BTN_BACK: &str = "↩️ Back";

/// What pressing a menu button means, decoupled from its label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    ScheduleMenu,
    AddClass,
    ViewSchedule,
    DeadlinesMenu,
    NewDeadline,
    ViewDeadlines,
    NotesMenu,
    NewNote,
    ViewNotes,
    Search,
    Today,
    Help,
    Back,
}

/// Resolves a message's literal text to a button action. Consulted
/// only for idle users; mid-flow text goes to the active flow instead.
pub fn button_action(text: &str) -> Option<ButtonAction> {
    match text {
        BTN_SCHEDULE => Some(ButtonAction::ScheduleMenu),
        BTN_ADD_CLASS => Some(ButtonAction::AddClass),
        BTN_VIEW_SCHEDULE => Some(ButtonAction::ViewSchedule),
        BTN_DEADLINES => Some(ButtonAction::DeadlinesMenu),
        BTN_NEW_DEADLINE => Some(ButtonAction::NewDeadline),
        BTN_MY_DEADLINES => Some(ButtonAction::ViewDeadlines),
        BTN_NOTES => Some(ButtonAction::NotesMenu),
        BTN_NEW_NOTE => Some(ButtonAction::NewNote),
        BTN_ALL_NOTES => Some(ButtonAction::ViewNotes),
        BTN_SEARCH => Some(ButtonAction::Search),
        BTN_TODAY => Some(ButtonAction::Today),
        BTN_HELP => Some(ButtonAction::Help),
        BTN_BACK => Some(ButtonAction::Back),
        _ => None,
    }
}

fn markup(rows: Vec<Vec<&str>>) -> KeyboardMarkup {
    let keyboard: Vec<Vec<KeyboardButton>> = rows
        .into_iter()
        .map(|row| row.into_iter().map(KeyboardButton::new).collect())
        .collect();
    KeyboardMarkup::new(keyboard).resize_keyboard(true)
}

pub fn main_menu() -> KeyboardMarkup {
    markup(vec![
        vec![BTN_SCHEDULE, BTN_DEADLINES],
        vec![BTN_NOTES, BTN_SEARCH],
        vec![BTN_TODAY, BTN_HELP],
    ])
}

pub fn schedule_menu() -> KeyboardMarkup {
    markup(vec![
        vec![BTN_ADD_CLASS],
        vec![BTN_VIEW_SCHEDULE],
        vec![BTN_BACK],
    ])
}

pub fn deadlines_menu() -> KeyboardMarkup {
    markup(vec![
        vec![BTN_NEW_DEADLINE],
        vec![BTN_MY_DEADLINES],
        vec![BTN_BACK],
    ])
}

pub fn notes_menu() -> KeyboardMarkup {
    markup(vec![vec![BTN_NEW_NOTE], vec![BTN_ALL_NOTES], vec![BTN_BACK]])
}

pub fn back_only() -> KeyboardMarkup {
    markup(vec![vec![BTN_BACK]])
}
