//! Pure formatting for listings and search results. Everything here
//! takes snapshot data and returns reply text, so it is unit-tested
//! without a bot in sight.

use crate::store::{ClassEntry, DeadlineEntry, NoteEntry};

/// Notes shown in the "all notes" listing.
const NOTES_SHOWN: usize = 10;
/// Matches shown in a search reply.
const SEARCH_SHOWN: usize = 5;
const NOTE_PREVIEW_CHARS: usize = 50;
const SEARCH_PREVIEW_CHARS: usize = 80;

pub fn format_schedule(schedule: &[ClassEntry]) -> String {
    if schedule.is_empty() {
        return "📭 Schedule is empty\n\nAdd your first class!".to_string();
    }

    let mut response = "📅 Your schedule:\n\n".to_string();
    for (i, class) in schedule.iter().enumerate() {
        response.push_str(&format!("{}. {} {}\n", i + 1, class.day, class.time));
        response.push_str(&format!("   📚 {}\n", class.subject));
        response.push_str(&format!("   📅 Added: {}\n\n", class.added));
    }
    response
}

pub fn format_deadlines(deadlines: &[DeadlineEntry]) -> String {
    if deadlines.is_empty() {
        return "📭 No deadlines\n\nAdd your first deadline!".to_string();
    }

    let mut response = "⏰ Your deadlines:\n\n".to_string();
    for (i, deadline) in deadlines.iter().enumerate() {
        response.push_str(&format!("{}. {}\n", i + 1, deadline.name));
        response.push_str(&format!("   📅 Due: {}\n", deadline.due_date));
        response.push_str(&format!("   📝 Added: {}\n\n", deadline.created));
    }
    response
}

/// Last ten notes, newest first, with short previews and the total
/// count in the header.
pub fn format_notes(notes: &[NoteEntry]) -> String {
    if notes.is_empty() {
        return "📭 No notes\n\nAdd your first note!".to_string();
    }

    let mut response = format!("📝 Your notes (total: {})\n\n", notes.len());
    for (i, note) in notes.iter().rev().take(NOTES_SHOWN).enumerate() {
        response.push_str(&format!(
            "{}. {}\n   📅 {}\n\n",
            i + 1,
            preview(&note.text, NOTE_PREVIEW_CHARS),
            note.created
        ));
    }
    response
}

/// Case-insensitive substring search over note text, most recently
/// added first.
pub fn search_notes<'a>(notes: &'a [NoteEntry], query: &str) -> Vec<&'a NoteEntry> {
    let needle = query.to_lowercase();
    notes
        .iter()
        .rev()
        .filter(|note| note.text.to_lowercase().contains(&needle))
        .collect()
}

pub fn format_search_results(found: &[&NoteEntry]) -> String {
    if found.is_empty() {
        return "🔍 Nothing found".to_string();
    }

    let mut response = format!("🔍 Notes found: {}\n\n", found.len());
    for (i, note) in found.iter().take(SEARCH_SHOWN).enumerate() {
        response.push_str(&format!(
            "{}. {}\n   📅 {}\n\n",
            i + 1,
            preview(&note.text, SEARCH_PREVIEW_CHARS),
            note.created
        ));
    }
    if found.len() > SEARCH_SHOWN {
        response.push_str(&format!("Showing {} of {}", SEARCH_SHOWN, found.len()));
    }
    response
}

/// Char-aware truncation so multi-byte text never splits mid-character.
fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}
