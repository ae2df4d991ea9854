use serde::{Deserialize, Serialize};

use crate::utils::datetime::now_stamp;

/// Everything the bot knows about one user. Collections are append-only
/// and keep insertion order, which doubles as display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Display name captured at first contact, never updated afterwards.
    pub name: String,
    #[serde(default)]
    pub schedule: Vec<ClassEntry>,
    #[serde(default)]
    pub deadlines: Vec<DeadlineEntry>,
    #[serde(default)]
    pub notes: Vec<NoteEntry>,
}

impl UserRecord {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }
}

/// One class in the weekly schedule. All fields are free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassEntry {
    pub day: String,
    pub time: String,
    pub subject: String,
    /// Creation stamp in `%d.%m.%Y %H:%M` format, immutable.
    pub added: String,
}

impl ClassEntry {
    pub fn new(day: &str, time: &str, subject: &str) -> Self {
        Self {
            day: day.to_string(),
            time: time.to_string(),
            subject: subject.to_string(),
            added: now_stamp(),
        }
    }
}

/// An assignment deadline. The due date is stored exactly as typed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineEntry {
    pub name: String,
    pub due_date: String,
    pub created: String,
    /// Always false at creation; kept for file compatibility, no
    /// handler flips it.
    #[serde(default)]
    pub completed: bool,
}

impl DeadlineEntry {
    pub fn new(name: &str, due_date: &str) -> Self {
        Self {
            name: name.to_string(),
            due_date: due_date.to_string(),
            created: now_stamp(),
            completed: false,
        }
    }
}

/// A free-text note, either from the explicit note flow or captured
/// from unrecognized idle text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    pub text: String,
    pub created: String,
    /// True when the note came through the fallback handler rather
    /// than the explicit "new note" flow.
    #[serde(default)]
    pub quick_save: bool,
}

impl NoteEntry {
    pub fn new(text: &str, quick_save: bool) -> Self {
        Self {
            text: text.to_string(),
            created: now_stamp(),
            quick_save,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_collections_default_to_empty() {
        let record: UserRecord = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
        assert_eq!(record.name, "Alice");
        assert!(record.schedule.is_empty());
        assert!(record.deadlines.is_empty());
        assert!(record.notes.is_empty());
    }

    #[test]
    fn deadline_starts_incomplete() {
        let deadline = DeadlineEntry::new("essay", "01.09.2026");
        assert!(!deadline.completed);
    }

    #[test]
    fn quick_save_defaults_to_false_on_load() {
        let note: NoteEntry =
            serde_json::from_str(r#"{"text": "buy milk", "created": "01.01.2026 10:00"}"#).unwrap();
        assert!(!note.quick_save);
    }
}
