//! Per-user conversation state machine.
//!
//! Each multi-step input flow is a chain of [`FlowState`]s; values
//! collected so far ride inside the enum variants, so dropping the
//! state is all it takes to discard partial input. [`advance`] is a
//! pure function over (state, text) and carries no I/O, which keeps
//! the whole transition table unit-testable.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::bot::keyboards::BTN_BACK;

pub const PROMPT_SCHEDULE_DAY: &str = "Enter the day of the week:";
pub const PROMPT_SCHEDULE_TIME: &str = "Enter the time (e.g. 10:30):";
pub const PROMPT_SCHEDULE_SUBJECT: &str = "Enter the subject name:";
pub const PROMPT_DEADLINE_NAME: &str = "Enter the assignment name:";
pub const PROMPT_DEADLINE_DATE: &str = "Enter the due date (DD.MM.YYYY):";
pub const PROMPT_NOTE_TEXT: &str = "Write your note:";
pub const PROMPT_SEARCH_QUERY: &str = "🔍 Search your notes\n\nEnter text to search for:";

/// Which step of which flow a user is on. Idle users simply have no
/// state in the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowState {
    ScheduleDay,
    ScheduleTime { day: String },
    ScheduleSubject { day: String, time: String },
    DeadlineName,
    DeadlineDate { name: String },
    NoteText,
    SearchQuery,
}

impl FlowState {
    /// Prompt to show when entering this state.
    pub fn prompt(&self) -> &'static str {
        match self {
            FlowState::ScheduleDay => PROMPT_SCHEDULE_DAY,
            FlowState::ScheduleTime { .. } => PROMPT_SCHEDULE_TIME,
            FlowState::ScheduleSubject { .. } => PROMPT_SCHEDULE_SUBJECT,
            FlowState::DeadlineName => PROMPT_DEADLINE_NAME,
            FlowState::DeadlineDate { .. } => PROMPT_DEADLINE_DATE,
            FlowState::NoteText => PROMPT_NOTE_TEXT,
            FlowState::SearchQuery => PROMPT_SEARCH_QUERY,
        }
    }

    /// Menu one level up from this flow, shown on cancellation.
    fn cancel_target(&self) -> CancelTarget {
        match self {
            FlowState::ScheduleDay
            | FlowState::ScheduleTime { .. }
            | FlowState::ScheduleSubject { .. } => CancelTarget::ScheduleMenu,
            FlowState::DeadlineName | FlowState::DeadlineDate { .. } => {
                CancelTarget::DeadlinesMenu
            }
            FlowState::NoteText => CancelTarget::NotesMenu,
            FlowState::SearchQuery => CancelTarget::MainMenu,
        }
    }
}

/// A completed flow, ready for its single store mutation (or, for
/// search, its read).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlowOutcome {
    Class { day: String, time: String, subject: String },
    Deadline { name: String, due: String },
    Note { text: String },
    Search { query: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelTarget {
    ScheduleMenu,
    DeadlinesMenu,
    NotesMenu,
    MainMenu,
}

/// Result of feeding one message into an active flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Flow continues; show the prompt and park the new state.
    Next { state: FlowState, prompt: &'static str },
    /// Flow finished; the user is idle again.
    Done(FlowOutcome),
    /// Cancel token received; partial input is discarded.
    Cancelled(CancelTarget),
}

/// Applies one inbound text to a flow state. The cancel token wins
/// unconditionally, whatever the state would otherwise make of the
/// text.
pub fn advance(state: FlowState, text: &str) -> Step {
    if text == BTN_BACK {
        return Step::Cancelled(state.cancel_target());
    }

    match state {
        FlowState::ScheduleDay => {
            let state = FlowState::ScheduleTime {
                day: text.to_string(),
            };
            let prompt = state.prompt();
            Step::Next { state, prompt }
        }
        FlowState::ScheduleTime { day } => {
            let state = FlowState::ScheduleSubject {
                day,
                time: text.to_string(),
            };
            let prompt = state.prompt();
            Step::Next { state, prompt }
        }
        FlowState::ScheduleSubject { day, time } => Step::Done(FlowOutcome::Class {
            day,
            time,
            subject: text.to_string(),
        }),
        FlowState::DeadlineName => {
            let state = FlowState::DeadlineDate {
                name: text.to_string(),
            };
            let prompt = state.prompt();
            Step::Next { state, prompt }
        }
        FlowState::DeadlineDate { name } => Step::Done(FlowOutcome::Deadline {
            name,
            due: text.to_string(),
        }),
        FlowState::NoteText => Step::Done(FlowOutcome::Note {
            text: text.to_string(),
        }),
        FlowState::SearchQuery => Step::Done(FlowOutcome::Search {
            query: text.to_string(),
        }),
    }
}

/// Owns every user's transient conversation state. Never persisted;
/// a restart drops all in-progress flows.
#[derive(Clone, Default)]
pub struct ConversationTracker {
    inner: Arc<Mutex<HashMap<i64, FlowState>>>,
}

impl ConversationTracker {
    /// Puts a user into the given flow state, replacing any previous
    /// one.
    pub fn begin(&self, user_id: i64, state: FlowState) {
        self.lock().insert(user_id, state);
    }

    /// Removes and returns the user's state; `None` means idle.
    pub fn take(&self, user_id: i64) -> Option<FlowState> {
        self.lock().remove(&user_id)
    }

    pub fn get(&self, user_id: i64) -> Option<FlowState> {
        self.lock().get(&user_id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<i64, FlowState>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_day_advances_and_keeps_the_day() {
        let step = advance(FlowState::ScheduleDay, "Monday");
        match step {
            Step::Next { state, prompt } => {
                assert_eq!(
                    state,
                    FlowState::ScheduleTime {
                        day: "Monday".to_string()
                    }
                );
                assert_eq!(prompt, PROMPT_SCHEDULE_TIME);
            }
            other => panic!("unexpected step: {other:?}"),
        }
    }

    #[test]
    fn cancel_beats_state_interpretation() {
        let step = advance(
            FlowState::ScheduleTime {
                day: "Monday".to_string(),
            },
            BTN_BACK,
        );
        assert_eq!(step, Step::Cancelled(CancelTarget::ScheduleMenu));
    }

    #[test]
    fn search_cancel_returns_to_main_menu() {
        let step = advance(FlowState::SearchQuery, BTN_BACK);
        assert_eq!(step, Step::Cancelled(CancelTarget::MainMenu));
    }

    #[test]
    fn full_schedule_flow_assembles_the_entry() {
        let step = advance(FlowState::ScheduleDay, "Monday");
        let Step::Next { state, .. } = step else {
            panic!("expected next");
        };
        let step = advance(state, "10:30");
        let Step::Next { state, .. } = step else {
            panic!("expected next");
        };
        let step = advance(state, "Calculus");
        assert_eq!(
            step,
            Step::Done(FlowOutcome::Class {
                day: "Monday".to_string(),
                time: "10:30".to_string(),
                subject: "Calculus".to_string(),
            })
        );
    }

    #[test]
    fn tracker_take_leaves_user_idle() {
        let tracker = ConversationTracker::default();
        tracker.begin(7, FlowState::NoteText);
        assert_eq!(tracker.take(7), Some(FlowState::NoteText));
        assert_eq!(tracker.take(7), None);
    }
}
