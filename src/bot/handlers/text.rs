//! Non-command text routing: active flow first, then the idle button
//! table, then the quick-note fallback.

use teloxide::prelude::*;
use tracing::{debug, info};

use crate::bot::fsm::{self, CancelTarget, FlowOutcome, FlowState, Step};
use crate::bot::handlers::{command, HandlerDeps};
use crate::bot::keyboards::{self, ButtonAction};
use crate::bot::render;
use crate::store::{ClassEntry, DeadlineEntry, Entry, NoteEntry};

/// Quick notes longer than this are saved silently, to avoid echoing
/// large pasted text back at the user.
pub const QUICK_NOTE_ACK_LIMIT: usize = 100;

/// Outcome of the idle free-text fallback.
#[derive(Debug, PartialEq, Eq)]
pub enum QuickNote {
    /// Appended; `acknowledge` says whether to confirm in chat.
    Saved { total: usize, acknowledge: bool },
    /// Command-prefixed, empty, or unknown sender: dropped silently.
    Ignored,
}

pub async fn text_handler(bot: Bot, msg: Message, deps: HandlerDeps) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(user) = msg.from() else {
        return Ok(());
    };
    let user_id = user.id.0 as i64;
    let first_name = user.first_name.clone();

    // Active flow captures the text before any button matching, so a
    // prompt answer that collides with a button label stays flow input.
    if let Some(state) = deps.conversations.take(user_id) {
        return flow_step(&bot, msg.chat.id, user_id, &first_name, state, text, &deps).await;
    }

    if let Some(action) = keyboards::button_action(text) {
        return button_handler(&bot, msg.chat.id, user_id, action, &deps).await;
    }

    match capture_quick_note(&deps, user_id, text) {
        QuickNote::Saved {
            total,
            acknowledge: true,
        } => {
            bot.send_message(
                msg.chat.id,
                format!("💾 Saved as a note!\n\nTotal notes: {total}"),
            )
            .await?;
        }
        QuickNote::Saved { .. } => {}
        QuickNote::Ignored => debug!("Ignored unroutable text from {}", user_id),
    }
    Ok(())
}

/// The idle fallback. Kept free of bot I/O so the capture rules are
/// directly testable.
pub fn capture_quick_note(deps: &HandlerDeps, user_id: i64, text: &str) -> QuickNote {
    if text.is_empty() || text.starts_with('/') {
        return QuickNote::Ignored;
    }
    // Only users who have done /start get implicit captures.
    if !deps.store.contains(user_id) {
        return QuickNote::Ignored;
    }

    let total = deps.store.append(user_id, Entry::Note(NoteEntry::new(text, true)));
    QuickNote::Saved {
        total,
        acknowledge: text.chars().count() < QUICK_NOTE_ACK_LIMIT,
    }
}

async fn flow_step(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    first_name: &str,
    state: FlowState,
    text: &str,
    deps: &HandlerDeps,
) -> ResponseResult<()> {
    match fsm::advance(state, text) {
        Step::Next { state, prompt } => {
            deps.conversations.begin(user_id, state);
            bot.send_message(chat_id, prompt).await?;
        }
        Step::Cancelled(target) => {
            // State was already taken; just show the parent menu.
            match target {
                CancelTarget::ScheduleMenu => send_schedule_menu(bot, chat_id).await?,
                CancelTarget::DeadlinesMenu => send_deadlines_menu(bot, chat_id).await?,
                CancelTarget::NotesMenu => send_notes_menu(bot, chat_id).await?,
                CancelTarget::MainMenu => {
                    bot.send_message(chat_id, "Main menu:")
                        .reply_markup(keyboards::main_menu())
                        .await?;
                }
            }
        }
        Step::Done(outcome) => {
            finish_flow(bot, chat_id, user_id, first_name, outcome, deps).await?;
        }
    }
    Ok(())
}

async fn finish_flow(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    first_name: &str,
    outcome: FlowOutcome,
    deps: &HandlerDeps,
) -> ResponseResult<()> {
    match outcome {
        FlowOutcome::Class { day, time, subject } => {
            deps.store.get_or_create(user_id, first_name);
            deps.store
                .append(user_id, Entry::Class(ClassEntry::new(&day, &time, &subject)));
            info!("Class added for {}: {} {} {}", user_id, day, time, subject);
            bot.send_message(
                chat_id,
                format!("✅ Class added!\n\n{day} {time} - {subject}"),
            )
            .reply_markup(keyboards::main_menu())
            .await?;
        }
        FlowOutcome::Deadline { name, due } => {
            deps.store.get_or_create(user_id, first_name);
            deps.store
                .append(user_id, Entry::Deadline(DeadlineEntry::new(&name, &due)));
            info!("Deadline added for {}: {} due {}", user_id, name, due);
            bot.send_message(chat_id, format!("✅ Deadline added!\n\n{name} - {due}"))
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        FlowOutcome::Note { text } => {
            deps.store.get_or_create(user_id, first_name);
            let total = deps
                .store
                .append(user_id, Entry::Note(NoteEntry::new(&text, false)));
            bot.send_message(chat_id, format!("✅ Note saved!\n\nTotal notes: {total}"))
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        FlowOutcome::Search { query } => {
            let notes = deps.store.user(user_id).map(|u| u.notes).unwrap_or_default();
            let found = render::search_notes(&notes, &query);
            bot.send_message(chat_id, render::format_search_results(&found))
                .reply_markup(keyboards::main_menu())
                .await?;
        }
    }
    Ok(())
}

async fn button_handler(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    action: ButtonAction,
    deps: &HandlerDeps,
) -> ResponseResult<()> {
    match action {
        ButtonAction::ScheduleMenu => send_schedule_menu(bot, chat_id).await?,
        ButtonAction::DeadlinesMenu => send_deadlines_menu(bot, chat_id).await?,
        ButtonAction::NotesMenu => send_notes_menu(bot, chat_id).await?,
        ButtonAction::AddClass => {
            start_flow(bot, chat_id, user_id, FlowState::ScheduleDay, deps).await?;
        }
        ButtonAction::NewDeadline => {
            start_flow(bot, chat_id, user_id, FlowState::DeadlineName, deps).await?;
        }
        ButtonAction::NewNote => {
            start_flow(bot, chat_id, user_id, FlowState::NoteText, deps).await?;
        }
        ButtonAction::Search => {
            start_flow(bot, chat_id, user_id, FlowState::SearchQuery, deps).await?;
        }
        ButtonAction::ViewSchedule => {
            let Some(record) = deps.store.user(user_id) else {
                bot.send_message(chat_id, "Press /start first").await?;
                return Ok(());
            };
            bot.send_message(chat_id, render::format_schedule(&record.schedule))
                .await?;
        }
        ButtonAction::ViewDeadlines => {
            let Some(record) = deps.store.user(user_id) else {
                bot.send_message(chat_id, "Press /start first").await?;
                return Ok(());
            };
            bot.send_message(chat_id, render::format_deadlines(&record.deadlines))
                .await?;
        }
        ButtonAction::ViewNotes => {
            let Some(record) = deps.store.user(user_id) else {
                bot.send_message(chat_id, "Press /start first").await?;
                return Ok(());
            };
            bot.send_message(chat_id, render::format_notes(&record.notes))
                .await?;
        }
        ButtonAction::Today => command::send_today(bot, chat_id, user_id, deps).await?,
        ButtonAction::Help => command::send_help(bot, chat_id).await?,
        ButtonAction::Back => {
            bot.send_message(chat_id, "🏠 Main menu")
                .reply_markup(keyboards::main_menu())
                .await?;
        }
    }
    Ok(())
}

async fn start_flow(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    state: FlowState,
    deps: &HandlerDeps,
) -> ResponseResult<()> {
    let prompt = state.prompt();
    deps.conversations.begin(user_id, state);
    bot.send_message(chat_id, prompt)
        .reply_markup(keyboards::back_only())
        .await?;
    Ok(())
}

async fn send_schedule_menu(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, "📅 Schedule\n\nPick an action:")
        .reply_markup(keyboards::schedule_menu())
        .await?;
    Ok(())
}

async fn send_deadlines_menu(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, "⏰ Deadlines\n\nPick an action:")
        .reply_markup(keyboards::deadlines_menu())
        .await?;
    Ok(())
}

async fn send_notes_menu(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, "📝 Notes\n\nPick an action:")
        .reply_markup(keyboards::notes_menu())
        .await?;
    Ok(())
}
