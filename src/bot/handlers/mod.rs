//! Dispatcher schema for the bot.
//!
//! Routing priority per inbound message: slash commands first, then
//! the sender's active conversation flow, then the idle button table,
//! then the quick-note fallback. The last three live in the text
//! handler; commands get their own dptree branch so they win even
//! mid-flow.

pub mod command;
pub mod text;

use chrono::{DateTime, Utc};
use teloxide::dispatching::{UpdateFilterExt, UpdateHandler};
use teloxide::prelude::*;

use crate::bot::commands::Command;
use crate::bot::fsm::ConversationTracker;
use crate::store::RecordStore;

/// Shared handler dependencies, cloned into each dptree endpoint.
#[derive(Clone)]
pub struct HandlerDeps {
    pub store: RecordStore,
    pub conversations: ConversationTracker,
    pub started_at: DateTime<Utc>,
}

pub struct BotHandler {
    deps: HandlerDeps,
}

impl BotHandler {
    pub fn new(store: RecordStore) -> Self {
        Self {
            deps: HandlerDeps {
                store,
                conversations: ConversationTracker::default(),
                started_at: Utc::now(),
            },
        }
    }

    pub fn schema(&self) -> UpdateHandler<Box<dyn std::error::Error + Send + Sync + 'static>> {
        let deps_cmd = self.deps.clone();
        let deps_text = self.deps.clone();

        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let deps = deps_cmd.clone();
                        async move {
                            command::command_handler(bot, msg, cmd, deps)
                                .await
                                .map_err(Into::into)
                        }
                    }),
            )
            .branch(dptree::endpoint(move |bot: Bot, msg: Message| {
                let deps = deps_text.clone();
                async move { text::text_handler(bot, msg, deps).await.map_err(Into::into) }
            }))
    }
}
