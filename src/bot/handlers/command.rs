use chrono::Utc;
use teloxide::prelude::*;
use tracing::info;

use crate::bot::commands::Command;
use crate::bot::handlers::HandlerDeps;
use crate::bot::keyboards;

const HELP_TEXT: &str = "📚 StudyBuddy - a student's helper\n\n\
    Commands:\n\
    /start - get started\n\
    /menu - main menu\n\
    /today - today's schedule\n\
    /ping - check the bot is responsive\n\
    /status - bot status\n\
    /help - this message\n\n\
    Use the buttons to navigate!";

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    deps: HandlerDeps,
) -> ResponseResult<()> {
    match cmd {
        Command::Start => {
            let (user_id, first_name) = match msg.from() {
                Some(user) => (user.id.0 as i64, user.first_name.clone()),
                None => return Ok(()),
            };
            deps.store.get_or_create(user_id, &first_name);
            info!("/start from {} ({})", user_id, first_name);
            bot.send_message(
                msg.chat.id,
                format!(
                    "👋 Hi, {first_name}!\n\nI'm StudyBuddy, your study sidekick.\n\nPick an action:"
                ),
            )
            .reply_markup(keyboards::main_menu())
            .await?;
        }
        Command::Menu => {
            bot.send_message(msg.chat.id, "Main menu:")
                .reply_markup(keyboards::main_menu())
                .await?;
        }
        Command::Help => send_help(&bot, msg.chat.id).await?,
        Command::Today => {
            let user_id = match msg.from() {
                Some(user) => user.id.0 as i64,
                None => return Ok(()),
            };
            send_today(&bot, msg.chat.id, user_id, &deps).await?;
        }
        Command::Ping => {
            let latency_ms = Utc::now()
                .signed_duration_since(msg.date)
                .num_milliseconds()
                .max(0);
            bot.send_message(msg.chat.id, format!("🏓 Pong! ({latency_ms} ms)"))
                .await?;
        }
        Command::Status => {
            let uptime = Utc::now().signed_duration_since(deps.started_at);
            bot.send_message(
                msg.chat.id,
                format!(
                    "👥 {} users known\n⏱ Up for {}h {}m",
                    deps.store.user_count(),
                    uptime.num_hours(),
                    uptime.num_minutes() % 60
                ),
            )
            .await?;
        }
    }
    Ok(())
}

/// Shared by `/help` and the help button.
pub async fn send_help(bot: &Bot, chat_id: ChatId) -> ResponseResult<()> {
    bot.send_message(chat_id, HELP_TEXT)
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}

/// Shared by `/today` and the today button.
pub async fn send_today(
    bot: &Bot,
    chat_id: ChatId,
    user_id: i64,
    deps: &HandlerDeps,
) -> ResponseResult<()> {
    let Some(record) = deps.store.user(user_id) else {
        bot.send_message(chat_id, "Press /start first").await?;
        return Ok(());
    };

    let reply = if record.schedule.is_empty() {
        "📭 Your schedule is empty. Add some classes!".to_string()
    } else {
        format!("📅 You have {} classes in your schedule!", record.schedule.len())
    };
    bot.send_message(chat_id, reply).await?;
    Ok(())
}
