use teloxide::utils::command::BotCommands;

/// The slash-command surface. Commands always win over conversation
/// state and button routing.
#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase", description = "StudyBuddy commands:")]
pub enum Command {
    #[command(description = "Register and show the main menu")]
    Start,
    #[command(description = "Show the main menu")]
    Menu,
    #[command(description = "Display help")]
    Help,
    #[command(description = "How many classes are in your schedule")]
    Today,
    #[command(description = "Check that the bot is responsive")]
    Ping,
    #[command(description = "User count and uptime")]
    Status,
}
