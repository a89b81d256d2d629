pub mod events;
pub mod reminders;
pub mod subscription;

use teloxide::utils::command::BotCommands;

/// How many events `/next5events` lists.
pub const UPCOMING_LIST_LEN: usize = 5;

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "Event reminder bot commands:")]
pub enum Command {
    #[command(description = "Display this help message")]
    Help,
    #[command(description = "Subscribe this chat to daily reminders")]
    Start,
    #[command(description = "Unsubscribe this chat")]
    Stop,
    #[command(description = "Show the next event")]
    Next,
    #[command(description = "Show the next five events")]
    Next5Events,
    #[command(description = "Show the last daily reminder sent")]
    LastReminder,
    #[command(description = "Show next week's events")]
    Week,
}
