use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use crate::bot::commands::{events, reminders, subscription, Command};
use crate::bot::handlers::{BotState, HandlerResult};

pub async fn command_handler(
    bot: Bot,
    msg: Message,
    cmd: Command,
    state: BotState,
) -> HandlerResult {
    match cmd {
        Command::Help => {
            bot.send_message(msg.chat.id, Command::descriptions().to_string()).await?;
        }
        Command::Start => subscription::handle_start(bot, msg, &state).await?,
        Command::Stop => subscription::handle_stop(bot, msg, &state).await?,
        Command::Next => events::handle_next(bot, msg, &state).await?,
        Command::Next5Events => events::handle_next_events(bot, msg, &state).await?,
        Command::LastReminder => reminders::handle_last_reminder(bot, msg, &state).await?,
        Command::Week => events::handle_week(bot, msg, &state).await?,
    }
    Ok(())
}
