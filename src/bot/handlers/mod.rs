pub mod general_message;
pub mod message;

use std::sync::Arc;
use teloxide::{dispatching::UpdateHandler, prelude::*};
use crate::bot::commands::Command;
use crate::database::connection::DatabaseManager;
use crate::events::EventStore;
use crate::services::timezone::ReferenceZone;

pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type HandlerResult = Result<(), HandlerError>;

/// Shared, read-only state every command handler works from.
#[derive(Clone)]
pub struct BotState {
    pub db: DatabaseManager,
    pub store: Arc<EventStore>,
    pub zone: ReferenceZone,
    /// Operator-configured chat; always a recipient regardless of `/stop`.
    pub default_chat_id: Option<i64>,
}

pub struct BotHandler {
    pub state: BotState,
}

impl BotHandler {
    pub fn new(state: BotState) -> Self {
        Self { state }
    }

    pub fn schema(&self) -> UpdateHandler<HandlerError> {
        let state = self.state.clone();

        Update::filter_message()
            .branch(
                dptree::entry()
                    .filter_command::<Command>()
                    .endpoint(move |bot: Bot, msg: Message, cmd: Command| {
                        let state = state.clone();
                        async move { message::command_handler(bot, msg, cmd, state).await }
                    }),
            )
            .branch(dptree::endpoint(|bot: Bot, msg: Message| async move {
                general_message::handle_general_message(bot, msg).await
            }))
    }
}

/// Display name for log lines: `@username`, else first name, else "unknown".
pub fn sender_name(msg: &Message) -> String {
    match msg.from() {
        Some(user) => match &user.username {
            Some(username) => format!("@{username}"),
            None => user.first_name.clone(),
        },
        None => "unknown".to_string(),
    }
}
