use teloxide::prelude::*;
use crate::bot::handlers::HandlerResult;

/// Anything that is not a known command. Only slash-prefixed text gets a
/// reply, so ordinary group chatter is ignored.
pub async fn handle_general_message(bot: Bot, msg: Message) -> HandlerResult {
    if let Some(reply) = msg.text().and_then(unknown_command_reply) {
        bot.send_message(msg.chat.id, reply).await?;
    }
    Ok(())
}

pub fn unknown_command_reply(text: &str) -> Option<String> {
    let command = text.split_whitespace().next()?;
    if !command.starts_with('/') {
        return None;
    }
    Some(format!(
        "❓ Unknown command: {command}\n\nTry /next, /next5events or /lastreminder, or use /help to see all commands."
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_command_reply() {
        let reply = unknown_command_reply("/nextevent please").unwrap();
        assert!(reply.contains("/nextevent"));
        assert!(!reply.contains("please"));
    }

    #[test]
    fn test_plain_text_is_ignored() {
        assert_eq!(unknown_command_reply("when is the next race?"), None);
        assert_eq!(unknown_command_reply("   "), None);
    }
}
