use teloxide::prelude::*;
use teloxide::types::ParseMode;
use crate::bot::commands::UPCOMING_LIST_LEN;
use crate::bot::handlers::{sender_name, BotState};
use crate::utils::logging::{log_command_start, log_command_success};
use crate::utils::messages::{render_event_list, render_next_event, render_weekly_summary};

pub async fn handle_next(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let user = sender_name(&msg);
    log_command_start("/next", &user, msg.chat.id.0);

    let today = state.zone.today();
    let next = state.store.load_blocking().await.next_event_from(today);

    bot.send_message(msg.chat.id, render_next_event(next.as_ref()))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    let details = next.map(|e| format!("{} on {}", e.title, e.date));
    log_command_success("/next", &user, msg.chat.id.0, details.as_deref());
    Ok(())
}

pub async fn handle_next_events(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let user = sender_name(&msg);
    log_command_start("/next5events", &user, msg.chat.id.0);

    let today = state.zone.today();
    let events = state
        .store
        .load_blocking()
        .await
        .next_n_events_from(today, UPCOMING_LIST_LEN);

    bot.send_message(msg.chat.id, render_event_list(UPCOMING_LIST_LEN, &events))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    log_command_success(
        "/next5events",
        &user,
        msg.chat.id.0,
        Some(&format!("{} events", events.len())),
    );
    Ok(())
}

pub async fn handle_week(bot: Bot, msg: Message, state: &BotState) -> ResponseResult<()> {
    let user = sender_name(&msg);
    log_command_start("/week", &user, msg.chat.id.0);

    let today = state.zone.today();
    let events = state.store.load_blocking().await.weekly_summary(today);

    bot.send_message(msg.chat.id, render_weekly_summary(&events))
        .parse_mode(ParseMode::MarkdownV2)
        .await?;

    log_command_success("/week", &user, msg.chat.id.0, Some(&format!("{} events", events.len())));
    Ok(())
}
