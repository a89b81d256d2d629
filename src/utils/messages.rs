//! Chat renderings of event query results. All output is MarkdownV2.

use crate::events::{EventRecord, ReminderResult};
use crate::utils::datetime::format_event_date;
use crate::utils::markdown::{bold, escape_markdown};

pub const NO_UPCOMING_EVENTS: &str = "🚫 No events scheduled\\.";
pub const NO_REMINDER_YET: &str = "🔔 No reminder sent so far\\.";

fn event_details(event: &EventRecord) -> String {
    let mut text = format!(
        "📅 {}\n📌 {}",
        escape_markdown(&format_event_date(&event.date)),
        escape_markdown(&event.title)
    );
    if !event.description.is_empty() {
        text.push_str(&format!("\n📝 {}", escape_markdown(&event.description)));
    }
    text
}

fn event_line(event: &EventRecord) -> String {
    format!(
        "🔹 {} \\- {}\n",
        escape_markdown(&format_event_date(&event.date)),
        escape_markdown(&event.title)
    )
}

pub fn render_reminder(result: &ReminderResult) -> String {
    match result {
        ReminderResult::Today(event) => {
            format!("🎯 {}\n{}", bold("Event today"), event_details(event))
        }
        ReminderResult::Tomorrow(event) => format!(
            "📅 {}\n{}",
            bold(&escape_markdown("No event today. Next one is tomorrow!")),
            event_details(event)
        ),
        ReminderResult::Nothing => "🚫 No events today or tomorrow\\.".to_string(),
    }
}

pub fn render_next_event(event: Option<&EventRecord>) -> String {
    match event {
        Some(event) => format!("🎯 {}\n{}", bold("Next event"), event_details(event)),
        None => NO_UPCOMING_EVENTS.to_string(),
    }
}

pub fn render_event_list(count: usize, events: &[EventRecord]) -> String {
    if events.is_empty() {
        return NO_UPCOMING_EVENTS.to_string();
    }
    let mut text = format!("📅 {}\n", bold(&format!("Next {count} events:")));
    for event in events {
        text.push_str(&event_line(event));
    }
    text
}

pub fn render_weekly_summary(events: &[EventRecord]) -> String {
    if events.is_empty() {
        return "🚫 No events scheduled for next week\\.".to_string();
    }
    let mut text = format!("📆 {}\n", bold("Events next week:"));
    for event in events {
        text.push_str(&event_line(event));
    }
    text
}
