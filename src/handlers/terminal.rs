use std::fmt::Write;

use crate::models::chat::ChatRole;
use crate::models::schedule::{Day, ScheduleEvent};
use crate::models::weather::WeatherInfo;
use crate::service::app_state::{MessageView, PhaseView, StateSnapshot};

pub const EMPTY_SCHEDULE: &str = "No schedule available for this day.";

pub fn render_schedule(events: &[ScheduleEvent]) -> String {
    if events.is_empty() {
        return EMPTY_SCHEDULE.to_string();
    }
    let mut out = String::new();
    for event in events {
        let _ = writeln!(out, "[{}] {}", event.icon.as_str(), event.title);
        let _ = writeln!(out, "    {}", event.time);
        if !event.description.trim().is_empty() {
            let _ = writeln!(out, "    {}", event.description);
        }
    }
    out.trim_end().to_string()
}

pub fn render_weather(weather: &WeatherInfo) -> String {
    format!("{}: {}, {}", weather.location, weather.temp, weather.condition)
}

pub fn render_message(message: &MessageView) -> String {
    let speaker = match message.role {
        ChatRole::User => "you",
        ChatRole::Model => "assistant",
    };
    if message.pending {
        format!("{}> ...", speaker)
    } else {
        format!("{}> {}", speaker, message.text)
    }
}

/// Renders the selected day the way the page shows it: advisory, header,
/// weather, then the event list. Loading and error phases replace the page.
pub fn render_day(snapshot: &StateSnapshot, day: Day) -> String {
    match snapshot.phase {
        PhaseView::Loading => return "Generating your personalized plan...".to_string(),
        PhaseView::Error => {
            return format!(
                "Something went wrong\n{}\nPlease check your network connection and refresh.",
                snapshot.error.as_deref().unwrap_or_default()
            );
        }
        PhaseView::Ready => {}
    }

    let mut out = String::new();
    if let Some(advisory) = &snapshot.advisory {
        let _ = writeln!(out, "! {}\n", advisory);
    }
    if let Some(view) = snapshot.days.iter().find(|view| view.day == day) {
        let _ = writeln!(out, "{} - {}", view.label, view.display_date);
        if day == snapshot.active_tab {
            if let Some(weather) = &snapshot.weather {
                let _ = writeln!(out, "{}", render_weather(weather));
            }
        }
        let _ = writeln!(out);
        out.push_str(&render_schedule(&view.events));
    }
    out.trim_end().to_string()
}
