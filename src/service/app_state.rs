use chrono::NaiveDate;
use serde::Serialize;

use crate::models::chat::ChatRole;
use crate::models::schedule::{Day, ScheduleEvent};
use crate::models::weather::{Coordinates, WeatherInfo, WeatherReport};
use crate::service::chat_log::ChatLog;
use crate::service::schedule_store::ScheduleStore;

/// Initial load progress. Schedules only exist once both days loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready(ScheduleStore),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    pub message: String,
    pub visible: bool,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub phase: LoadPhase,
    /// Set once the initial load has claimed the fetch.
    pub load_started: bool,
    pub active_tab: Day,
    pub chat: ChatLog,
    pub chat_open: bool,
    /// Transient error from the last chat turn.
    pub banner: Option<String>,
    pub weather: Option<WeatherReport>,
    pub location: Option<Coordinates>,
    pub advisory: Option<Advisory>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            load_started: false,
            active_tab: Day::Today,
            chat: ChatLog::new(),
            chat_open: false,
            banner: None,
            weather: None,
            location: None,
            advisory: None,
        }
    }

    pub fn schedules(&self) -> Option<&ScheduleStore> {
        match &self.phase {
            LoadPhase::Ready(store) => Some(store),
            _ => None,
        }
    }

    pub fn schedules_mut(&mut self) -> Option<&mut ScheduleStore> {
        match &mut self.phase {
            LoadPhase::Ready(store) => Some(store),
            _ => None,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.chat.has_pending()
    }

    pub fn visible_advisory(&self) -> Option<&str> {
        self.advisory
            .as_ref()
            .filter(|advisory| advisory.visible)
            .map(|advisory| advisory.message.as_str())
    }

    pub fn snapshot(&self, today: NaiveDate) -> StateSnapshot {
        let (phase, error) = match &self.phase {
            LoadPhase::Loading => (PhaseView::Loading, None),
            LoadPhase::Ready(_) => (PhaseView::Ready, None),
            LoadPhase::Failed(message) => (PhaseView::Error, Some(message.clone())),
        };
        let days = self
            .schedules()
            .map(|store| {
                Day::ALL
                    .iter()
                    .map(|day| DayView {
                        day: *day,
                        label: day.label(),
                        display_date: display_date(*day, today),
                        events: store.get(*day).to_vec(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        StateSnapshot {
            phase,
            error,
            active_tab: self.active_tab,
            days,
            chat: self
                .chat
                .messages()
                .iter()
                .map(|message| MessageView {
                    role: message.role,
                    text: message.text().into_owned(),
                    pending: message.is_pending(),
                })
                .collect(),
            streaming: self.is_streaming(),
            banner: self.banner.clone(),
            weather: self
                .weather
                .as_ref()
                .map(|report| report.for_day(self.active_tab).clone()),
            advisory: self.visible_advisory().map(str::to_string),
            chat_open: self.chat_open,
        }
    }
}

/// "Monday, October 19" for the given tab.
pub fn display_date(day: Day, today: NaiveDate) -> String {
    day.date_from(today).format("%A, %B %-d").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseView {
    Loading,
    Ready,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct DayView {
    pub day: Day,
    pub label: &'static str,
    pub display_date: String,
    pub events: Vec<ScheduleEvent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageView {
    pub role: ChatRole,
    pub text: String,
    pub pending: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StateSnapshot {
    pub phase: PhaseView,
    pub error: Option<String>,
    pub active_tab: Day,
    pub days: Vec<DayView>,
    pub chat: Vec<MessageView>,
    pub streaming: bool,
    pub banner: Option<String>,
    pub weather: Option<WeatherInfo>,
    pub advisory: Option<String>,
    pub chat_open: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatMessage;

    #[test]
    fn loading_snapshot_has_no_days() {
        let state = AppState::new();
        let snapshot = state.snapshot(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(snapshot.phase, PhaseView::Loading);
        assert!(snapshot.days.is_empty());
        assert_eq!(snapshot.active_tab, Day::Today);
    }

    #[test]
    fn snapshot_marks_pending_turns_and_dates() {
        let mut state = AppState::new();
        state.phase = LoadPhase::Ready(ScheduleStore::default());
        state.chat.append(ChatMessage::user("hi"));
        state.chat.append(ChatMessage::placeholder());

        let snapshot = state.snapshot(NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert_eq!(snapshot.phase, PhaseView::Ready);
        assert!(snapshot.streaming);
        assert!(snapshot.chat[1].pending);
        assert!(!snapshot.chat[0].pending);
        assert_eq!(snapshot.days[0].display_date, "Monday, October 19");
        assert_eq!(snapshot.days[1].display_date, "Tuesday, October 20");
    }

    #[test]
    fn hidden_advisory_is_not_reported() {
        let mut state = AppState::new();
        state.advisory = Some(Advisory {
            message: "Using default location".to_string(),
            visible: false,
        });
        assert!(state.visible_advisory().is_none());
    }
}
