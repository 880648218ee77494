use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// The unit of schedule tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Day {
    #[default]
    Today,
    Tomorrow,
}

impl Day {
    pub const ALL: [Day; 2] = [Day::Today, Day::Tomorrow];

    pub fn as_str(&self) -> &'static str {
        match self {
            Day::Today => "today",
            Day::Tomorrow => "tomorrow",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Day::Today => "Today",
            Day::Tomorrow => "Tomorrow",
        }
    }

    /// Calendar date this selector refers to, given the local date of "today".
    pub fn date_from(&self, today: NaiveDate) -> NaiveDate {
        match self {
            Day::Today => today,
            Day::Tomorrow => today.checked_add_days(Days::new(1)).unwrap_or(today),
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Day {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "today" => Ok(Day::Today),
            "tomorrow" => Ok(Day::Tomorrow),
            other => Err(format!("Unknown day '{}', expected today or tomorrow", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayKind {
    Workday,
    OffDay,
}

impl DayKind {
    pub fn for_date(date: NaiveDate, off_day: Weekday) -> Self {
        if date.weekday() == off_day {
            DayKind::OffDay
        } else {
            DayKind::Workday
        }
    }
}

/// Icon tag attached to an event. Tags outside the known set are kept as-is
/// so they survive a round trip through the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventIcon {
    Work,
    Run,
    Gym,
    Sleep,
    Family,
    Study,
    Commute,
    Baby,
    Eat,
    Morning,
    Evening,
    Other(String),
}

impl EventIcon {
    pub const KNOWN_TAGS: [&'static str; 11] = [
        "work", "run", "gym", "sleep", "family", "study", "commute", "baby", "eat", "morning",
        "evening",
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventIcon::Work => "work",
            EventIcon::Run => "run",
            EventIcon::Gym => "gym",
            EventIcon::Sleep => "sleep",
            EventIcon::Family => "family",
            EventIcon::Study => "study",
            EventIcon::Commute => "commute",
            EventIcon::Baby => "baby",
            EventIcon::Eat => "eat",
            EventIcon::Morning => "morning",
            EventIcon::Evening => "evening",
            EventIcon::Other(tag) => tag,
        }
    }
}

impl From<String> for EventIcon {
    fn from(tag: String) -> Self {
        match tag.trim().to_lowercase().as_str() {
            "work" => EventIcon::Work,
            "run" => EventIcon::Run,
            "gym" => EventIcon::Gym,
            "sleep" => EventIcon::Sleep,
            "family" => EventIcon::Family,
            "study" => EventIcon::Study,
            "commute" => EventIcon::Commute,
            "baby" => EventIcon::Baby,
            "eat" => EventIcon::Eat,
            "morning" => EventIcon::Morning,
            "evening" => EventIcon::Evening,
            _ => EventIcon::Other(tag),
        }
    }
}

impl From<&str> for EventIcon {
    fn from(tag: &str) -> Self {
        EventIcon::from(tag.to_string())
    }
}

impl From<EventIcon> for String {
    fn from(icon: EventIcon) -> Self {
        match icon {
            EventIcon::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// One entry in a day's plan. Identity is its position in the list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleEvent {
    pub icon: EventIcon,
    pub time: String,
    pub title: String,
    pub description: String,
}

impl ScheduleEvent {
    pub fn new(icon: impl Into<EventIcon>, time: &str, title: &str, description: &str) -> Self {
        Self {
            icon: icon.into(),
            time: time.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }
}

pub type DaySchedule = Vec<ScheduleEvent>;
