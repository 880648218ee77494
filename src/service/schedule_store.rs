use crate::models::schedule::{Day, DaySchedule, ScheduleEvent};

/// The authoritative plan for each tracked day. Updates replace a day's list
/// wholesale; there is no partial edit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    today: DaySchedule,
    tomorrow: DaySchedule,
}

impl ScheduleStore {
    pub fn new(today: DaySchedule, tomorrow: DaySchedule) -> Self {
        Self { today, tomorrow }
    }

    pub fn get(&self, day: Day) -> &[ScheduleEvent] {
        match day {
            Day::Today => &self.today,
            Day::Tomorrow => &self.tomorrow,
        }
    }

    pub fn set(&mut self, day: Day, events: DaySchedule) {
        match day {
            Day::Today => self.today = events,
            Day::Tomorrow => self.tomorrow = events,
        }
    }
}
