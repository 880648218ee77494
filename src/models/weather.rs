use serde::{Deserialize, Serialize};

use crate::models::schedule::Day;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub temp: String,
    pub condition: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub today: WeatherInfo,
    pub tomorrow: WeatherInfo,
}

impl WeatherReport {
    pub fn for_day(&self, day: Day) -> &WeatherInfo {
        match day {
            Day::Today => &self.today,
            Day::Tomorrow => &self.tomorrow,
        }
    }
}
