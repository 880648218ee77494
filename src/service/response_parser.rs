use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::error::Category;

use crate::error::{PlannerError, PlannerResult};
use crate::models::schedule::DaySchedule;
use crate::models::weather::WeatherReport;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response_message: String,
    pub updated_schedule: DaySchedule,
}

/// Removes markdown code fences the model sometimes wraps JSON in.
pub fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

fn decode<T: DeserializeOwned>(raw: &str, expected: &'static str) -> PlannerResult<T> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| {
        let detail = match e.classify() {
            Category::Syntax | Category::Eof => format!("not valid JSON ({})", e),
            Category::Data => format!("does not match the expected shape ({})", e),
            Category::Io => e.to_string(),
        };
        PlannerError::InvalidResponseShape { expected, detail }
    })
}

pub fn parse_schedule(raw: &str) -> PlannerResult<DaySchedule> {
    decode(raw, "schedule")
}

pub fn parse_chat_reply(raw: &str) -> PlannerResult<ChatReply> {
    decode(raw, "chat reply")
}

pub fn parse_weather(raw: &str) -> PlannerResult<WeatherReport> {
    decode(raw, "weather report")
}
