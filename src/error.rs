use thiserror::Error;

use crate::models::schedule::Day;

pub type PlannerResult<T> = core::result::Result<T, PlannerError>;

#[derive(Debug, Error)]
pub enum PlannerError {
    #[error("{0} is not defined in your environment variables.")]
    MissingConfig(&'static str),
    #[error("Invalid value for {key}: {message}")]
    InvalidConfig { key: &'static str, message: String },
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("Request failed with status {status}: {message}")]
    Api { status: u16, message: String },
    #[error("The model returned an empty response")]
    EmptyResponse,
    #[error("Response is not a valid {expected}: {detail}")]
    InvalidResponseShape { expected: &'static str, detail: String },
    #[error("Could not generate the schedule for {day}. Please check your API key and network connection.")]
    ScheduleGeneration { day: Day, message: String },
    #[error("{0}")]
    Geolocation(String),
    #[error("{0}")]
    SerdeJson(#[from] serde_json::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
}
