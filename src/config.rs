use std::collections::HashMap;
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::time::Duration;

use chrono::Weekday;
use chrono_tz::Tz;

use crate::clients::geolocation_client::DEFAULT_LOOKUP_URL;
use crate::error::{PlannerError, PlannerResult};
use crate::models::weather::Coordinates;
use crate::service::generation_service::DEFAULT_BASE_URL;
use crate::service::orchestrator::PlannerSettings;

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> PlannerResult<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> PlannerResult<Self> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(PlannerError::InvalidConfig {
                    key: "CONFIG_FILE",
                    message: format!("invalid line {}: {}", idx + 1, line),
                });
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    /// File values win over the process environment.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
            .filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Cli,
    Api,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeolocationMode {
    Ip { url: String },
    Fixed(Coordinates),
    Off,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub run_mode: RunMode,
    pub base_url: String,
    pub planner: PlannerSettings,
    pub bind_addr: SocketAddr,
    pub geolocation: GeolocationMode,
    pub geolocation_timeout: Duration,
}

fn invalid(key: &'static str, message: impl Into<String>) -> PlannerError {
    PlannerError::InvalidConfig {
        key,
        message: message.into(),
    }
}

fn parse_weekday(value: &str) -> PlannerResult<Weekday> {
    value
        .trim()
        .parse::<Weekday>()
        .map_err(|_| invalid("OFF_DAY", format!("'{}' is not a weekday", value)))
}

fn parse_f64(config: &AppConfig, key: &'static str) -> PlannerResult<f64> {
    let raw = config.get(key).ok_or(PlannerError::MissingConfig(key))?;
    raw.trim()
        .parse::<f64>()
        .map_err(|_| invalid(key, format!("'{}' is not a number", raw)))
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> PlannerResult<Self> {
        let api_key = config
            .get("API_KEY")
            .ok_or(PlannerError::MissingConfig("API_KEY"))?;

        let run_mode = match config.get("RUN_MODE").as_deref() {
            None | Some("cli") => RunMode::Cli,
            Some("api") => RunMode::Api,
            Some(other) => return Err(invalid("RUN_MODE", format!("unknown run mode {}", other))),
        };

        let timezone = match config.get("TIMEZONE") {
            Some(name) => name
                .parse::<Tz>()
                .map_err(|_| invalid("TIMEZONE", format!("unknown timezone {}", name)))?,
            None => chrono_tz::Africa::Cairo,
        };

        let off_day = match config.get("OFF_DAY") {
            Some(value) => parse_weekday(&value)?,
            None => Weekday::Fri,
        };

        let bind_addr = config
            .get("BIND_ADDR")
            .unwrap_or_else(|| "127.0.0.1:3030".to_string());
        let bind_addr = bind_addr
            .parse::<SocketAddr>()
            .map_err(|_| invalid("BIND_ADDR", format!("'{}' is not a socket address", bind_addr)))?;

        let geolocation = match config.get("GEOLOCATION").as_deref() {
            None | Some("ip") => GeolocationMode::Ip {
                url: config
                    .get("GEOLOCATION_URL")
                    .unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string()),
            },
            Some("fixed") => GeolocationMode::Fixed(Coordinates {
                lat: parse_f64(config, "LATITUDE")?,
                lng: parse_f64(config, "LONGITUDE")?,
            }),
            Some("off") => GeolocationMode::Off,
            Some(other) => {
                return Err(invalid("GEOLOCATION", format!("unknown mode {}", other)));
            }
        };

        let geolocation_timeout = match config.get("GEOLOCATION_TIMEOUT_MS") {
            Some(raw) => Duration::from_millis(raw.trim().parse::<u64>().map_err(|_| {
                invalid("GEOLOCATION_TIMEOUT_MS", format!("'{}' is not a number", raw))
            })?),
            None => Duration::from_millis(5000),
        };

        let model =
            |key: &str, default: &str| config.get(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            api_key,
            run_mode,
            base_url: config
                .get("GEMINI_BASE_URL")
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            planner: PlannerSettings {
                schedule_model: model("SCHEDULE_MODEL", "gemini-2.5-flash"),
                chat_model: model("CHAT_MODEL", "gemini-3-pro-preview"),
                weather_model: model("WEATHER_MODEL", "gemini-2.5-flash"),
                timezone,
                off_day,
            },
            bind_addr,
            geolocation,
            geolocation_timeout,
        })
    }
}
