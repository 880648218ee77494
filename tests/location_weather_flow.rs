use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Weekday;
use dayPlanner::error::{PlannerError, PlannerResult};
use dayPlanner::models::schedule::Day;
use dayPlanner::models::weather::Coordinates;
use dayPlanner::service::generation_service::{GenerationClient, GenerationRequest, ResponseFormat};
use dayPlanner::service::geolocation::{DEFAULT_LOCATION, LocationProvider, resolve_location};
use dayPlanner::service::orchestrator::{Planner, PlannerSettings};
use dayPlanner::tasks::location_task::run_location_task;

struct DeniedLocation;

#[async_trait::async_trait]
impl LocationProvider for DeniedLocation {
    async fn current_position(&self) -> PlannerResult<Coordinates> {
        Err(PlannerError::Geolocation("User denied Geolocation".to_string()))
    }
}

struct SlowLocation;

#[async_trait::async_trait]
impl LocationProvider for SlowLocation {
    async fn current_position(&self) -> PlannerResult<Coordinates> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(Coordinates { lat: 0.0, lng: 0.0 })
    }
}

struct WeatherGemini {
    weather: Result<String, String>,
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl GenerationClient for WeatherGemini {
    async fn generate(&self, request: GenerationRequest) -> PlannerResult<String> {
        assert_eq!(request.format, ResponseFormat::GroundedText);
        assert_eq!(request.model, "weather-model");
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.weather
            .clone()
            .map_err(|message| PlannerError::Api { status: 500, message })
    }
}

fn settings() -> PlannerSettings {
    PlannerSettings {
        schedule_model: "schedule-model".to_string(),
        chat_model: "chat-model".to_string(),
        weather_model: "weather-model".to_string(),
        timezone: chrono_tz::UTC,
        off_day: Weekday::Fri,
    }
}

fn planner_with_weather(weather: Result<String, String>) -> (Planner, Arc<WeatherGemini>) {
    let gemini = Arc::new(WeatherGemini {
        weather,
        calls: AtomicUsize::new(0),
    });
    (Planner::new(gemini.clone(), settings()), gemini)
}

const FORECAST: &str = r#"```json
{"today":{"temp":"24°C","condition":"Sunny","location":"New Damietta"},
 "tomorrow":{"temp":"21°C","condition":"Windy","location":"New Damietta"}}
```"#;

#[tokio::test]
async fn denial_falls_back_with_advisory() {
    let resolution = resolve_location(Some(&DeniedLocation), Duration::from_secs(5)).await;
    assert_eq!(resolution.coordinates, DEFAULT_LOCATION);
    let advisory = resolution.advisory.expect("advisory should be set");
    assert!(advisory.contains("User denied Geolocation"));
    assert!(advisory.contains("New Damietta, Egypt"));
}

#[tokio::test]
async fn slow_lookup_times_out_to_default() {
    let resolution = resolve_location(Some(&SlowLocation), Duration::from_millis(50)).await;
    assert_eq!(resolution.coordinates, DEFAULT_LOCATION);
    assert!(resolution.advisory.unwrap().contains("timed out after 50ms"));
}

#[tokio::test]
async fn dismissing_advisory_keeps_the_location() {
    let (planner, _) = planner_with_weather(Ok(FORECAST.to_string()));
    let provider: Arc<dyn LocationProvider> = Arc::new(DeniedLocation);
    run_location_task(planner.clone(), Some(provider), Duration::from_secs(5)).await;

    assert!(planner.snapshot().await.advisory.is_some());
    planner.dismiss_advisory().await;

    assert!(planner.snapshot().await.advisory.is_none());
    let state = planner.state();
    let state = state.lock().await;
    assert_eq!(state.location, Some(DEFAULT_LOCATION));
    let advisory = state.advisory.as_ref().unwrap();
    assert!(!advisory.visible);
    assert!(!advisory.message.is_empty());
}

#[tokio::test]
async fn weather_follows_the_active_tab() {
    let (planner, gemini) = planner_with_weather(Ok(FORECAST.to_string()));
    run_location_task(planner.clone(), None, Duration::from_secs(5)).await;

    assert_eq!(gemini.calls.load(Ordering::SeqCst), 1);
    assert_eq!(planner.snapshot().await.weather.unwrap().condition, "Sunny");
    planner.set_active_tab(Day::Tomorrow).await;
    assert_eq!(planner.snapshot().await.weather.unwrap().temp, "21°C");
}

#[tokio::test]
async fn weather_failure_is_silent() {
    let (planner, gemini) = planner_with_weather(Err("quota exceeded".to_string()));
    run_location_task(planner.clone(), None, Duration::from_secs(5)).await;

    assert_eq!(gemini.calls.load(Ordering::SeqCst), 1);
    let snapshot = planner.snapshot().await;
    assert!(snapshot.weather.is_none());
    assert!(snapshot.banner.is_none());
    assert!(snapshot.error.is_none());
}
