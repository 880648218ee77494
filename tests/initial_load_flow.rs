use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use chrono::Weekday;
use dayPlanner::error::{PlannerError, PlannerResult};
use dayPlanner::models::chat::ChatRole;
use dayPlanner::models::schedule::Day;
use dayPlanner::service::app_state::{LoadPhase, PhaseView};
use dayPlanner::service::generation_service::{GenerationClient, GenerationRequest, ResponseFormat};
use dayPlanner::service::orchestrator::{Planner, PlannerSettings, WELCOME_MESSAGE};

struct FakeGemini {
    today: Result<String, String>,
    tomorrow: Result<String, String>,
    latency: Option<Duration>,
    requests: StdMutex<Vec<GenerationRequest>>,
}

impl FakeGemini {
    fn new(today: Result<String, String>, tomorrow: Result<String, String>) -> Self {
        Self {
            today,
            tomorrow,
            latency: None,
            requests: StdMutex::new(Vec::new()),
        }
    }

    fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }
}

#[async_trait::async_trait]
impl GenerationClient for FakeGemini {
    async fn generate(&self, request: GenerationRequest) -> PlannerResult<String> {
        let response = if request.prompt.contains("schedule for tomorrow") {
            self.tomorrow.clone()
        } else {
            self.today.clone()
        };
        self.requests.lock().unwrap().push(request);
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        response.map_err(|message| PlannerError::Api {
            status: 500,
            message,
        })
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

fn five_events(prefix: &str) -> String {
    let events: Vec<serde_json::Value> = (0..5)
        .map(|i| {
            serde_json::json!({
                "icon": "work",
                "time": format!("{:02}:00 - {:02}:00", 8 + i, 9 + i),
                "title": format!("{} {}", prefix, i),
                "description": "",
            })
        })
        .collect();
    serde_json::to_string(&events).unwrap()
}

#[tokio::test]
async fn both_days_load_then_welcome_is_posted() {
    let gemini = Arc::new(FakeGemini::new(Ok(five_events("today")), Ok(five_events("tomorrow"))));
    let planner = Planner::new(gemini.clone(), settings());

    assert_eq!(planner.snapshot().await.phase, PhaseView::Loading);
    planner.initial_load().await.expect("initial load should succeed");

    let snapshot = planner.snapshot().await;
    assert_eq!(snapshot.phase, PhaseView::Ready);
    assert_eq!(snapshot.active_tab, Day::Today);
    assert_eq!(snapshot.days.len(), 2);
    assert_eq!(snapshot.days[0].events.len(), 5);
    assert_eq!(snapshot.days[0].events[0].title, "today 0");
    assert_eq!(snapshot.days[1].events[4].title, "tomorrow 4");
    assert_eq!(snapshot.chat.len(), 1);
    assert_eq!(snapshot.chat[0].role, ChatRole::Model);
    assert_eq!(snapshot.chat[0].text, WELCOME_MESSAGE);

    let requests = gemini.requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    for request in requests.iter() {
        assert_eq!(request.model, "schedule-model");
        assert!(matches!(request.format, ResponseFormat::Json { .. }));
    }
}

#[tokio::test]
async fn tomorrow_failure_aborts_the_whole_load() {
    let gemini = Arc::new(FakeGemini::new(
        Ok(five_events("today")),
        Err("model overloaded".to_string()),
    ));
    let planner = Planner::new(gemini, settings());

    let err = planner.initial_load().await.unwrap_err();
    assert!(matches!(err, PlannerError::ScheduleGeneration { day: Day::Tomorrow, .. }));

    let snapshot = planner.snapshot().await;
    assert_eq!(snapshot.phase, PhaseView::Error);
    assert_eq!(
        snapshot.error.as_deref(),
        Some("Could not generate the schedule for tomorrow. Please check your API key and network connection.")
    );
    assert!(snapshot.days.is_empty());
    assert!(snapshot.chat.is_empty());

    let state = planner.state();
    assert!(state.lock().await.schedules().is_none());
}

#[tokio::test]
async fn malformed_schedule_is_treated_as_a_failure() {
    let gemini = Arc::new(FakeGemini::new(
        Ok(r#"[{"icon":"work","title":"Work"}]"#.to_string()),
        Ok(five_events("tomorrow")),
    ));
    let planner = Planner::new(gemini, settings());

    let err = planner.initial_load().await.unwrap_err();
    match err {
        PlannerError::ScheduleGeneration { day, message } => {
            assert_eq!(day, Day::Today);
            assert!(message.contains("Response is not a valid schedule"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn fenced_schedules_are_accepted() {
    let fenced = format!("```json\n{}\n```", five_events("today"));
    let gemini = Arc::new(FakeGemini::new(Ok(fenced), Ok(five_events("tomorrow"))));
    let planner = Planner::new(gemini, settings());

    planner.initial_load().await.unwrap();
    let state = planner.state();
    let state = state.lock().await;
    assert!(matches!(state.phase, LoadPhase::Ready(_)));
    assert_eq!(state.schedules().unwrap().get(Day::Today).len(), 5);
}

#[tokio::test]
async fn second_load_is_ignored() {
    let gemini = Arc::new(FakeGemini::new(Ok(five_events("today")), Ok(five_events("tomorrow"))));
    let planner = Planner::new(gemini.clone(), settings());

    planner.initial_load().await.unwrap();
    planner.initial_load().await.unwrap();

    assert_eq!(gemini.requests.lock().unwrap().len(), 2);
    assert_eq!(planner.snapshot().await.chat.len(), 1);
}

#[tokio::test]
async fn overlapping_loads_fetch_once() {
    let gemini = Arc::new(
        FakeGemini::new(Ok(five_events("today")), Ok(five_events("tomorrow")))
            .with_latency(Duration::from_millis(50)),
    );
    let planner = Planner::new(gemini.clone(), settings());

    let (first, second) = tokio::join!(planner.initial_load(), planner.initial_load());
    first.unwrap();
    second.unwrap();

    assert_eq!(gemini.requests.lock().unwrap().len(), 2);
    let snapshot = planner.snapshot().await;
    assert_eq!(snapshot.phase, PhaseView::Ready);
    assert_eq!(snapshot.chat.len(), 1);
    assert_eq!(snapshot.chat[0].text, WELCOME_MESSAGE);
}
