use std::sync::Arc;

use chrono::{NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{PlannerError, PlannerResult};
use crate::models::chat::{ChatMessage, MessageBody};
use crate::models::schedule::{Day, DayKind, DaySchedule};
use crate::service::app_state::{Advisory, AppState, LoadPhase, StateSnapshot};
use crate::service::generation_service::{GenerationClient, GenerationRequest};
use crate::service::geolocation::LocationResolution;
use crate::service::prompt_builder;
use crate::service::response_parser::{self, ChatReply};
use crate::service::schedule_store::ScheduleStore;
use crate::service::weather_service::WeatherService;

pub const WELCOME_MESSAGE: &str = "Here is your initial plan for today and tomorrow. I can answer questions about your day or help you make changes!";

#[derive(Debug, Clone)]
pub struct PlannerSettings {
    pub schedule_model: String,
    pub chat_model: String,
    pub weather_model: String,
    pub timezone: Tz,
    pub off_day: Weekday,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejection {
    Blank,
    /// A turn is already in flight.
    Busy,
    NotReady,
}

/// A chat turn whose placeholder is in the log and whose request has not run yet.
#[derive(Debug, Clone)]
pub struct PendingTurn {
    pub placeholder: Uuid,
    pub day: Day,
    pub message: String,
    pub schedule: DaySchedule,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Replied { day: Day, message: String },
    Failed(String),
    Rejected(SendRejection),
}

#[derive(Clone)]
pub struct Planner {
    state: Arc<Mutex<AppState>>,
    generator: Arc<dyn GenerationClient>,
    settings: Arc<PlannerSettings>,
}

impl Planner {
    pub fn new(generator: Arc<dyn GenerationClient>, settings: PlannerSettings) -> Self {
        Self {
            state: Arc::new(Mutex::new(AppState::new())),
            generator,
            settings: Arc::new(settings),
        }
    }

    pub fn state(&self) -> Arc<Mutex<AppState>> {
        self.state.clone()
    }

    /// Local calendar date of "today" in the configured timezone.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.settings.timezone).date_naive()
    }

    pub async fn snapshot(&self) -> StateSnapshot {
        let today = self.today();
        self.state.lock().await.snapshot(today)
    }

    /// Generates both days concurrently. Either failure aborts the whole load.
    pub async fn initial_load(&self) -> PlannerResult<()> {
        {
            let mut state = self.state.lock().await;
            if state.load_started {
                warn!("initial load already started, ignoring");
                return Ok(());
            }
            state.load_started = true;
        }

        info!("generating initial schedules");
        let today = self.today();
        let result = tokio::try_join!(
            self.fetch_schedule(Day::Today, today),
            self.fetch_schedule(Day::Tomorrow, today)
        );

        let mut state = self.state.lock().await;
        match result {
            Ok((today_events, tomorrow_events)) => {
                info!(
                    today = today_events.len(),
                    tomorrow = tomorrow_events.len(),
                    "initial schedules ready"
                );
                state.phase = LoadPhase::Ready(ScheduleStore::new(today_events, tomorrow_events));
                state.chat.append(ChatMessage::model(WELCOME_MESSAGE));
                Ok(())
            }
            Err(err) => {
                state.phase = LoadPhase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    async fn fetch_schedule(&self, day: Day, today: NaiveDate) -> PlannerResult<DaySchedule> {
        let date = day.date_from(today);
        let kind = DayKind::for_date(date, self.settings.off_day);
        let request = GenerationRequest::json(
            &self.settings.schedule_model,
            prompt_builder::schedule_prompt(day, date, kind),
            prompt_builder::schedule_schema(),
        );
        let outcome = match self.generator.generate(request).await {
            Ok(raw) => response_parser::parse_schedule(&raw),
            Err(err) => Err(err),
        };
        outcome.map_err(|err| {
            error!(%day, error = %err, "failed to fetch schedule");
            PlannerError::ScheduleGeneration {
                day,
                message: err.to_string(),
            }
        })
    }

    /// Validates the send and appends the user message plus a placeholder,
    /// all under one lock so two sends can never both pass the busy check.
    pub async fn begin_turn(&self, text: &str) -> Result<PendingTurn, SendRejection> {
        if text.trim().is_empty() {
            return Err(SendRejection::Blank);
        }
        let mut state = self.state.lock().await;
        let day = state.active_tab;
        let schedule = match state.schedules() {
            Some(store) => store.get(day).to_vec(),
            None => return Err(SendRejection::NotReady),
        };
        if state.is_streaming() {
            return Err(SendRejection::Busy);
        }
        state.banner = None;
        state.chat.append(ChatMessage::user(text));
        let placeholder = state.chat.append(ChatMessage::placeholder());
        Ok(PendingTurn {
            placeholder,
            day,
            message: text.to_string(),
            schedule,
        })
    }

    /// Runs the generation call for a turn and fills its placeholder.
    /// The reply's schedule replaces the day the turn was sent from.
    pub async fn complete_turn(&self, turn: PendingTurn) -> ChatOutcome {
        let result = self.request_edit(&turn).await;
        let mut state = self.state.lock().await;
        match result {
            Ok(reply) => {
                if let Some(store) = state.schedules_mut() {
                    store.set(turn.day, reply.updated_schedule);
                }
                let body = MessageBody::Resolved(reply.response_message.clone());
                if !state.chat.update_last(body) {
                    warn!(placeholder = %turn.placeholder, "placeholder was no longer pending");
                }
                ChatOutcome::Replied {
                    day: turn.day,
                    message: reply.response_message,
                }
            }
            Err(err) => {
                error!(day = %turn.day, error = %err, "chat turn failed");
                let cause = err.to_string();
                state.banner = Some(format!("Failed to get a response: {}", cause));
                if !state.chat.update_last(MessageBody::Failed(cause.clone())) {
                    warn!(placeholder = %turn.placeholder, "placeholder was no longer pending");
                }
                ChatOutcome::Failed(cause)
            }
        }
    }

    pub async fn send_message(&self, text: &str) -> ChatOutcome {
        match self.begin_turn(text).await {
            Ok(turn) => self.complete_turn(turn).await,
            Err(rejection) => ChatOutcome::Rejected(rejection),
        }
    }

    async fn request_edit(&self, turn: &PendingTurn) -> PlannerResult<ChatReply> {
        let prompt = prompt_builder::chat_edit_prompt(turn.day, &turn.schedule, &turn.message)?;
        let request = GenerationRequest::json(
            &self.settings.chat_model,
            prompt,
            prompt_builder::chat_response_schema(),
        );
        let raw = self.generator.generate(request).await?;
        response_parser::parse_chat_reply(&raw)
    }

    pub async fn set_active_tab(&self, day: Day) {
        self.state.lock().await.active_tab = day;
    }

    pub async fn set_chat_open(&self, open: bool) {
        self.state.lock().await.chat_open = open;
    }

    /// Hides the advisory. The resolved location is kept.
    pub async fn dismiss_advisory(&self) {
        let mut state = self.state.lock().await;
        if let Some(advisory) = state.advisory.as_mut() {
            advisory.visible = false;
        }
    }

    pub async fn apply_location(&self, resolution: LocationResolution) {
        let mut state = self.state.lock().await;
        state.location = Some(resolution.coordinates);
        state.advisory = resolution.advisory.map(|message| Advisory {
            message,
            visible: true,
        });
    }

    /// Best-effort weather refresh for the resolved location. Failures are
    /// only logged.
    pub async fn refresh_weather(&self) {
        let Some(location) = self.state.lock().await.location else {
            warn!("no location resolved yet, skipping weather");
            return;
        };
        match WeatherService::fetch(
            self.generator.as_ref(),
            &self.settings.weather_model,
            location,
        )
        .await
        {
            Ok(report) => {
                info!(location = %report.today.location, "weather updated");
                self.state.lock().await.weather = Some(report);
            }
            Err(err) => error!(error = %err, "failed to fetch weather"),
        }
    }
}
