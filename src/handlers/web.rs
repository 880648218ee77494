use std::convert::Infallible;

use serde::{Deserialize, Serialize};
use tokio::sync::oneshot;
use warp::http::StatusCode;
use warp::reply::Response;
use warp::{Filter, Reply};

use crate::events::queue::{EventBus, ViewAction};
use crate::models::schedule::Day;
use crate::service::orchestrator::{Planner, SendRejection};

#[derive(Debug, Serialize)]
pub struct ErrorMessage {
    pub error: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    pub day: Day,
}

fn error_reply(status: StatusCode, message: &str) -> Response {
    warp::reply::with_status(
        warp::reply::json(&ErrorMessage {
            error: message.to_string(),
        }),
        status,
    )
    .into_response()
}

fn with_planner(planner: Planner) -> impl Filter<Extract = (Planner,), Error = Infallible> + Clone {
    warp::any().map(move || planner.clone())
}

fn with_bus(bus: EventBus) -> impl Filter<Extract = (EventBus,), Error = Infallible> + Clone {
    warp::any().map(move || bus.clone())
}

pub async fn get_state(planner: Planner) -> Result<Response, Infallible> {
    Ok(warp::reply::json(&planner.snapshot().await).into_response())
}

pub async fn post_chat(request: ChatRequest, bus: EventBus) -> Result<Response, Infallible> {
    let (ack, ack_rx) = oneshot::channel();
    let action = ViewAction::SendMessage {
        text: request.message,
        ack,
    };
    if !bus.emit(action).await {
        return Ok(error_reply(StatusCode::SERVICE_UNAVAILABLE, "planner is not running"));
    }
    let response = match ack_rx.await {
        Ok(Ok(())) => StatusCode::ACCEPTED.into_response(),
        Ok(Err(SendRejection::Blank)) => {
            error_reply(StatusCode::BAD_REQUEST, "message must not be blank")
        }
        Ok(Err(SendRejection::Busy)) => {
            error_reply(StatusCode::CONFLICT, "a reply is still being generated")
        }
        Ok(Err(SendRejection::NotReady)) => {
            error_reply(StatusCode::CONFLICT, "schedules have not finished loading")
        }
        Err(_) => error_reply(StatusCode::SERVICE_UNAVAILABLE, "planner is not running"),
    };
    Ok(response)
}

pub async fn dispatch(action: ViewAction, bus: EventBus) -> Result<Response, Infallible> {
    if bus.emit(action).await {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Ok(error_reply(StatusCode::SERVICE_UNAVAILABLE, "planner is not running"))
    }
}

pub fn routes(
    planner: Planner,
    bus: EventBus,
) -> impl Filter<Extract = (impl Reply,), Error = warp::Rejection> + Clone {
    let state = warp::path!("api" / "state")
        .and(warp::get())
        .and(with_planner(planner))
        .and_then(get_state);

    let chat = warp::path!("api" / "chat")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_bus(bus.clone()))
        .and_then(post_chat);

    let tab = warp::path!("api" / "tab")
        .and(warp::post())
        .and(warp::body::json())
        .and(with_bus(bus.clone()))
        .and_then(|request: TabRequest, bus: EventBus| {
            dispatch(ViewAction::SwitchTab(request.day), bus)
        });

    let open_chat = warp::path!("api" / "chat" / "open")
        .and(warp::post())
        .and(with_bus(bus.clone()))
        .and_then(|bus: EventBus| dispatch(ViewAction::OpenChat, bus));

    let close_chat = warp::path!("api" / "chat" / "close")
        .and(warp::post())
        .and(with_bus(bus.clone()))
        .and_then(|bus: EventBus| dispatch(ViewAction::CloseChat, bus));

    let dismiss = warp::path!("api" / "advisory" / "dismiss")
        .and(warp::post())
        .and(with_bus(bus))
        .and_then(|bus: EventBus| dispatch(ViewAction::DismissAdvisory, bus));

    state
        .or(chat)
        .or(tab)
        .or(open_chat)
        .or(close_chat)
        .or(dismiss)
}
