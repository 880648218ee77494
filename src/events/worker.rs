use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::events::queue::ViewAction;
use crate::service::orchestrator::Planner;

/// Applies view actions one at a time. Chat requests are spawned once their
/// placeholder is in place so tab switches stay responsive while a reply is
/// pending.
pub async fn run_view_worker(mut rx: mpsc::Receiver<ViewAction>, planner: Planner) {
    while let Some(action) = rx.recv().await {
        debug!(?action, "handling view action");
        match action {
            ViewAction::SendMessage { text, ack } => match planner.begin_turn(&text).await {
                Ok(turn) => {
                    let _ = ack.send(Ok(()));
                    let planner = planner.clone();
                    tokio::spawn(async move {
                        planner.complete_turn(turn).await;
                    });
                }
                Err(rejection) => {
                    let _ = ack.send(Err(rejection));
                }
            },
            ViewAction::SwitchTab(day) => planner.set_active_tab(day).await,
            ViewAction::OpenChat => planner.set_chat_open(true).await,
            ViewAction::CloseChat => planner.set_chat_open(false).await,
            ViewAction::DismissAdvisory => planner.dismiss_advisory().await,
        }
    }
    info!("view worker stopped");
}
