use tokio::sync::{mpsc, oneshot};

use crate::models::schedule::Day;
use crate::service::orchestrator::SendRejection;

/// User actions forwarded from a view to the orchestrator.
#[derive(Debug)]
pub enum ViewAction {
    SendMessage {
        text: String,
        /// Answered once the placeholder is in the log or the send was refused.
        ack: oneshot::Sender<Result<(), SendRejection>>,
    },
    SwitchTab(Day),
    OpenChat,
    CloseChat,
    DismissAdvisory,
}

#[derive(Clone)]
pub struct EventBus {
    tx: mpsc::Sender<ViewAction>,
}

impl EventBus {
    pub fn new(buffer: usize) -> (Self, mpsc::Receiver<ViewAction>) {
        let (tx, rx) = mpsc::channel(buffer);
        (Self { tx }, rx)
    }

    /// Returns false once the worker has shut down.
    pub async fn emit(&self, action: ViewAction) -> bool {
        self.tx.send(action).await.is_ok()
    }
}
