use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

/// Content of a chat entry. A model turn starts out `Pending` and is resolved
/// exactly once, either with the reply or with the failure cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "text", rename_all = "lowercase")]
pub enum MessageBody {
    Pending,
    Resolved(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn user(text: &str) -> Self {
        Self::with_body(ChatRole::User, MessageBody::Resolved(text.to_string()))
    }

    pub fn model(text: &str) -> Self {
        Self::with_body(ChatRole::Model, MessageBody::Resolved(text.to_string()))
    }

    pub fn placeholder() -> Self {
        Self::with_body(ChatRole::Model, MessageBody::Pending)
    }

    fn with_body(role: ChatRole, body: MessageBody) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            body,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.body, MessageBody::Pending)
    }

    /// Text shown to the user. Pending turns render empty.
    pub fn text(&self) -> Cow<'_, str> {
        match &self.body {
            MessageBody::Pending => Cow::Borrowed(""),
            MessageBody::Resolved(text) => Cow::Borrowed(text),
            MessageBody::Failed(cause) => Cow::Owned(format!("Error: {}", cause)),
        }
    }
}
