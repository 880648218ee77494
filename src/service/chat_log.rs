use uuid::Uuid;

use crate::models::chat::{ChatMessage, MessageBody};

/// Append-only conversation history. The only mutation allowed on an existing
/// entry is resolving its body.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self {
            messages: Vec::new(),
        }
    }

    pub fn append(&mut self, message: ChatMessage) -> Uuid {
        let id = message.id;
        self.messages.push(message);
        id
    }

    /// Fills the newest entry if it is still a pending placeholder. Entries
    /// that were already filled are left alone.
    pub fn update_last(&mut self, body: MessageBody) -> bool {
        match self.messages.last_mut() {
            Some(last) if last.is_pending() => {
                last.body = body;
                true
            }
            _ => false,
        }
    }

    pub fn has_pending(&self) -> bool {
        self.messages.iter().any(ChatMessage::is_pending)
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::ChatRole;

    #[test]
    fn placeholder_then_fill() {
        let mut log = ChatLog::new();
        log.append(ChatMessage::user("move gym to 6pm"));
        log.append(ChatMessage::placeholder());
        assert!(log.has_pending());
        assert_eq!(log.messages()[1].text(), "");

        assert!(log.update_last(MessageBody::Resolved("Done.".to_string())));
        assert!(!log.has_pending());
        assert_eq!(log.messages().len(), 2);
        assert_eq!(log.messages()[0].text(), "move gym to 6pm");
        assert_eq!(log.messages()[1].role, ChatRole::Model);
        assert_eq!(log.messages()[1].text(), "Done.");
    }

    #[test]
    fn update_last_only_fills_pending_entries() {
        let mut log = ChatLog::new();
        assert!(!log.update_last(MessageBody::Resolved("nothing here".to_string())));

        log.append(ChatMessage::user("hi"));
        assert!(!log.update_last(MessageBody::Resolved("overwritten".to_string())));
        assert_eq!(log.messages()[0].text(), "hi");

        log.append(ChatMessage::placeholder());
        assert!(log.update_last(MessageBody::Failed("boom".to_string())));
        assert!(!log.update_last(MessageBody::Resolved("late".to_string())));
        assert_eq!(log.messages()[1].text(), "Error: boom");
    }
}
