//! Conversation transcript
//!
//! Ordered record of every user message and assistant reply in a session.

use crate::models::MessageRole;
use crate::text::take_chars;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message in the conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationMessage {
    pub message_id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub role: MessageRole,
    pub content: String,
}

impl ConversationMessage {
    pub fn new(role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            message_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationHistory {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    messages: Vec<ConversationMessage>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            messages: Vec::new(),
        }
    }

    pub fn add_message(&mut self, message: ConversationMessage) {
        self.messages.push(message);
        self.updated_at = Utc::now();
    }

    pub fn push_user(&mut self, content: impl Into<String>) {
        self.add_message(ConversationMessage::new(MessageRole::User, content));
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.add_message(ConversationMessage::new(MessageRole::Assistant, content));
    }

    /// Iterate over all messages
    pub fn messages(&self) -> impl Iterator<Item = &ConversationMessage> {
        self.messages.iter()
    }

    /// The `count` most recent messages, oldest first.
    pub fn recent_messages(&self, count: usize) -> &[ConversationMessage] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Render the last `count` messages as `Role: text` lines, each message
    /// cut to `max_chars` characters.
    pub fn formatted_window(&self, count: usize, max_chars: usize) -> String {
        let mut context = String::new();
        for msg in self.recent_messages(count) {
            context.push_str(&format!(
                "{}: {}\n",
                msg.role,
                take_chars(&msg.content, max_chars)
            ));
        }
        context
    }
}

impl Default for ConversationHistory {
    fn default() -> Self {
        Self::new()
    }
}
