use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::payload::ContextPayload;
use crate::turn::ConversationTurn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// In-memory state of one conversation: its turns and the current file
/// context. Lives for the lifetime of the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationSession {
    pub id: SessionId,
    turns: Vec<ConversationTurn>,
    context: Option<ContextPayload>,
    pub created_at: DateTime<Utc>,
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            turns: Vec::new(),
            context: None,
            created_at: Utc::now(),
        }
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn add_turn(&mut self, turn: ConversationTurn) {
        self.turns.push(turn);
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }

    pub fn context(&self) -> Option<&ContextPayload> {
        self.context.as_ref()
    }

    /// Replace the current context, returning the one it displaced.
    pub fn set_context(&mut self, payload: ContextPayload) -> Option<ContextPayload> {
        self.context.replace(payload)
    }

    pub fn clear_context(&mut self) -> Option<ContextPayload> {
        self.context.take()
    }

    /// Drop all turns and the context.
    pub fn reset(&mut self) {
        self.turns.clear();
        self.context = None;
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty() && self.context.is_none()
    }
}
