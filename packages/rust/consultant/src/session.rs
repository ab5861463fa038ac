//! Caller-owned conversation state.

use serde::{Deserialize, Serialize};

/// Who spoke a turn, using the model API's role names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub text: String,
}

/// Transcript of one consultant conversation.
///
/// The caller owns it (a CLI loop, or a browser round-tripping it through
/// the HTTP API) and passes it into every
/// [`ConsultantClient::send_message`](crate::ConsultantClient::send_message) call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatSession {
    turns: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Forget the conversation.
    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Record a completed exchange.
    pub(crate) fn push_exchange(&mut self, user: &str, reply: &str) {
        self.turns.push(ChatTurn {
            role: Role::User,
            text: user.to_string(),
        });
        self.turns.push(ChatTurn {
            role: Role::Model,
            text: reply.to_string(),
        });
    }
}
