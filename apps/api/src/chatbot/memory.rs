//! Conversation Memory — bounded FIFO history of recent turns, one buffer per
//! session.
//!
//! A session's buffer is behind an async mutex that the chat flow holds for the
//! whole request, so two in-flight questions on the same session cannot
//! interleave their turns. Memory lives for the process lifetime only; the
//! least recently used session is dropped once `MAX_SESSIONS` is reached.

use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::llm_client::ChatMessage;

/// Turns remembered per session; older turns are evicted first.
pub const MEMORY_CAPACITY: usize = 6;
/// Session used by clients that do not send a session id.
pub const DEFAULT_SESSION: &str = "default";
/// Sessions kept before the least recently used one is evicted.
pub const MAX_SESSIONS: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: TurnRole,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: TurnRole::Assistant,
            content: content.into(),
        }
    }
}

impl From<&ConversationTurn> for ChatMessage {
    fn from(turn: &ConversationTurn) -> Self {
        match turn.role {
            TurnRole::User => ChatMessage::user(turn.content.clone()),
            TurnRole::Assistant => ChatMessage::assistant(turn.content.clone()),
        }
    }
}

#[derive(Debug)]
pub struct MemoryBuffer {
    turns: VecDeque<ConversationTurn>,
    capacity: usize,
}

impl Default for MemoryBuffer {
    fn default() -> Self {
        Self::with_capacity(MEMORY_CAPACITY)
    }
}

impl MemoryBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            turns: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    /// Appends to the tail, evicting from the head past capacity.
    pub fn append(&mut self, turn: ConversationTurn) {
        self.turns.push_back(turn);
        while self.turns.len() > self.capacity {
            self.turns.pop_front();
        }
    }

    /// Current turns, oldest first.
    pub fn snapshot(&self) -> Vec<ConversationTurn> {
        self.turns.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }
}

/// Session-keyed conversation memory shared by all requests.
pub struct ConversationMemory {
    sessions: Mutex<LruCache<String, Arc<Mutex<MemoryBuffer>>>>,
}

impl Default for ConversationMemory {
    fn default() -> Self {
        Self::with_max_sessions(NonZeroUsize::new(MAX_SESSIONS).unwrap_or(NonZeroUsize::MIN))
    }
}

impl ConversationMemory {
    pub fn with_max_sessions(max_sessions: NonZeroUsize) -> Self {
        Self {
            sessions: Mutex::new(LruCache::new(max_sessions)),
        }
    }

    /// Returns the buffer for `session_id`, creating an empty one on first use.
    /// An evicted session starts over with an empty history.
    pub async fn session(&self, session_id: &str) -> Arc<Mutex<MemoryBuffer>> {
        let mut sessions = self.sessions.lock().await;
        if let Some(buffer) = sessions.get(session_id) {
            return buffer.clone();
        }
        let buffer = Arc::new(Mutex::new(MemoryBuffer::default()));
        sessions.put(session_id.to_string(), buffer.clone());
        buffer
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
