//! Where each user currently is in the game conversation
//!
//! Phases live in memory only. After a restart every user is idle again,
//! and `/start` picks up an unfinished game from the activity file.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// `/play` was sent, waiting for the word length
    AwaitingLength,
    /// A game is running, plain text is a guess
    Guessing,
}

/// Maps user_id -> phase; absent means idle
#[derive(Clone, Default)]
pub struct ConversationTracker {
    phases: Arc<Mutex<HashMap<u64, Phase>>>,
}

impl ConversationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn phase(&self, user_id: u64) -> Option<Phase> {
        self.phases.lock().await.get(&user_id).copied()
    }

    pub async fn set(&self, user_id: u64, phase: Phase) {
        self.phases.lock().await.insert(user_id, phase);
    }

    pub async fn clear(&self, user_id: u64) {
        self.phases.lock().await.remove(&user_id);
    }
}
