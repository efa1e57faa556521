//! Common test utilities
//!
//! This module is shared across all integration tests

use std::sync::Arc;

use chrono::{DateTime, FixedOffset, TimeZone};
use tempfile::TempDir;
use wordly_bot::game::{Vocabulary, VocabularySource};
use wordly_bot::storage::{ActivityStore, UserProfile};
use wordly_bot::telegram::WordlyService;

/// Four-letter words only, so every game is played with length 4
#[allow(dead_code)]
pub const FOUR_LETTER_WORDS: [&str; 5] = ["лось", "парк", "слон", "сова", "енот"];

pub fn test_vocabulary() -> Arc<Vocabulary> {
    let source = VocabularySource {
        words: FOUR_LETTER_WORDS.iter().map(|w| w.to_string()).collect(),
        ..Default::default()
    };
    Arc::new(Vocabulary::from_source(source, 0.0))
}

#[allow(dead_code)]
pub fn fixed_time() -> DateTime<FixedOffset> {
    wordly_bot::config::moscow_offset()
        .with_ymd_and_hms(2024, 5, 1, 12, 30, 0)
        .unwrap()
}

pub fn test_user(id: u64) -> UserProfile {
    UserProfile {
        id,
        is_bot: false,
        first_name: "Иван".to_string(),
        last_name: None,
        username: Some(format!("user{}", id)),
        language_code: Some("ru".to_string()),
        is_premium: false,
    }
}

/// Temp dir holding the activity file, plus a service with a fixed clock
#[allow(dead_code)]
pub struct TestEnvironment {
    pub dir: TempDir,
    pub store: Arc<ActivityStore>,
    pub service: WordlyService,
}

impl TestEnvironment {
    pub async fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ActivityStore::open(dir.path().join("user_activity.json")).await.unwrap());
        let service = Self::service_for(&store);
        Self { dir, store, service }
    }

    /// A fresh service over the same store, as after a restart
    pub fn service_for(store: &Arc<ActivityStore>) -> WordlyService {
        WordlyService::with_clock(test_vocabulary(), Arc::clone(store), Arc::new(fixed_time))
    }

    /// Secret of the stored game; panics when there is none
    #[allow(dead_code)]
    pub async fn secret(&self, user_id: u64) -> String {
        self.store.current_game(user_id).await.expect("game in progress").secret
    }

    /// Some vocabulary word that is not the secret
    #[allow(dead_code)]
    pub async fn wrong_word(&self, user_id: u64) -> String {
        let secret = self.secret(user_id).await;
        FOUR_LETTER_WORDS
            .iter()
            .find(|w| **w != secret)
            .map(|w| w.to_string())
            .unwrap()
    }
}
