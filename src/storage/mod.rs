//! Persistent state: the activity file

pub mod activity;

// Re-exports for convenience
pub use activity::{ActivityData, ActivityStore, GlobalStats, UserProfile, UserRecord, UserStats};
