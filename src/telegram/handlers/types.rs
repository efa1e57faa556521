//! Handler types and dependencies

use std::sync::Arc;

use teloxide::types::User;

use crate::storage::UserProfile;
use crate::telegram::activity_report::ActivityReporter;
use crate::telegram::service::WordlyService;

/// Error type for handlers
pub type HandlerError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Dependencies required by handlers
#[derive(Clone)]
pub struct HandlerDeps {
    pub service: Arc<WordlyService>,
    pub reporter: Option<Arc<ActivityReporter>>,
    pub admin_id: i64,
}

impl HandlerDeps {
    /// Create new handler dependencies
    pub fn new(service: Arc<WordlyService>, reporter: Option<Arc<ActivityReporter>>, admin_id: i64) -> Self {
        Self {
            service,
            reporter,
            admin_id,
        }
    }

    /// True for the configured admin; never true when no admin is set
    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_id != 0 && i64::try_from(user_id).is_ok_and(|id| id == self.admin_id)
    }
}

/// Extracts the profile fields recorded in the activity file
pub fn profile_from_user(user: &User) -> UserProfile {
    UserProfile {
        id: user.id.0,
        is_bot: user.is_bot,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
        language_code: user.language_code.clone(),
        is_premium: user.is_premium,
    }
}
