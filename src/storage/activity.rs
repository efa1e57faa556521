//! Activity file (`user_activity.json`): user profiles, statistics and unfinished games
//!
//! The whole file is held in memory behind one async mutex and rewritten
//! after every change, so each read-modify-write is atomic with respect to
//! concurrent updates.

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::ser::{Error as _, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use crate::core::error::AppResult;
use crate::game::Game;

/// Telegram user fields the bot records
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: u64,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    pub is_premium: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserStats {
    pub games_played: u64,
    pub wins: u64,
    pub losses: u64,
}

impl UserStats {
    /// Share of won games in percent, 0 when nothing was played
    pub fn win_percent(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.games_played as f64 * 100.0
        }
    }
}

/// Reads `null` as the type's default; older files store `"is_premium": null`
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub is_bot: bool,
    pub language_code: Option<String>,
    pub stats: UserStats,
    pub last_name: Option<String>,
    pub username: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub is_premium: bool,
    pub last_seen_msk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_game: Option<Game>,
    /// Fields written by other tools survive a rewrite
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserRecord {
    fn new(profile: &UserProfile) -> Self {
        Self {
            first_name: profile.first_name.clone(),
            id: profile.id,
            is_bot: profile.is_bot,
            language_code: profile.language_code.clone(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalStats {
    pub total_games: u64,
    pub total_wins: u64,
    pub total_losses: u64,
    pub win_rate: f64,
}

impl GlobalStats {
    fn record(&mut self, won: bool) {
        self.total_games += 1;
        if won {
            self.total_wins += 1;
        } else {
            self.total_losses += 1;
        }
        self.win_rate = self.total_wins as f64 / self.total_games as f64;
    }
}

/// Root of the activity file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ActivityData {
    pub users: BTreeMap<String, UserRecord>,
    pub global: GlobalStats,
    /// User entries that do not fit `UserRecord`, written back untouched
    #[serde(skip)]
    pub unparsed_users: BTreeMap<String, Value>,
}

impl Serialize for ActivityData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut users: Map<String, Value> = self
            .unparsed_users
            .iter()
            .map(|(uid, raw)| (uid.clone(), raw.clone()))
            .collect();
        for (uid, record) in &self.users {
            users.insert(uid.clone(), serde_json::to_value(record).map_err(S::Error::custom)?);
        }

        let mut root = serializer.serialize_struct("ActivityData", 2)?;
        root.serialize_field("users", &users)?;
        root.serialize_field("global", &self.global)?;
        root.end()
    }
}

impl ActivityData {
    /// Like [`ActivityData::parse_lenient`], for raw file bytes that may not be UTF-8.
    pub fn parse_lenient_bytes(raw: &[u8]) -> Self {
        match std::str::from_utf8(raw) {
            Ok(raw) => Self::parse_lenient(raw),
            Err(e) => {
                log::warn!("Activity file is not valid UTF-8 ({}), starting from an empty store", e);
                Self::default()
            }
        }
    }

    /// Parses the file contents, falling back to an empty store on anything malformed.
    ///
    /// A user entry that does not fit the record shape is kept aside as raw
    /// JSON instead of discarding every other user.
    pub fn parse_lenient(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        let value: Value = match serde_json::from_str(raw) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("Activity file is not valid JSON ({}), starting from an empty store", e);
                return Self::default();
            }
        };

        let Value::Object(mut root) = value else {
            log::warn!("Activity file root is not an object, starting from an empty store");
            return Self::default();
        };

        let (Some(Value::Object(users)), Some(Value::Object(global))) = (root.remove("users"), root.remove("global"))
        else {
            log::warn!("Activity file lacks 'users'/'global' objects, starting from an empty store");
            return Self::default();
        };

        let global = serde_json::from_value(Value::Object(global)).unwrap_or_else(|e| {
            log::warn!("Malformed 'global' section in activity file: {}", e);
            GlobalStats::default()
        });

        let mut parsed = BTreeMap::new();
        let mut unparsed_users = BTreeMap::new();
        for (uid, raw) in users {
            match serde_json::from_value::<UserRecord>(raw.clone()) {
                Ok(record) => {
                    parsed.insert(uid, record);
                }
                Err(e) => {
                    log::warn!("Keeping unreadable activity record for user {} as is: {}", uid, e);
                    unparsed_users.insert(uid, raw);
                }
            }
        }

        Self {
            users: parsed,
            global,
            unparsed_users,
        }
    }

    /// The user's record, created from `profile` on first sight
    fn record_for(&mut self, profile: &UserProfile) -> &mut UserRecord {
        let uid = profile.id.to_string();
        if !self.users.contains_key(&uid) && self.unparsed_users.remove(&uid).is_some() {
            log::warn!("Replacing unreadable activity record for user {}", uid);
        }
        self.users.entry(uid).or_insert_with(|| UserRecord::new(profile))
    }

    fn user_mut(&mut self, user_id: u64) -> Option<&mut UserRecord> {
        self.users.get_mut(&user_id.to_string())
    }
}

/// Formats a timestamp the way `last_seen_msk` is stored
pub fn format_last_seen(now: DateTime<FixedOffset>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

pub struct ActivityStore {
    path: PathBuf,
    data: Mutex<ActivityData>,
}

impl ActivityStore {
    /// Opens the store; a missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();
        let data = match fs_err::tokio::read(&path).await {
            Ok(raw) => ActivityData::parse_lenient_bytes(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Activity file {} not found, starting fresh", path.display());
                ActivityData::default()
            }
            Err(e) => return Err(e.into()),
        };

        log::info!(
            "Activity store opened: {} users, {} games played",
            data.users.len(),
            data.global.total_games
        );

        Ok(Self {
            path,
            data: Mutex::new(data),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `f` to a copy of the data and keeps it only once it is on disk.
    async fn update<R>(&self, f: impl FnOnce(&mut ActivityData) -> R) -> AppResult<R> {
        let mut data = self.data.lock().await;
        let mut next = data.clone();
        let result = f(&mut next);
        persist(&self.path, &next).await?;
        *data = next;
        Ok(result)
    }

    /// Creates the user on first sight, then refreshes the profile fields.
    pub async fn touch_user(&self, profile: &UserProfile, now: DateTime<FixedOffset>) -> AppResult<()> {
        self.update(|data| {
            let record = data.record_for(profile);
            record.first_name = profile.first_name.clone();
            record.last_name = profile.last_name.clone();
            record.username = profile.username.clone();
            record.is_premium = profile.is_premium;
            record.last_seen_msk = Some(format_last_seen(now));
        })
        .await
    }

    pub async fn current_game(&self, user_id: u64) -> Option<Game> {
        let data = self.data.lock().await;
        data.users
            .get(&user_id.to_string())
            .and_then(|record| record.current_game.clone())
    }

    /// Starts a new game, replacing any unfinished one.
    pub async fn start_game(&self, profile: &UserProfile, secret: &str) -> AppResult<Game> {
        let game = Game::new(secret);
        let stored = game.clone();
        self.update(move |data| {
            data.record_for(profile).current_game = Some(stored);
        })
        .await?;
        Ok(game)
    }

    /// Stores the progress of an unfinished game.
    pub async fn save_game(&self, user_id: u64, game: &Game) -> AppResult<()> {
        self.update(|data| {
            if let Some(record) = data.user_mut(user_id) {
                record.current_game = Some(game.clone());
            }
        })
        .await
    }

    /// Counts the finished game in user and global statistics and removes it.
    pub async fn finish_game(&self, user_id: u64, won: bool) -> AppResult<()> {
        self.update(|data| {
            if let Some(record) = data.user_mut(user_id) {
                record.current_game = None;
                record.stats.games_played += 1;
                if won {
                    record.stats.wins += 1;
                } else {
                    record.stats.losses += 1;
                }
            }
            data.global.record(won);
        })
        .await
    }

    /// Drops an unfinished game without counting it. Returns whether one existed.
    pub async fn abandon_game(&self, user_id: u64) -> AppResult<bool> {
        {
            let data = self.data.lock().await;
            let has_game = data
                .users
                .get(&user_id.to_string())
                .is_some_and(|record| record.current_game.is_some());
            if !has_game {
                return Ok(false);
            }
        }

        self.update(|data| {
            data.user_mut(user_id)
                .and_then(|record| record.current_game.take())
                .is_some()
        })
        .await
    }

    pub async fn user_stats(&self, user_id: u64) -> Option<UserStats> {
        let data = self.data.lock().await;
        data.users.get(&user_id.to_string()).map(|record| record.stats)
    }

    pub async fn global_stats(&self) -> GlobalStats {
        self.data.lock().await.global
    }

    pub async fn snapshot(&self) -> ActivityData {
        self.data.lock().await.clone()
    }
}

/// Writes the store next to its final location and renames it into place.
async fn persist(path: &Path, data: &ActivityData) -> AppResult<()> {
    let json = serde_json::to_string_pretty(data)?;

    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    fs_err::tokio::write(&tmp, json.as_bytes()).await.map_err(|e| {
        log::error!("Failed to write activity file {}: {}", tmp.display(), e);
        e
    })?;
    fs_err::tokio::rename(&tmp, path).await.map_err(|e| {
        log::error!("Failed to replace activity file {}: {}", path.display(), e);
        e
    })?;
    Ok(())
}
