use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::{NoContext, Timestamp, Uuid};

pub mod entities;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub const DEFAULT_RECENT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_SEARCH_RESULT_LIMIT: u32 = 20;
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;

#[derive(Clone, Debug)]
pub struct NutriConfig {
    pub supabase: SupabaseConfig,
    pub preferences: PreferencesConfig,
    pub search: SearchConfig,
}

#[derive(Clone, Debug)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct PreferencesConfig {
    pub directory: PathBuf,
}

#[derive(Clone, Debug)]
pub struct SearchConfig {
    pub debounce_ms: u64,
    pub recent_limit: usize,
    pub result_limit: u32,
}

impl SearchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_SEARCH_DEBOUNCE_MS,
            recent_limit: DEFAULT_RECENT_SEARCH_LIMIT,
            result_limit: DEFAULT_SEARCH_RESULT_LIMIT,
        }
    }
}

pub fn generate_timestamp() -> (DateTime<Utc>, Timestamp) {
    let now = Utc::now();
    let seconds = now.timestamp().try_into().unwrap_or(0);
    let timestamp = Timestamp::from_unix(NoContext, seconds, now.timestamp_subsec_nanos());

    (now, timestamp)
}

pub fn generate_uuid_v7() -> Uuid {
    let (_, timestamp) = generate_timestamp();
    Uuid::new_v7(timestamp)
}
