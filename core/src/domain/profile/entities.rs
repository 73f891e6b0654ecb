use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Public data of a signed-in user. `id` is the auth user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn empty(id: Uuid) -> Self {
        Self {
            id,
            name: None,
            avatar_url: None,
            updated_at: None,
        }
    }
}
