use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::profile::entities::Profile;

/// A row of the `profiles` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<ProfileRow> for Profile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: row.id,
            name: row.nombre,
            avatar_url: row.avatar_url,
            updated_at: row.updated_at,
        }
    }
}

impl From<Profile> for ProfileRow {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            nombre: profile.name,
            avatar_url: profile.avatar_url,
            updated_at: profile.updated_at,
        }
    }
}
