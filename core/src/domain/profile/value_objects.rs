use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::{common::entities::app_errors::CoreError, profile::entities::Profile};

#[derive(Debug, Clone, Default, Validate, Serialize, Deserialize)]
pub struct UpdateProfileInput {
    #[validate(length(max = 120, message = "name is too long"))]
    pub name: Option<String>,
    #[validate(url(message = "avatar_url must be a valid URL"))]
    pub avatar_url: Option<String>,
}

impl UpdateProfileInput {
    pub fn validated(mut self) -> Result<Self, CoreError> {
        if let Some(name) = &self.name {
            let name = name.trim();
            if name.is_empty() {
                return Err(CoreError::Validation("name cannot be empty".to_string()));
            }
            self.name = Some(name.to_string());
        }
        self.validate()?;

        Ok(self)
    }

    pub fn apply_to(self, profile: &mut Profile) {
        if let Some(name) = self.name {
            profile.name = Some(name);
        }
        if let Some(avatar_url) = self.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
    }
}
