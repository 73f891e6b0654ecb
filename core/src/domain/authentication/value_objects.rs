use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::common::entities::app_errors::CoreError;

#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct SignInInput {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

impl SignInInput {
    /// Trims the e-mail and checks the form before anything is sent.
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.email = self.email.trim().to_string();
        self.validate()?;

        Ok(self)
    }
}

#[derive(Debug, Clone, Validate, Serialize, Deserialize)]
pub struct SignUpInput {
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub password_confirmation: String,
}

impl SignUpInput {
    pub fn validated(mut self) -> Result<Self, CoreError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(CoreError::Validation("name is required".to_string()));
        }
        self.email = self.email.trim().to_string();
        self.validate()?;

        Ok(self)
    }
}
