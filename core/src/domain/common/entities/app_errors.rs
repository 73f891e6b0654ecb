use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Local storage error: {0}")]
    StorageError(String),

    #[error("Not signed in")]
    Unauthenticated,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Internal server error")]
    InternalServerError,
}

impl CoreError {
    /// Failures caused by an unavailable backend or device storage. The
    /// operation may succeed if the user triggers it again.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            CoreError::ExternalServiceError(_) | CoreError::StorageError(_)
        )
    }
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();

        CoreError::Validation(messages.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(CoreError::ExternalServiceError("timeout".into()).is_transient());
        assert!(CoreError::StorageError("disk full".into()).is_transient());
        assert!(!CoreError::NotFound.is_transient());
        assert!(!CoreError::Validation("name is required".into()).is_transient());
    }

    #[test]
    fn test_error_display() {
        let err = CoreError::Conflict("barcode already registered".into());
        assert_eq!(err.to_string(), "Conflict: barcode already registered");
    }
}
