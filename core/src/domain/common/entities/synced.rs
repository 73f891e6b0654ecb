use crate::domain::common::entities::app_errors::CoreError;

/// What happened to the local store after an in-memory mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Persistence {
    /// Nothing changed, nothing was written.
    Unchanged,
    Committed,
    /// The store still holds the old value: either the write failed after
    /// memory moved on, or the store could not be read and nothing changed.
    Failed(CoreError),
}

/// The state after a local mutation together with the outcome of writing it
/// back. Memory is never rolled back on a failed write; callers decide
/// whether to retry or warn.
#[derive(Debug, Clone, PartialEq)]
pub struct Synced<T> {
    pub value: T,
    pub persistence: Persistence,
}

impl<T> Synced<T> {
    pub fn unchanged(value: T) -> Self {
        Self {
            value,
            persistence: Persistence::Unchanged,
        }
    }

    pub fn failed(value: T, error: CoreError) -> Self {
        Self {
            value,
            persistence: Persistence::Failed(error),
        }
    }

    pub fn from_write(value: T, write: Result<(), CoreError>) -> Self {
        let persistence = match write {
            Ok(()) => Persistence::Committed,
            Err(e) => Persistence::Failed(e),
        };

        Self { value, persistence }
    }

    pub fn is_persisted(&self) -> bool {
        !matches!(self.persistence, Persistence::Failed(_))
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}
