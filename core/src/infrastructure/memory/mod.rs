//! In-memory adapters for every port. They back the unit tests and can be
//! used to run the services without a backend. Cloning shares the state.

mod auth_client;
mod food_repository;
mod preference_store;
mod profile_repository;

use std::sync::{Mutex, MutexGuard, PoisonError};

pub use auth_client::InMemoryAuthClient;
pub use food_repository::InMemoryFoodRepository;
pub use preference_store::InMemoryPreferenceStore;
pub use profile_repository::InMemoryProfileRepository;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
