pub mod authentication;
pub mod common;
pub mod comparison;
pub mod favorite;
pub mod food;
pub mod preference;
pub mod profile;
pub mod scan;
pub mod search_history;
