pub mod authentication;
pub mod food;
pub mod memory;
pub mod preference;
pub mod profile;
pub mod supabase;
