pub mod supabase_profile_repository;

pub use supabase_profile_repository::SupabaseProfileRepository;
