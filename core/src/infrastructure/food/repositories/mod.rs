pub mod supabase_food_repository;

pub use supabase_food_repository::SupabaseFoodRepository;
