pub mod entities;
pub mod services;

pub use entities::{ComparisonRejection, ComparisonSet, MAX_COMPARED_FOODS};
pub use services::best_value_for;
