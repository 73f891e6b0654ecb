pub mod ports;
pub mod services;
pub mod value_objects;

pub use ports::PreferenceStore;
pub use value_objects::*;
