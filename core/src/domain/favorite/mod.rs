pub mod entities;
pub mod ports;
pub mod services;

pub use entities::FavoriteSet;
pub use ports::FavoriteService;
