pub mod entities;
pub mod ports;
pub mod services;

pub use entities::RecentSearchList;
pub use ports::SearchHistoryService;
