pub const FAVORITES_KEY: &str = "favorites";
pub const RECENT_SEARCHES_KEY: &str = "recent_searches";
pub const SESSION_KEY: &str = "session";
