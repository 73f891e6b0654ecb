pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use entities::{AuthUser, Session, SignUpOutcome};
pub use ports::{AuthClient, AuthService};
pub use value_objects::{SignInInput, SignUpInput};
