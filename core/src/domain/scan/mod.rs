pub mod entities;
pub mod ports;
pub mod services;

pub use entities::{ScanGate, ScanOutcome, ScanPermit};
pub use ports::ScanService;
