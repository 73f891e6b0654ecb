//! # NutriScan core
//!
//! Food lookup logic behind the NutriScan client: barcode resolution,
//! catalogue search, favorites and recent-search persistence, side-by-side
//! nutrient comparison, and the signed-in session.
//!
//! The crate follows a ports-and-adapters layout:
//!
//! - [`domain`] holds entities, the port traits the flows depend on, and the
//!   services implementing those flows on top of the ports.
//! - [`infrastructure`] provides adapters: the Supabase REST backend, a
//!   file-backed preference store, and in-memory backends.
//! - [`application`] wires the production adapters from a [`NutriConfig`].
//!
//! [`NutriConfig`]: domain::common::NutriConfig

pub mod application;
pub mod domain;
pub mod infrastructure;
