//! Folioview Core - performance reconstruction and dashboard assembly.
//!
//! This crate turns the raw portfolio and performance payloads of a brokerage
//! account into the series, tables and chart datasets of the dashboard. It is
//! synchronous and does no I/O; fetching lives in `folioview-broker`.

pub mod constants;
pub mod dashboard;
pub mod errors;
pub mod portfolio;
pub mod settings;
pub mod utils;

pub use dashboard::{build_dashboard, DashboardSession, DashboardView};
pub use portfolio::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
