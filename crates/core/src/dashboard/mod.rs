//! Dashboard assembly - turns the two upstream payloads into everything the
//! front end renders, and tracks which selection a session is showing.

mod chart;
mod dashboard_model;
mod dashboard_service;
mod generation;
mod session;

pub use chart::*;
pub use dashboard_model::*;
pub use dashboard_service::*;
pub use generation::*;
pub use session::*;
