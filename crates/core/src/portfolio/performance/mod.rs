pub mod history_table;
pub mod performance_model;
pub mod performance_service;
pub mod period_window;
pub mod projection_extender;
pub mod series_normalizer;

pub use history_table::build_returns;
pub use performance_model::*;
pub use performance_service::*;
pub use period_window::*;
pub use projection_extender::extend;
pub use series_normalizer::{normalize, normalize_json};

#[cfg(test)]
mod performance_service_tests;
#[cfg(test)]
mod period_window_tests;
#[cfg(test)]
mod series_normalizer_tests;
