//! Portfolio snapshot module - upstream payloads and composition extraction.

pub mod component_extractors;
mod snapshot_model;

pub use component_extractors::*;
pub use snapshot_model::*;
