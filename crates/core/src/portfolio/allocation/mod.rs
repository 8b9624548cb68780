//! Portfolio allocation module - per-component breakdown of the value series.

mod allocation_model;
mod component_decomposer;

pub use allocation_model::*;
pub use component_decomposer::*;
