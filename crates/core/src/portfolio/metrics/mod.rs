mod metrics_model;

pub use metrics_model::*;
