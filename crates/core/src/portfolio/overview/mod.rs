mod overview_model;

pub use overview_model::*;
