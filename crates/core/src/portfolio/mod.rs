pub mod allocation;
pub mod metrics;
pub mod overview;
pub mod performance;
pub mod snapshot;
pub mod valuation;
