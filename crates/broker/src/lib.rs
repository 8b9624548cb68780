//! Folioview Broker - client for the brokerage account API.
//!
//! The dashboard needs two payloads per account (portfolio snapshot and
//! performance history). They are always fetched together and either both
//! arrive or the whole fetch fails.

pub mod client;
pub mod errors;
pub mod models;
pub mod traits;

pub use client::{IndexaApiClient, IndexaClientFactory, DEFAULT_UPSTREAM_URL};
pub use errors::{BrokerError, Result};
pub use models::{AccountBundle, AccountSummary, AccountsListing, UserInfo};
pub use traits::{BrokerApiClient, BrokerClientFactory};
