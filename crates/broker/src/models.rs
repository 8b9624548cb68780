//! Models of the brokerage API responses used by the dashboard.

use folioview_core::portfolio::overview::AccountsOverview;
use folioview_core::portfolio::snapshot::{HistoryPayload, PortfolioPayload};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::Result;

/// `GET /users/me`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub accounts: Vec<AccountSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSummary {
    pub account_number: String,
    #[serde(default, rename = "type")]
    pub account_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Snapshot and history of one account, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBundle {
    pub account: String,
    pub portfolio: Value,
    pub performance: Value,
}

impl AccountBundle {
    pub fn payloads(&self) -> Result<(PortfolioPayload, HistoryPayload)> {
        Ok((
            PortfolioPayload::from_json(&self.portfolio)?,
            HistoryPayload::from_json(&self.performance)?,
        ))
    }
}

/// Accounts of the user with totals across all of them.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountsListing {
    pub accounts: Vec<AccountSummary>,
    pub overview: AccountsOverview,
}
