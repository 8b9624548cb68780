use async_trait::async_trait;
use folioview_core::portfolio::overview::AccountsOverview;
use futures::future::try_join_all;
use log::debug;
use serde_json::Value;
use std::sync::Arc;

use crate::errors::Result;
use crate::models::{AccountBundle, AccountsListing, UserInfo};

/// Read access to the brokerage API on behalf of one user.
#[async_trait]
pub trait BrokerApiClient: Send + Sync {
    /// The user and the accounts they can see.
    async fn get_user_info(&self) -> Result<UserInfo>;

    /// Raw portfolio snapshot of `account`.
    async fn get_portfolio(&self, account: &str) -> Result<Value>;

    /// Raw performance history of `account`.
    async fn get_performance(&self, account: &str) -> Result<Value>;

    /// Snapshot and history issued concurrently. Fails if either fails.
    async fn fetch_account_bundle(&self, account: &str) -> Result<AccountBundle> {
        let (portfolio, performance) =
            tokio::try_join!(self.get_portfolio(account), self.get_performance(account))?;
        Ok(AccountBundle {
            account: account.to_string(),
            portfolio,
            performance,
        })
    }

    /// Every account of the user with the aggregated overview.
    async fn fetch_overview(&self) -> Result<AccountsListing> {
        let user = self.get_user_info().await?;
        debug!("Fetching bundles for {} accounts", user.accounts.len());

        let bundles = try_join_all(
            user.accounts
                .iter()
                .map(|account| self.fetch_account_bundle(&account.account_number)),
        )
        .await?;
        let payloads = bundles
            .iter()
            .map(AccountBundle::payloads)
            .collect::<Result<Vec<_>>>()?;

        Ok(AccountsListing {
            accounts: user.accounts,
            overview: AccountsOverview::aggregate(&payloads),
        })
    }
}

/// Builds a client bound to a caller's bearer token.
pub trait BrokerClientFactory: Send + Sync {
    fn for_token(&self, access_token: &str) -> Result<Arc<dyn BrokerApiClient>>;
}
