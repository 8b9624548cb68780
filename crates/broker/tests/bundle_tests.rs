//! Tests for the provided bundle and overview fetches of `BrokerApiClient`.

use async_trait::async_trait;
use folioview_broker::{AccountSummary, BrokerApiClient, BrokerError, Result, UserInfo};
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
struct MockBrokerClient {
    accounts: Vec<&'static str>,
    portfolios: HashMap<&'static str, Value>,
    performances: HashMap<&'static str, Value>,
    calls: AtomicUsize,
}

impl MockBrokerClient {
    fn with_account(mut self, account: &'static str, portfolio: Value, performance: Value) -> Self {
        self.accounts.push(account);
        self.portfolios.insert(account, portfolio);
        self.performances.insert(account, performance);
        self
    }
}

#[async_trait]
impl BrokerApiClient for MockBrokerClient {
    async fn get_user_info(&self) -> Result<UserInfo> {
        Ok(UserInfo {
            accounts: self
                .accounts
                .iter()
                .map(|a| AccountSummary {
                    account_number: a.to_string(),
                    ..AccountSummary::default()
                })
                .collect(),
            ..UserInfo::default()
        })
    }

    async fn get_portfolio(&self, account: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.portfolios.get(account).cloned().ok_or(BrokerError::Http {
            status: 404,
            message: "Not Found".to_string(),
        })
    }

    async fn get_performance(&self, account: &str) -> Result<Value> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.performances.get(account) {
            Some(Value::Null) => Err(BrokerError::Network("connection reset".to_string())),
            Some(value) => Ok(value.clone()),
            None => Err(BrokerError::Http {
                status: 404,
                message: "Not Found".to_string(),
            }),
        }
    }
}

#[tokio::test]
async fn test_bundle_contains_both_payloads() {
    let client = MockBrokerClient::default().with_account(
        "ACC1",
        json!({ "portfolio": { "total_amount": 100 } }),
        json!({ "volatility": 0.1 }),
    );
    let bundle = client.fetch_account_bundle("ACC1").await.unwrap();
    assert_eq!(bundle.account, "ACC1");
    assert_eq!(bundle.portfolio["portfolio"]["total_amount"], 100);
    assert_eq!(bundle.performance["volatility"], 0.1);
    assert_eq!(client.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_bundle_fails_when_either_half_fails() {
    let client = MockBrokerClient::default().with_account(
        "ACC1",
        json!({ "portfolio": { "total_amount": 100 } }),
        Value::Null,
    );
    let err = client.fetch_account_bundle("ACC1").await.unwrap_err();
    assert_eq!(err, BrokerError::Network("connection reset".to_string()));

    let err = client.fetch_account_bundle("MISSING").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(!err.is_unauthorized());
}

#[tokio::test]
async fn test_overview_aggregates_every_account() {
    let client = MockBrokerClient::default()
        .with_account(
            "ACC1",
            json!({ "portfolio": { "total_amount": 1000 }, "extra": { "amount_to_trade": 50 } }),
            json!({ "return": { "time_return_annual": "0.02" } }),
        )
        .with_account(
            "ACC2",
            json!({ "portfolio": { "total_amount": "2500" } }),
            json!({ "return": { "time_return_annual": "0.06" } }),
        );

    let listing = client.fetch_overview().await.unwrap();
    assert_eq!(listing.accounts.len(), 2);
    assert_eq!(listing.overview.account_count, 2);
    assert_eq!(listing.overview.total_value, dec!(3500));
    assert_eq!(listing.overview.total_contributions, dec!(50));
    assert_eq!(listing.overview.average_annual_return_pct, dec!(4));
}

#[tokio::test]
async fn test_overview_fails_on_non_object_payload() {
    let client = MockBrokerClient::default().with_account("ACC1", json!([1, 2]), json!({}));
    let err = client.fetch_overview().await.unwrap_err();
    assert!(matches!(err, BrokerError::Decode(_)));
}

#[tokio::test]
async fn test_overview_without_accounts() {
    let listing = MockBrokerClient::default().fetch_overview().await.unwrap();
    assert!(listing.accounts.is_empty());
    assert_eq!(listing.overview.total_value, dec!(0));
}
