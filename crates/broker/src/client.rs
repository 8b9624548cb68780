//! reqwest implementation of [`BrokerApiClient`] for the Indexa Capital API.

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use crate::errors::{BrokerError, Result};
use crate::models::UserInfo;
use crate::traits::{BrokerApiClient, BrokerClientFactory};

/// Default timeout for API requests.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.indexacapital.com";

/// Longest slice of a non-JSON error body kept in the error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, serde::Deserialize)]
struct ApiErrorResponse {
    #[serde(default)]
    details: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Human-readable reason of a failed upstream response.
///
/// Prefers the `details`, `message` or `error` field of a JSON body, then the
/// start of the raw body, then the status reason phrase.
pub fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(err) = serde_json::from_str::<ApiErrorResponse>(body) {
        if let Some(msg) = err.details.or(err.message).or(err.error) {
            return msg;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
}

/// HTTP client for the brokerage API, bound to one access token.
///
/// ```ignore
/// let client = IndexaApiClient::new("https://api.indexacapital.com", "token", Duration::from_secs(30))?;
/// let bundle = client.fetch_account_bundle("ABC12345").await?;
/// ```
#[derive(Debug, Clone)]
pub struct IndexaApiClient {
    client: reqwest::Client,
    base_url: String,
    auth_header: HeaderValue,
}

impl IndexaApiClient {
    pub fn new(base_url: &str, access_token: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BrokerError::Network(format!("Failed to initialize HTTP client: {}", e)))?;
        Self::with_client(client, base_url, access_token)
    }

    /// Shares an existing connection pool.
    pub fn with_client(client: reqwest::Client, base_url: &str, access_token: &str) -> Result<Self> {
        let token = access_token.trim();
        if token.is_empty() {
            return Err(BrokerError::InvalidToken("token is empty".to_string()));
        }
        let mut auth_header = HeaderValue::from_str(&format!("Bearer {}", token))
            .map_err(|e| BrokerError::InvalidToken(e.to_string()))?;
        auth_header.set_sensitive(true);

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_header,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(AUTHORIZATION, self.auth_header.clone());
        headers
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        debug!("[BrokerApi] GET {}", url);

        let response = self
            .client
            .get(&url)
            .headers(self.headers())
            .send()
            .await?;

        self.parse_response(response).await
    }

    async fn parse_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = error_message(status, &body);
            warn!("[BrokerApi] upstream answered {}: {}", status.as_u16(), message);
            return Err(BrokerError::Http {
                status: status.as_u16(),
                message,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }

    fn account_path(account: &str, resource: &str) -> String {
        format!("/accounts/{}/{}", urlencoding::encode(account), resource)
    }
}

#[async_trait]
impl BrokerApiClient for IndexaApiClient {
    async fn get_user_info(&self) -> Result<UserInfo> {
        self.get("/users/me").await
    }

    async fn get_portfolio(&self, account: &str) -> Result<Value> {
        self.get(&Self::account_path(account, "portfolio")).await
    }

    async fn get_performance(&self, account: &str) -> Result<Value> {
        self.get(&Self::account_path(account, "performance")).await
    }
}

/// Hands out [`IndexaApiClient`]s that share one connection pool.
#[derive(Debug, Clone)]
pub struct IndexaClientFactory {
    client: reqwest::Client,
    base_url: String,
}

impl IndexaClientFactory {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| BrokerError::Network(format!("Failed to initialize HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl BrokerClientFactory for IndexaClientFactory {
    fn for_token(&self, access_token: &str) -> Result<Arc<dyn BrokerApiClient>> {
        let client = IndexaApiClient::with_client(self.client.clone(), &self.base_url, access_token)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn test_client_creation() {
        let client = IndexaApiClient::new(DEFAULT_UPSTREAM_URL, "test-token", Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_url_normalization() {
        let client = IndexaApiClient::new("https://api.indexacapital.com/", "test-token", Duration::from_secs(5)).unwrap();
        assert_eq!(client.base_url(), "https://api.indexacapital.com");
    }

    #[test]
    fn test_empty_or_malformed_token_is_rejected() {
        let err = IndexaApiClient::new(DEFAULT_UPSTREAM_URL, "  ", Duration::from_secs(5)).unwrap_err();
        assert!(err.is_unauthorized());
        let err = IndexaApiClient::new(DEFAULT_UPSTREAM_URL, "bad\ntoken", Duration::from_secs(5)).unwrap_err();
        assert!(matches!(err, BrokerError::InvalidToken(_)));
    }

    #[test]
    fn test_account_path_is_encoded() {
        assert_eq!(
            IndexaApiClient::account_path("AB 12/3", "portfolio"),
            "/accounts/AB%2012%2F3/portfolio"
        );
    }

    #[test]
    fn test_error_message_prefers_details() {
        let body = r#"{"details":"Token expired","message":"Unauthorized"}"#;
        assert_eq!(error_message(StatusCode::UNAUTHORIZED, body), "Token expired");
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, r#"{"message":"Upstream down"}"#),
            "Upstream down"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_body_or_reason() {
        assert_eq!(error_message(StatusCode::NOT_FOUND, "no such account"), "no such account");
        assert_eq!(error_message(StatusCode::NOT_FOUND, ""), "Not Found");
        assert_eq!(error_message(StatusCode::FORBIDDEN, "{}"), "Forbidden");
    }

    #[test]
    fn test_factory_shares_base_url() {
        let factory = IndexaClientFactory::new("http://localhost:9000/", Duration::from_secs(5)).unwrap();
        assert_eq!(factory.base_url(), "http://localhost:9000");
        assert!(factory.for_token("abc").is_ok());
        assert!(factory.for_token("").is_err());
    }
}
