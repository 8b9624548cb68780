use thiserror::Error;

pub type Result<T> = std::result::Result<T, BrokerError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BrokerError {
    /// The token cannot be used as a bearer credential.
    #[error("Invalid access token: {0}")]
    InvalidToken(String),

    /// Upstream answered with a non-success status.
    #[error("Error HTTP: {status} {message}")]
    Http { status: u16, message: String },

    #[error("Request failed: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl BrokerError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            BrokerError::InvalidToken(_) | BrokerError::Http { status: 401, .. }
        )
    }

    /// Upstream status, when there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            BrokerError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for BrokerError {
    fn from(err: reqwest::Error) -> Self {
        BrokerError::Network(err.to_string())
    }
}

impl From<serde_json::Error> for BrokerError {
    fn from(err: serde_json::Error) -> Self {
        BrokerError::Decode(err.to_string())
    }
}

impl From<folioview_core::Error> for BrokerError {
    fn from(err: folioview_core::Error) -> Self {
        BrokerError::Decode(err.to_string())
    }
}
