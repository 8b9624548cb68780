use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folioview_broker::BrokerError;
use folioview_core::errors::Error as CoreError;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Core(#[from] CoreError),
    #[error("{0}")]
    Broker(#[from] BrokerError),
    #[error("Not Found")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("Selection {generation} was superseded by {latest}")]
    Superseded { generation: u64, latest: u64 },
    #[error("Session expired before the selection completed")]
    SessionExpired,
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Core(e) => match e {
                CoreError::Payload(_) => StatusCode::BAD_GATEWAY,
                CoreError::Validation(_) | CoreError::InvalidConfigValue(_) => {
                    StatusCode::BAD_REQUEST
                }
            },
            ApiError::Broker(e) if e.is_unauthorized() => StatusCode::UNAUTHORIZED,
            ApiError::Broker(_) => StatusCode::BAD_GATEWAY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Superseded { .. } | ApiError::SessionExpired => StatusCode::CONFLICT,
            ApiError::Internal(_) | ApiError::Anyhow(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }
        let body = Json(ErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
