//! Error responses in the `{"detail": [...]}` shape clients expect

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::user::FieldError;
use crate::domain::DomainError;
use crate::infrastructure::user::UserUpdateError;

/// Machine-readable error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorType {
    /// A field rule rejected a value
    ValueError,
    /// The body was not valid JSON or did not have the expected shape
    JsonInvalid,
    /// A path parameter could not be parsed
    PathInvalid,
    StorageError,
    ServerError,
}

impl std::fmt::Display for ApiErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValueError => write!(f, "value_error"),
            Self::JsonInvalid => write!(f, "json_invalid"),
            Self::PathInvalid => write!(f, "path_invalid"),
            Self::StorageError => write!(f, "storage_error"),
            Self::ServerError => write!(f, "server_error"),
        }
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub detail: Vec<ApiErrorDetail>,
}

/// One reported problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorDetail {
    /// Location of the problem, e.g. `["body", "email"]`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: ApiErrorType,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub response: ApiErrorResponse,
}

impl ApiError {
    /// Create a new API error
    pub fn new(status: StatusCode, error_type: ApiErrorType, message: impl Into<String>) -> Self {
        Self {
            status,
            response: ApiErrorResponse {
                detail: vec![ApiErrorDetail {
                    loc: Vec::new(),
                    msg: message.into(),
                    error_type,
                }],
            },
        }
    }

    /// Attach the location of the problem
    pub fn with_loc<I, S>(mut self, loc: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Some(detail) = self.response.detail.first_mut() {
            detail.loc = loc.into_iter().map(Into::into).collect();
        }
        self
    }

    /// 422 for a value rejected by a field rule
    pub fn value_error(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::ValueError,
            message,
        )
    }

    /// 422 for an unreadable request body
    pub fn invalid_json(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::JsonInvalid,
            message,
        )
    }

    /// 422 for an unparseable path parameter
    pub fn invalid_path(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorType::PathInvalid,
            message,
        )
    }

    /// Storage failure
    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::StorageError,
            message,
        )
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            ApiErrorType::ServerError,
            message,
        )
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.response)).into_response()
    }
}

impl From<FieldError> for ApiError {
    fn from(err: FieldError) -> Self {
        Self::value_error(err.message()).with_loc(["body", err.field()])
    }
}

impl From<UserUpdateError> for ApiError {
    fn from(err: UserUpdateError) -> Self {
        match err {
            UserUpdateError::Invalid(e) => e.into(),
            UserUpdateError::Storage(e) => e.into(),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::Storage { message } => {
                error!(error = %message, "Storage operation failed");
                Self::storage("Storage operation failed")
            }
            DomainError::Configuration { message } => {
                error!(error = %message, "Internal error");
                Self::internal("Internal server error")
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.response.detail.first() {
            Some(detail) => write!(f, "{}: {}", detail.error_type, detail.msg),
            None => write!(f, "{}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}
