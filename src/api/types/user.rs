//! Response envelope for the user endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::User;

/// Stored user as returned to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i32,
    pub salary: f64,
    pub email: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            first_name: user.first_name().to_string(),
            last_name: user.last_name().to_string(),
            age: user.age(),
            salary: user.salary(),
            email: user.email().to_string(),
        }
    }
}

/// Either a user record or a human-readable message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReplyMessage {
    User(UserResponse),
    Text(String),
}

/// `{message, status_code}` envelope; the HTTP status mirrors `status_code`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserReply {
    pub message: ReplyMessage,
    pub status_code: u16,
    /// Id of the record an add created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl UserReply {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: ReplyMessage::Text(message.into()),
            status_code: status.as_u16(),
            id: None,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn user(user: &User) -> Self {
        Self {
            message: ReplyMessage::User(UserResponse::from(user)),
            status_code: StatusCode::OK.as_u16(),
            id: None,
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for UserReply {
    fn into_response(self) -> Response {
        (self.status(), Json(self)).into_response()
    }
}
