//! User CRUD endpoints under `/user`

use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Path, UserReply};
use crate::domain::user::{UserCandidate, UserId, UserPatch};
use crate::infrastructure::user::UserServiceError;

const USER_ABSENT: &str = "Пользователя нет в базе!";
const USER_ADDED: &str = "Пользователь добавлен!";
const USER_INCOMPLETE: &str = "Проблемы с добавлением пользователя!";

fn user_not_found(id: i64) -> String {
    format!("Пользователь с ID: {} не найден!", id)
}

fn user_updated(id: i64) -> String {
    format!("Данные пользователя с ID: {} изменены!", id)
}

fn user_deleted(id: i64) -> String {
    format!("Пользователь с ID: {} удалён!", id)
}

/// Create the `/user` router
pub fn create_user_router() -> Router<AppState> {
    Router::new()
        .route("/get_user/{user_id}", get(get_user))
        .route("/add_user", post(add_user))
        .route("/update_user/{user_id}", put(update_user))
        .route("/delete_user/{user_id}", delete(delete_user))
}

/// GET /user/get_user/{user_id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<UserReply, ApiError> {
    debug!(user_id, "Getting user");

    let reply = match state.user_service.get(UserId::new(user_id)).await? {
        Some(user) => UserReply::user(&user),
        None => UserReply::not_found(USER_ABSENT),
    };

    Ok(reply)
}

/// POST /user/add_user
pub async fn add_user(
    State(state): State<AppState>,
    Json(candidate): Json<UserCandidate>,
) -> Result<UserReply, ApiError> {
    debug!("Adding user");

    match state.user_service.add(&candidate).await {
        Ok(user) => Ok(UserReply::ok(USER_ADDED).with_id(user.id().value())),
        Err(UserServiceError::Incomplete) => Ok(UserReply::new(
            axum::http::StatusCode::UNPROCESSABLE_ENTITY,
            USER_INCOMPLETE,
        )),
        Err(UserServiceError::Invalid(e)) => Err(e.into()),
        Err(UserServiceError::Storage(e)) => Err(e.into()),
    }
}

/// PUT /user/update_user/{user_id}
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(patch): Json<UserPatch>,
) -> Result<UserReply, ApiError> {
    debug!(user_id, "Updating user");

    let reply = match state.user_service.update(UserId::new(user_id), &patch).await? {
        Some(_) => UserReply::ok(user_updated(user_id)),
        None => UserReply::not_found(user_not_found(user_id)),
    };

    Ok(reply)
}

/// DELETE /user/delete_user/{user_id}
pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<UserReply, ApiError> {
    debug!(user_id, "Deleting user");

    let reply = if state.user_service.delete(UserId::new(user_id)).await? {
        UserReply::ok(user_deleted(user_id))
    } else {
        UserReply::not_found(user_not_found(user_id))
    };

    Ok(reply)
}
