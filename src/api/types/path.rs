//! Path extractor with errors in the shared JSON format

use axum::{
    extract::{FromRequestParts, Path as AxumPath},
    http::request::Parts,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Wrapper around `axum::extract::Path` whose rejection is a 422 JSON body
#[derive(Debug, Clone, Copy)]
pub struct Path<T>(pub T);

/// Path rejection in API error format
#[derive(Debug)]
pub struct PathRejection {
    message: String,
}

impl IntoResponse for PathRejection {
    fn into_response(self) -> Response {
        ApiError::invalid_path(self.message)
            .with_loc(["path"])
            .into_response()
    }
}

impl<S, T> FromRequestParts<S> for Path<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = PathRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match AxumPath::<T>::from_request_parts(parts, state).await {
            Ok(AxumPath(value)) => Ok(Path(value)),
            Err(rejection) => Err(PathRejection {
                message: rejection.body_text(),
            }),
        }
    }
}
