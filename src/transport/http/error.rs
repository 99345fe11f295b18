use crate::app::ServiceError;
use crate::domain::FilterError;
use crate::storage::StorageError;
use crate::transport::http::types::{ApiResponse, NOT_FOUND_BODY};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not founded")]
    NotFound,
    #[error("{0}")]
    BadRequest(String),
    #[error("Invalid JSON body: {0}")]
    UnprocessableEntity(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnprocessableEntity(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound => ApiError::NotFound,
            ServiceError::Storage(e) => ApiError::Storage(e),
        }
    }
}

impl From<FilterError> for ApiError {
    fn from(err: FilterError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(err: PathRejection) -> Self {
        ApiError::BadRequest(format!("Invalid identifier: {}", err.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(err: QueryRejection) -> Self {
        ApiError::BadRequest(err.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        ApiError::UnprocessableEntity(err.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::NotFound => (status, Json(NOT_FOUND_BODY)).into_response(),
            ApiError::Storage(e) => {
                tracing::error!(error = %e, "storage failure");
                (
                    status,
                    Json(ApiResponse {
                        success: false,
                        data: None,
                        error: Some("Internal storage error".to_string()),
                    }),
                )
                    .into_response()
            }
            other => {
                tracing::debug!(error = %other, %status, "request rejected");
                (
                    status,
                    Json(ApiResponse {
                        success: false,
                        data: None,
                        error: Some(other.to_string()),
                    }),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses() {
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::UnprocessableEntity("x".to_string()).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::Storage(StorageError::Database(sqlx::Error::PoolTimedOut)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn filter_errors_become_bad_requests() {
        let err: ApiError = FilterError::InvalidValue {
            param: "genre_id",
            value: "x".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("genre_id"));
    }
}
