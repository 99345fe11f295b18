use crate::domain::model::RecordId;
use crate::transport::http::error::ApiError;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

/// Unwraps the `{id}` path segment. A non-integer segment is a 400, decided here before any
/// lookup happens. An integer no identifier can take is simply a record that does not exist.
pub fn item_id(path: Result<Path<i64>, PathRejection>) -> Result<RecordId, ApiError> {
    let Path(id) = path?;
    RecordId::try_from(id).map_err(|_| ApiError::NotFound)
}

/// `201 Created` with an empty body and a `Location` header for the new item.
pub fn created(collection: &str, id: RecordId) -> Response {
    (
        StatusCode::CREATED,
        [(header::LOCATION, format!("/{}/{}", collection, id))],
    )
        .into_response()
}
