use crate::domain::model::DirectorPayload;
use crate::domain::schema::DirectorView;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{created, item_id};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

#[utoipa::path(
    get,
    path = "/directors/",
    responses((status = 200, description = "All directors", body = [DirectorView]))
)]
pub async fn list_directors_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<DirectorView>>, ApiError> {
    Ok(Json(state.catalog.list_directors().await?))
}

#[utoipa::path(
    post,
    path = "/directors/",
    request_body = DirectorPayload,
    responses(
        (status = 201, description = "Director created; Location points at it"),
        (status = 422, description = "Body is not a director object", body = ApiResponse)
    )
)]
pub async fn create_director_handler(
    State(state): State<AppState>,
    body: Result<Json<DirectorPayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = body?;
    let id = state.catalog.create_director(payload).await?;
    Ok(created("directors", id))
}

#[utoipa::path(
    get,
    path = "/directors/{id}",
    params(("id" = i64, Path, description = "Director identifier")),
    responses(
        (status = 200, description = "Director found", body = DirectorView),
        (status = 400, description = "Identifier is not an integer", body = ApiResponse),
        (status = 404, description = "Not founded", body = String)
    )
)]
pub async fn get_director_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<DirectorView>, ApiError> {
    let id = item_id(id)?;
    Ok(Json(state.catalog.retrieve_director(id).await?))
}

#[utoipa::path(
    put,
    path = "/directors/{id}",
    params(("id" = i64, Path, description = "Director identifier")),
    request_body = DirectorPayload,
    responses(
        (status = 204, description = "Director replaced"),
        (status = 404, description = "Not founded", body = String),
        (status = 422, description = "Body is not a director object", body = ApiResponse)
    )
)]
pub async fn replace_director_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<DirectorPayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    let Json(payload) = body?;
    state.catalog.replace_director(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/directors/{id}",
    params(("id" = i64, Path, description = "Director identifier")),
    responses(
        (status = 204, description = "Director deleted; movies referencing it lose the reference"),
        (status = 404, description = "Not founded", body = String)
    )
)]
pub async fn delete_director_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    state.catalog.delete_director(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
