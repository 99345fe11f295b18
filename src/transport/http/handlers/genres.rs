use crate::domain::model::GenrePayload;
use crate::domain::schema::GenreView;
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
    path = "/genres/",
    responses((status = 200, description = "All genres", body = [GenreView]))
)]
pub async fn list_genres_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<GenreView>>, ApiError> {
    Ok(Json(state.catalog.list_genres().await?))
}

#[utoipa::path(
    post,
    path = "/genres/",
    request_body = GenrePayload,
    responses(
        (status = 201, description = "Genre created; Location points at it"),
        (status = 422, description = "Body is not a genre object", body = ApiResponse)
    )
)]
pub async fn create_genre_handler(
    State(state): State<AppState>,
    body: Result<Json<GenrePayload>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(payload) = body?;
    let id = state.catalog.create_genre(payload).await?;
    Ok(created("genres", id))
}

#[utoipa::path(
    get,
    path = "/genres/{id}",
    params(("id" = i64, Path, description = "Genre identifier")),
    responses(
        (status = 200, description = "Genre found", body = GenreView),
        (status = 400, description = "Identifier is not an integer", body = ApiResponse),
        (status = 404, description = "Not founded", body = String)
    )
)]
pub async fn get_genre_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<GenreView>, ApiError> {
    let id = item_id(id)?;
    Ok(Json(state.catalog.retrieve_genre(id).await?))
}

#[utoipa::path(
    put,
    path = "/genres/{id}",
    params(("id" = i64, Path, description = "Genre identifier")),
    request_body = GenrePayload,
    responses(
        (status = 204, description = "Genre replaced"),
        (status = 404, description = "Not founded", body = String),
        (status = 422, description = "Body is not a genre object", body = ApiResponse)
    )
)]
pub async fn replace_genre_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<GenrePayload>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    let Json(payload) = body?;
    state.catalog.replace_genre(id, payload).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/genres/{id}",
    params(("id" = i64, Path, description = "Genre identifier")),
    responses(
        (status = 204, description = "Genre deleted; movies referencing it lose the reference"),
        (status = 404, description = "Not founded", body = String)
    )
)]
pub async fn delete_genre_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    state.catalog.delete_genre(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
