use crate::domain::model::{MovieReplace, NewMovie};
use crate::domain::schema::MovieView;
use crate::domain::MovieFilter;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{created, item_id};
use crate::transport::http::types::{ApiResponse, AppState, MovieListQuery};
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Json;

#[utoipa::path(
    get,
    path = "/movies/",
    params(MovieListQuery),
    responses(
        (status = 200, description = "Movies matching every supplied filter", body = [MovieView]),
        (status = 400, description = "Filter value is not an integer", body = ApiResponse)
    )
)]
pub async fn list_movies_handler(
    State(state): State<AppState>,
    query: Result<Query<MovieListQuery>, QueryRejection>,
) -> Result<Json<Vec<MovieView>>, ApiError> {
    let Query(query) = query?;
    let filter =
        MovieFilter::from_params(query.director_id.as_deref(), query.genre_id.as_deref())?;
    Ok(Json(state.catalog.list_movies(&filter).await?))
}

#[utoipa::path(
    post,
    path = "/movies/",
    request_body = NewMovie,
    responses(
        (status = 201, description = "Movie created; Location points at it"),
        (status = 422, description = "Body is not a movie object", body = ApiResponse)
    )
)]
pub async fn create_movie_handler(
    State(state): State<AppState>,
    body: Result<Json<NewMovie>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(new) = body?;
    let id = state.catalog.create_movie(new).await?;
    Ok(created("movies", id))
}

#[utoipa::path(
    get,
    path = "/movies/{id}",
    params(("id" = i64, Path, description = "Movie identifier")),
    responses(
        (status = 200, description = "Movie found", body = MovieView),
        (status = 400, description = "Identifier is not an integer", body = ApiResponse),
        (status = 404, description = "Not founded", body = String)
    )
)]
pub async fn get_movie_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<Json<MovieView>, ApiError> {
    let id = item_id(id)?;
    Ok(Json(state.catalog.retrieve_movie(id).await?))
}

/// Full replace: title, description, trailer and rating are overwritten, omitted ones with null.
#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(("id" = i64, Path, description = "Movie identifier")),
    request_body = MovieReplace,
    responses(
        (status = 204, description = "Movie replaced"),
        (status = 404, description = "Not founded", body = String),
        (status = 422, description = "Body is not a movie object", body = ApiResponse)
    )
)]
pub async fn replace_movie_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Result<Json<MovieReplace>, JsonRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    let Json(replace) = body?;
    state.catalog.replace_movie(id, replace).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = i64, Path, description = "Movie identifier")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 404, description = "Not founded", body = String)
    )
)]
pub async fn delete_movie_handler(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = item_id(id)?;
    state.catalog.delete_movie(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
