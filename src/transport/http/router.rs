use crate::domain::model::{DirectorPayload, GenrePayload, MovieReplace, NewMovie};
use crate::domain::schema::{DirectorView, GenreView, MovieView};
use crate::transport::http::handlers::{directors, genres, health, movies};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        movies::list_movies_handler,
        movies::create_movie_handler,
        movies::get_movie_handler,
        movies::replace_movie_handler,
        movies::delete_movie_handler,
        directors::list_directors_handler,
        directors::create_director_handler,
        directors::get_director_handler,
        directors::replace_director_handler,
        directors::delete_director_handler,
        genres::list_genres_handler,
        genres::create_genre_handler,
        genres::get_genre_handler,
        genres::replace_genre_handler,
        genres::delete_genre_handler
    ),
    components(schemas(
        ApiResponse,
        NewMovie,
        MovieReplace,
        MovieView,
        DirectorPayload,
        DirectorView,
        GenrePayload,
        GenreView
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    let movies_collection = get(movies::list_movies_handler).post(movies::create_movie_handler);
    let directors_collection =
        get(directors::list_directors_handler).post(directors::create_director_handler);
    let genres_collection =
        get(genres::list_genres_handler).post(genres::create_genre_handler);

    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/movies", movies_collection.clone())
        .route("/movies/", movies_collection)
        .route(
            "/movies/:id",
            get(movies::get_movie_handler)
                .put(movies::replace_movie_handler)
                .delete(movies::delete_movie_handler),
        )
        .route("/directors", directors_collection.clone())
        .route("/directors/", directors_collection)
        .route(
            "/directors/:id",
            get(directors::get_director_handler)
                .put(directors::replace_director_handler)
                .delete(directors::delete_director_handler),
        )
        .route("/genres", genres_collection.clone())
        .route("/genres/", genres_collection)
        .route(
            "/genres/:id",
            get(genres::get_genre_handler)
                .put(genres::replace_genre_handler)
                .delete(genres::delete_genre_handler),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
