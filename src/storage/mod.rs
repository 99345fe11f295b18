//! Storage collaborator for the catalog.
//!
//! [`CatalogStore`] is the contract the service layer relies on: store-assigned unique
//! identifiers, nullable foreign-key columns without enforced integrity, and one transaction
//! per write. Two backends implement it.

pub mod memory;
pub mod postgres;

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

use crate::domain::model::{
    Director, DirectorPayload, Genre, GenrePayload, Movie, NewMovie, RecordId,
};
use crate::domain::MovieFilter;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Row counts per table, as reported by [`CatalogStore::counts`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub movies: i64,
    pub directors: i64,
    pub genres: i64,
}

#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Cheap connectivity probe.
    async fn ping(&self) -> StorageResult<()>;

    /// Creates the catalog tables if they do not exist yet.
    async fn ensure_schema(&self) -> StorageResult<()>;

    async fn counts(&self) -> StorageResult<TableCounts>;

    /// Movies satisfying every predicate of `filter`, in identifier order.
    async fn list_movies(&self, filter: &MovieFilter) -> StorageResult<Vec<Movie>>;
    async fn get_movie(&self, id: RecordId) -> StorageResult<Option<Movie>>;
    async fn insert_movie(&self, movie: NewMovie) -> StorageResult<Movie>;
    /// Writes every column of `movie` over the stored row. Returns false if the row is gone.
    async fn update_movie(&self, movie: &Movie) -> StorageResult<bool>;
    async fn delete_movie(&self, id: RecordId) -> StorageResult<bool>;

    async fn list_directors(&self) -> StorageResult<Vec<Director>>;
    async fn get_director(&self, id: RecordId) -> StorageResult<Option<Director>>;
    async fn insert_director(&self, payload: DirectorPayload) -> StorageResult<Director>;
    async fn update_director(&self, director: &Director) -> StorageResult<bool>;
    /// Deletes the director and clears `director_id` on every movie pointing at it.
    async fn delete_director(&self, id: RecordId) -> StorageResult<bool>;

    async fn list_genres(&self) -> StorageResult<Vec<Genre>>;
    async fn get_genre(&self, id: RecordId) -> StorageResult<Option<Genre>>;
    async fn insert_genre(&self, payload: GenrePayload) -> StorageResult<Genre>;
    async fn update_genre(&self, genre: &Genre) -> StorageResult<bool>;
    /// Deletes the genre and clears `genre_id` on every movie pointing at it.
    async fn delete_genre(&self, id: RecordId) -> StorageResult<bool>;
}
