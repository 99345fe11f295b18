//! Collection and item operations for movies, directors and genres.
//!
//! Every operation runs against the injected [`CatalogStore`] and returns records already
//! projected through their wire schema. Lookups that find nothing produce
//! [`ServiceError::NotFound`]; storage faults are passed through untouched.

use crate::domain::model::{
    Director, DirectorPayload, Genre, GenrePayload, Movie, MovieReplace, NewMovie, RecordId,
};
use crate::domain::schema::{
    DirectorSchema, DirectorView, GenreSchema, GenreView, MovieSchema, MovieView, Schema,
};
use crate::domain::MovieFilter;
use crate::storage::{CatalogStore, StorageError};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("record not found")]
    NotFound,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

fn found<T>(family: &'static str, id: RecordId, record: Option<T>) -> ServiceResult<T> {
    match record {
        Some(record) => {
            tracing::debug!(family, id, "record found");
            Ok(record)
        }
        None => {
            tracing::warn!(family, id, "record not found");
            Err(ServiceError::NotFound)
        }
    }
}

fn affected(family: &'static str, id: RecordId, ok: bool) -> ServiceResult<()> {
    if ok {
        Ok(())
    } else {
        tracing::warn!(family, id, "no row affected, record not found");
        Err(ServiceError::NotFound)
    }
}

#[derive(Clone)]
pub struct CatalogService {
    store: Arc<dyn CatalogStore>,
}

impl CatalogService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    // --- movies ---

    pub async fn list_movies(&self, filter: &MovieFilter) -> ServiceResult<Vec<MovieView>> {
        let movies = self.store.list_movies(filter).await?;
        tracing::debug!(?filter, count = movies.len(), "listed movies");
        Ok(MovieSchema::dump_many(&movies))
    }

    pub async fn create_movie(&self, new: NewMovie) -> ServiceResult<RecordId> {
        let movie = self.store.insert_movie(new).await?;
        tracing::info!(id = movie.id, "movie created");
        Ok(movie.id)
    }

    pub async fn retrieve_movie(&self, id: RecordId) -> ServiceResult<MovieView> {
        let movie = self.store.get_movie(id).await?;
        found("movie", id, MovieSchema::dump(movie.as_ref()))
    }

    /// Overwrites title, description, trailer and rating. Fields missing from `replace`
    /// become null.
    pub async fn replace_movie(&self, id: RecordId, replace: MovieReplace) -> ServiceResult<()> {
        let mut movie: Movie = found("movie", id, self.store.get_movie(id).await?)?;
        movie.apply_replace(replace);
        affected("movie", id, self.store.update_movie(&movie).await?)?;
        tracing::info!(id, "movie replaced");
        Ok(())
    }

    pub async fn delete_movie(&self, id: RecordId) -> ServiceResult<()> {
        affected("movie", id, self.store.delete_movie(id).await?)?;
        tracing::info!(id, "movie deleted");
        Ok(())
    }

    // --- directors ---

    pub async fn list_directors(&self) -> ServiceResult<Vec<DirectorView>> {
        let directors = self.store.list_directors().await?;
        tracing::debug!(count = directors.len(), "listed directors");
        Ok(DirectorSchema::dump_many(&directors))
    }

    pub async fn create_director(&self, payload: DirectorPayload) -> ServiceResult<RecordId> {
        let director = self.store.insert_director(payload).await?;
        tracing::info!(id = director.id, "director created");
        Ok(director.id)
    }

    pub async fn retrieve_director(&self, id: RecordId) -> ServiceResult<DirectorView> {
        let director = self.store.get_director(id).await?;
        found("director", id, DirectorSchema::dump(director.as_ref()))
    }

    pub async fn replace_director(
        &self,
        id: RecordId,
        payload: DirectorPayload,
    ) -> ServiceResult<()> {
        let mut director: Director =
            found("director", id, self.store.get_director(id).await?)?;
        director.apply_replace(payload);
        affected("director", id, self.store.update_director(&director).await?)?;
        tracing::info!(id, "director replaced");
        Ok(())
    }

    /// Movies that referenced the director keep existing with `director_id` cleared.
    pub async fn delete_director(&self, id: RecordId) -> ServiceResult<()> {
        affected("director", id, self.store.delete_director(id).await?)?;
        tracing::info!(id, "director deleted");
        Ok(())
    }

    // --- genres ---

    pub async fn list_genres(&self) -> ServiceResult<Vec<GenreView>> {
        let genres = self.store.list_genres().await?;
        tracing::debug!(count = genres.len(), "listed genres");
        Ok(GenreSchema::dump_many(&genres))
    }

    pub async fn create_genre(&self, payload: GenrePayload) -> ServiceResult<RecordId> {
        let genre = self.store.insert_genre(payload).await?;
        tracing::info!(id = genre.id, "genre created");
        Ok(genre.id)
    }

    pub async fn retrieve_genre(&self, id: RecordId) -> ServiceResult<GenreView> {
        let genre = self.store.get_genre(id).await?;
        found("genre", id, GenreSchema::dump(genre.as_ref()))
    }

    pub async fn replace_genre(&self, id: RecordId, payload: GenrePayload) -> ServiceResult<()> {
        let mut genre: Genre = found("genre", id, self.store.get_genre(id).await?)?;
        genre.apply_replace(payload);
        affected("genre", id, self.store.update_genre(&genre).await?)?;
        tracing::info!(id, "genre replaced");
        Ok(())
    }

    pub async fn delete_genre(&self, id: RecordId) -> ServiceResult<()> {
        affected("genre", id, self.store.delete_genre(id).await?)?;
        tracing::info!(id, "genre deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryCatalogStore;

    fn service() -> CatalogService {
        CatalogService::new(Arc::new(MemoryCatalogStore::new()))
    }

    #[tokio::test]
    async fn replace_keeps_year_and_nulls_description() {
        let svc = service();
        let id = svc
            .create_movie(NewMovie {
                title: Some("Old".to_string()),
                description: Some("desc".to_string()),
                year: Some(1999),
                director_id: Some(4),
                ..NewMovie::default()
            })
            .await
            .unwrap();

        svc.replace_movie(
            id,
            MovieReplace {
                title: Some("A".to_string()),
                ..MovieReplace::default()
            },
        )
        .await
        .unwrap();

        let stored = svc.store().get_movie(id).await.unwrap().unwrap();
        assert_eq!(stored.title.as_deref(), Some("A"));
        assert_eq!(stored.description, None);
        assert_eq!(stored.year, Some(1999));
        assert_eq!(stored.director_id, Some(4));
    }

    #[tokio::test]
    async fn item_operations_on_missing_ids_are_not_found() {
        let svc = service();
        assert!(matches!(
            svc.retrieve_genre(999_999).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            svc.replace_director(999_999, DirectorPayload::default()).await,
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            svc.delete_movie(999_999).await,
            Err(ServiceError::NotFound)
        ));
    }

    #[tokio::test]
    async fn delete_then_retrieve_is_not_found() {
        let svc = service();
        let id = svc
            .create_genre(GenrePayload {
                name: Some("Noir".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(svc.retrieve_genre(id).await.unwrap().name.as_deref(), Some("Noir"));
        svc.delete_genre(id).await.unwrap();
        assert!(matches!(svc.retrieve_genre(id).await, Err(ServiceError::NotFound)));
    }
}
