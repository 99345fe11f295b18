//! In-process implementation of [`CatalogStore`].
//!
//! All three tables live behind one lock, so every write is atomic with respect to every other
//! operation. Identifiers start at 1 and are never reused.

use crate::domain::model::{
    references_to, Director, DirectorPayload, Entity, Genre, GenrePayload, Movie, NewMovie,
    RecordId,
};
use crate::domain::MovieFilter;
use crate::storage::{CatalogStore, StorageResult, TableCounts};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

struct Table<T> {
    rows: BTreeMap<RecordId, T>,
    last_id: RecordId,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn insert_with(&mut self, build: impl FnOnce(RecordId) -> T) -> T {
        self.last_id += 1;
        let row = build(self.last_id);
        self.rows.insert(self.last_id, row.clone());
        row
    }

    fn replace(&mut self, id: RecordId, row: T) -> bool {
        match self.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                true
            }
            None => false,
        }
    }

    fn values(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }
}

struct Tables {
    movies: Table<Movie>,
    directors: Table<Director>,
    genres: Table<Genre>,
}

impl Tables {
    /// Clears every movie reference to `id` in the family stored in `table`.
    fn clear_references(&mut self, table: &str, id: RecordId) {
        for (_, fk) in references_to(table) {
            for movie in self.movies.rows.values_mut() {
                movie.clear_reference(fk.column, id);
            }
        }
    }
}

pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables {
                movies: Table::new(),
                directors: Table::new(),
                genres: Table::new(),
            }),
        }
    }
}

impl Default for MemoryCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn ping(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn ensure_schema(&self) -> StorageResult<()> {
        Ok(())
    }

    async fn counts(&self) -> StorageResult<TableCounts> {
        let tables = self.tables.read().await;
        Ok(TableCounts {
            movies: tables.movies.rows.len() as i64,
            directors: tables.directors.rows.len() as i64,
            genres: tables.genres.rows.len() as i64,
        })
    }

    async fn list_movies(&self, filter: &MovieFilter) -> StorageResult<Vec<Movie>> {
        let tables = self.tables.read().await;
        Ok(tables
            .movies
            .rows
            .values()
            .filter(|m| filter.matches(m))
            .cloned()
            .collect())
    }

    async fn get_movie(&self, id: RecordId) -> StorageResult<Option<Movie>> {
        Ok(self.tables.read().await.movies.rows.get(&id).cloned())
    }

    async fn insert_movie(&self, movie: NewMovie) -> StorageResult<Movie> {
        let mut tables = self.tables.write().await;
        Ok(tables.movies.insert_with(|id| Movie::from_new(id, movie)))
    }

    async fn update_movie(&self, movie: &Movie) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.movies.replace(movie.id, movie.clone()))
    }

    async fn delete_movie(&self, id: RecordId) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        let deleted = tables.movies.rows.remove(&id).is_some();
        if deleted {
            tables.clear_references(Movie::TABLE, id);
        }
        Ok(deleted)
    }

    async fn list_directors(&self) -> StorageResult<Vec<Director>> {
        Ok(self.tables.read().await.directors.values())
    }

    async fn get_director(&self, id: RecordId) -> StorageResult<Option<Director>> {
        Ok(self.tables.read().await.directors.rows.get(&id).cloned())
    }

    async fn insert_director(&self, payload: DirectorPayload) -> StorageResult<Director> {
        let mut tables = self.tables.write().await;
        Ok(tables
            .directors
            .insert_with(|id| Director::from_payload(id, payload)))
    }

    async fn update_director(&self, director: &Director) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.directors.replace(director.id, director.clone()))
    }

    async fn delete_director(&self, id: RecordId) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        let deleted = tables.directors.rows.remove(&id).is_some();
        if deleted {
            tables.clear_references(Director::TABLE, id);
        }
        Ok(deleted)
    }

    async fn list_genres(&self) -> StorageResult<Vec<Genre>> {
        Ok(self.tables.read().await.genres.values())
    }

    async fn get_genre(&self, id: RecordId) -> StorageResult<Option<Genre>> {
        Ok(self.tables.read().await.genres.rows.get(&id).cloned())
    }

    async fn insert_genre(&self, payload: GenrePayload) -> StorageResult<Genre> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.insert_with(|id| Genre::from_payload(id, payload)))
    }

    async fn update_genre(&self, genre: &Genre) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.genres.replace(genre.id, genre.clone()))
    }

    async fn delete_genre(&self, id: RecordId) -> StorageResult<bool> {
        let mut tables = self.tables.write().await;
        let deleted = tables.genres.rows.remove(&id).is_some();
        if deleted {
            tables.clear_references(Genre::TABLE, id);
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_movie(title: &str, director_id: Option<RecordId>, genre_id: Option<RecordId>) -> NewMovie {
        NewMovie {
            title: Some(title.to_string()),
            director_id,
            genre_id,
            ..NewMovie::default()
        }
    }

    fn named(name: &str) -> DirectorPayload {
        DirectorPayload {
            name: Some(name.to_string()),
        }
    }

    #[tokio::test]
    async fn ids_start_at_one_and_are_not_reused() {
        let store = MemoryCatalogStore::new();
        let a = store.insert_director(named("a")).await.unwrap();
        let b = store.insert_director(named("b")).await.unwrap();
        assert_eq!((a.id, b.id), (1, 2));

        assert!(store.delete_director(b.id).await.unwrap());
        let c = store.insert_director(named("c")).await.unwrap();
        assert_eq!(c.id, 3);

        let names: Vec<_> = store
            .list_directors()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(names, vec![1, 3]);
    }

    #[tokio::test]
    async fn families_have_independent_id_sequences() {
        let store = MemoryCatalogStore::new();
        store.insert_director(named("d")).await.unwrap();
        let genre = store
            .insert_genre(GenrePayload {
                name: Some("Noir".to_string()),
            })
            .await
            .unwrap();
        let movie = store.insert_movie(new_movie("M", None, Some(1))).await.unwrap();
        assert_eq!((genre.id, movie.id), (1, 1));
    }

    #[tokio::test]
    async fn list_movies_applies_filter() {
        let store = MemoryCatalogStore::new();
        store.insert_movie(new_movie("a", Some(1), Some(1))).await.unwrap();
        store.insert_movie(new_movie("b", Some(1), Some(2))).await.unwrap();
        store.insert_movie(new_movie("c", Some(2), Some(2))).await.unwrap();

        let both = store
            .list_movies(&MovieFilter::all().with_director(1).with_genre(2))
            .await
            .unwrap();
        assert_eq!(both.len(), 1);
        assert_eq!(both[0].title.as_deref(), Some("b"));

        let counts = store.counts().await.unwrap();
        assert_eq!(counts.movies, 3);
    }

    #[tokio::test]
    async fn update_and_delete_of_absent_rows_report_false() {
        let store = MemoryCatalogStore::new();
        let ghost = Director {
            id: 999_999,
            name: Some("x".to_string()),
        };
        assert!(!store.update_director(&ghost).await.unwrap());
        assert!(!store.delete_director(ghost.id).await.unwrap());
        assert!(store.get_director(ghost.id).await.unwrap().is_none());
        assert!(!store.delete_movie(1).await.unwrap());
    }

    #[tokio::test]
    async fn deleting_a_director_clears_movie_references() {
        let store = MemoryCatalogStore::new();
        let director = store.insert_director(named("Lynch")).await.unwrap();
        let kept = store
            .insert_movie(new_movie("Dune", Some(director.id), Some(5)))
            .await
            .unwrap();
        let other = store.insert_movie(new_movie("Other", Some(42), None)).await.unwrap();

        assert!(store.delete_director(director.id).await.unwrap());

        let kept = store.get_movie(kept.id).await.unwrap().unwrap();
        assert_eq!(kept.director_id, None);
        assert_eq!(kept.genre_id, Some(5));
        let other = store.get_movie(other.id).await.unwrap().unwrap();
        assert_eq!(other.director_id, Some(42));
    }

    #[tokio::test]
    async fn deleting_a_genre_clears_movie_references() {
        let store = MemoryCatalogStore::new();
        let genre = store
            .insert_genre(GenrePayload {
                name: Some("Noir".to_string()),
            })
            .await
            .unwrap();
        let movie = store
            .insert_movie(new_movie("M", None, Some(genre.id)))
            .await
            .unwrap();

        assert!(store.delete_genre(genre.id).await.unwrap());
        assert_eq!(store.get_movie(movie.id).await.unwrap().unwrap().genre_id, None);
    }
}
