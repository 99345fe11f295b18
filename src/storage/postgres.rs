//! PostgreSQL implementation of [`CatalogStore`].

use crate::domain::model::{
    references_to, Director, DirectorPayload, Entity, Genre, GenrePayload, Movie, NewMovie,
    RecordId,
};
use crate::domain::MovieFilter;
use crate::storage::{CatalogStore, StorageResult, TableCounts};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn connect(database_url: &str, max_connections: u32) -> StorageResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn fetch_all<E>(&self) -> StorageResult<Vec<E>>
    where
        E: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!(
            "SELECT {} FROM {} ORDER BY id",
            E::select_columns(),
            E::TABLE
        );
        Ok(sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?)
    }

    async fn fetch_one<E>(&self, id: RecordId) -> StorageResult<Option<E>>
    where
        E: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            E::select_columns(),
            E::TABLE
        );
        Ok(sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn count<E: Entity>(&self) -> StorageResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", E::TABLE);
        Ok(sqlx::query_scalar::<_, i64>(&sql)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_named<E>(&self, name: Option<String>) -> StorageResult<E>
    where
        E: Entity + for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        let sql = format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING {}",
            E::TABLE,
            E::select_columns()
        );
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(name)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update_named<E: Entity>(
        &self,
        id: RecordId,
        name: Option<&str>,
    ) -> StorageResult<bool> {
        let sql = format!("UPDATE {} SET name = $2 WHERE id = $1", E::TABLE);
        let mut tx = self.pool.begin().await?;
        let affected = sqlx::query(&sql)
            .bind(id)
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        tx.commit().await?;
        Ok(affected > 0)
    }

    /// Deletes one row of `E` and, in the same transaction, nulls every foreign key pointing at it.
    async fn delete_with_references<E: Entity>(&self, id: RecordId) -> StorageResult<bool> {
        let mut tx = self.pool.begin().await?;
        let deleted = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", E::TABLE))
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected()
            > 0;
        if deleted {
            for (table, fk) in references_to(E::TABLE) {
                let sql = format!(
                    "UPDATE {} SET {col} = NULL WHERE {col} = $1",
                    table,
                    col = fk.column
                );
                let cleared = sqlx::query(&sql)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected();
                if cleared > 0 {
                    tracing::debug!(table, column = fk.column, cleared, "cleared dangling references");
                }
            }
        }
        tx.commit().await?;
        Ok(deleted)
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn ping(&self) -> StorageResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn ensure_schema(&self) -> StorageResult<()> {
        let mut tx = self.pool.begin().await?;
        for ddl in [
            Director::create_table_sql(),
            Genre::create_table_sql(),
            Movie::create_table_sql(),
        ] {
            sqlx::query(ddl).execute(&mut *tx).await?;
        }
        for fk in Movie::FOREIGN_KEYS {
            let sql = format!(
                "CREATE INDEX IF NOT EXISTS {table}_{col}_idx ON {table} ({col})",
                table = Movie::TABLE,
                col = fk.column
            );
            sqlx::query(&sql).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        Ok(())
    }

    async fn counts(&self) -> StorageResult<TableCounts> {
        Ok(TableCounts {
            movies: self.count::<Movie>().await?,
            directors: self.count::<Director>().await?,
            genres: self.count::<Genre>().await?,
        })
    }

    async fn list_movies(&self, filter: &MovieFilter) -> StorageResult<Vec<Movie>> {
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
            "SELECT {} FROM {}",
            Movie::select_columns(),
            Movie::TABLE
        ));
        for (idx, (column, value)) in filter.predicates().into_iter().enumerate() {
            qb.push(if idx == 0 { " WHERE " } else { " AND " });
            qb.push(column).push(" = ").push_bind(value);
        }
        qb.push(" ORDER BY id");
        Ok(qb.build_query_as::<Movie>().fetch_all(&self.pool).await?)
    }

    async fn get_movie(&self, id: RecordId) -> StorageResult<Option<Movie>> {
        self.fetch_one::<Movie>(id).await
    }

    async fn insert_movie(&self, movie: NewMovie) -> StorageResult<Movie> {
        let sql = format!(
            "INSERT INTO movie (title, description, trailer, year, rating, genre_id, director_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {}",
            Movie::select_columns()
        );
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query_as::<_, Movie>(&sql)
            .bind(movie.title)
            .bind(movie.description)
            .bind(movie.trailer)
            .bind(movie.year)
            .bind(movie.rating)
            .bind(movie.genre_id)
            .bind(movie.director_id)
            .fetch_one(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(row)
    }

    async fn update_movie(&self, movie: &Movie) -> StorageResult<bool> {
        let mut tx = self.pool.begin().await?;
        let affected = sqlx::query(
            "UPDATE movie
             SET title = $2, description = $3, trailer = $4, year = $5, rating = $6,
                 genre_id = $7, director_id = $8
             WHERE id = $1",
        )
        .bind(movie.id)
        .bind(movie.title.as_deref())
        .bind(movie.description.as_deref())
        .bind(movie.trailer.as_deref())
        .bind(movie.year)
        .bind(movie.rating)
        .bind(movie.genre_id)
        .bind(movie.director_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();
        tx.commit().await?;
        Ok(affected > 0)
    }

    async fn delete_movie(&self, id: RecordId) -> StorageResult<bool> {
        self.delete_with_references::<Movie>(id).await
    }

    async fn list_directors(&self) -> StorageResult<Vec<Director>> {
        self.fetch_all::<Director>().await
    }

    async fn get_director(&self, id: RecordId) -> StorageResult<Option<Director>> {
        self.fetch_one::<Director>(id).await
    }

    async fn insert_director(&self, payload: DirectorPayload) -> StorageResult<Director> {
        self.insert_named::<Director>(payload.name).await
    }

    async fn update_director(&self, director: &Director) -> StorageResult<bool> {
        self.update_named::<Director>(director.id, director.name.as_deref())
            .await
    }

    async fn delete_director(&self, id: RecordId) -> StorageResult<bool> {
        self.delete_with_references::<Director>(id).await
    }

    async fn list_genres(&self) -> StorageResult<Vec<Genre>> {
        self.fetch_all::<Genre>().await
    }

    async fn get_genre(&self, id: RecordId) -> StorageResult<Option<Genre>> {
        self.fetch_one::<Genre>(id).await
    }

    async fn insert_genre(&self, payload: GenrePayload) -> StorageResult<Genre> {
        self.insert_named::<Genre>(payload.name).await
    }

    async fn update_genre(&self, genre: &Genre) -> StorageResult<bool> {
        self.update_named::<Genre>(genre.id, genre.name.as_deref()).await
    }

    async fn delete_genre(&self, id: RecordId) -> StorageResult<bool> {
        self.delete_with_references::<Genre>(id).await
    }
}
