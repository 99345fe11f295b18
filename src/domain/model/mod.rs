//! Entity model for the catalog: movies, directors and genres.
//!
//! Records are plain data. The [`Entity`] trait describes, for the storage layer, which table a
//! family lives in, which columns it owns and which of those columns point into another family.

pub mod director;
pub mod genre;
pub mod movie;

pub use director::{Director, DirectorPayload};
pub use genre::{Genre, GenrePayload};
pub use movie::{Movie, MovieReplace, NewMovie};

/// Store-assigned identifier shared by all three families.
pub type RecordId = i32;

/// A column on one family that holds the identifier of a record in another family.
///
/// No existence check is made when the column is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub references: &'static str,
}

/// Structural description of a persisted entity family.
pub trait Entity: Send + Sync {
    /// Name of the database table holding this family.
    const TABLE: &'static str;

    /// Columns owned by the record, excluding the `id` primary key.
    const COLUMNS: &'static [&'static str];

    /// Columns that reference another family.
    const FOREIGN_KEYS: &'static [ForeignKey] = &[];

    /// Returns the SQL CREATE TABLE statement for this family.
    fn create_table_sql() -> &'static str;

    /// `SELECT` list covering the primary key and every owned column.
    fn select_columns() -> String {
        std::iter::once("id")
            .chain(Self::COLUMNS.iter().copied())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Every foreign key, across all families, that points at `table`.
pub fn references_to(table: &str) -> Vec<(&'static str, ForeignKey)> {
    Movie::FOREIGN_KEYS
        .iter()
        .filter(|fk| fk.references == table)
        .map(|fk| (Movie::TABLE, *fk))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movie_foreign_keys_point_at_director_and_genre() {
        let to_director = references_to(Director::TABLE);
        assert_eq!(to_director.len(), 1);
        assert_eq!(to_director[0].0, "movie");
        assert_eq!(to_director[0].1.column, "director_id");

        let to_genre = references_to(Genre::TABLE);
        assert_eq!(to_genre.len(), 1);
        assert_eq!(to_genre[0].1.column, "genre_id");

        assert!(references_to(Movie::TABLE).is_empty());
    }

    #[test]
    fn select_columns_lead_with_id() {
        assert_eq!(Director::select_columns(), "id, name");
        assert_eq!(
            Movie::select_columns(),
            "id, title, description, trailer, year, rating, genre_id, director_id"
        );
    }
}
