use super::{Director, Entity, ForeignKey, Genre, RecordId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A persisted movie. Every field except `id` is nullable.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Movie {
    pub id: RecordId,
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    pub genre_id: Option<RecordId>,
    pub director_id: Option<RecordId>,
}

/// Body of `POST /movies/`.
///
/// There is no `id` field: a client-supplied identifier is dropped during deserialization,
/// along with any other unknown key.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct NewMovie {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub year: Option<i32>,
    pub rating: Option<f64>,
    #[schema(value_type = Option<i32>)]
    pub genre_id: Option<RecordId>,
    #[schema(value_type = Option<i32>)]
    pub director_id: Option<RecordId>,
}

/// Body of `PUT /movies/{id}`.
///
/// Only these four fields are replaceable. Any of them left out of the body is written as null.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct MovieReplace {
    pub title: Option<String>,
    pub description: Option<String>,
    pub trailer: Option<String>,
    pub rating: Option<f64>,
}

impl Movie {
    pub fn from_new(id: RecordId, new: NewMovie) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            trailer: new.trailer,
            year: new.year,
            rating: new.rating,
            genre_id: new.genre_id,
            director_id: new.director_id,
        }
    }

    /// Overwrites the replaceable fields. `year` and both references are left alone.
    pub fn apply_replace(&mut self, replace: MovieReplace) {
        self.title = replace.title;
        self.description = replace.description;
        self.trailer = replace.trailer;
        self.rating = replace.rating;
    }

    /// Clears the reference held in `column` if it points at `id`.
    /// Returns true when something was cleared.
    pub fn clear_reference(&mut self, column: &str, id: RecordId) -> bool {
        let slot = match column {
            "director_id" => &mut self.director_id,
            "genre_id" => &mut self.genre_id,
            _ => return false,
        };
        if *slot == Some(id) {
            *slot = None;
            true
        } else {
            false
        }
    }
}

impl Entity for Movie {
    const TABLE: &'static str = "movie";
    const COLUMNS: &'static [&'static str] = &[
        "title",
        "description",
        "trailer",
        "year",
        "rating",
        "genre_id",
        "director_id",
    ];
    const FOREIGN_KEYS: &'static [ForeignKey] = &[
        ForeignKey {
            column: "genre_id",
            references: Genre::TABLE,
        },
        ForeignKey {
            column: "director_id",
            references: Director::TABLE,
        },
    ];

    fn create_table_sql() -> &'static str {
        "CREATE TABLE IF NOT EXISTS movie (
            id SERIAL PRIMARY KEY,
            title VARCHAR(255),
            description VARCHAR(255),
            trailer VARCHAR(255),
            year INTEGER,
            rating DOUBLE PRECISION,
            genre_id INTEGER,
            director_id INTEGER
        )"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Movie {
        Movie::from_new(
            7,
            NewMovie {
                title: Some("Heat".to_string()),
                description: Some("Crime".to_string()),
                trailer: Some("https://example.org/heat".to_string()),
                year: Some(1995),
                rating: Some(8.3),
                genre_id: Some(2),
                director_id: Some(3),
            },
        )
    }

    #[test]
    fn replace_nulls_omitted_fields_and_keeps_year_and_references() {
        let mut movie = sample();
        let replace: MovieReplace = serde_json::from_value(json!({ "title": "A" })).unwrap();
        movie.apply_replace(replace);

        assert_eq!(movie.title.as_deref(), Some("A"));
        assert_eq!(movie.description, None);
        assert_eq!(movie.trailer, None);
        assert_eq!(movie.rating, None);
        assert_eq!(movie.year, Some(1995));
        assert_eq!(movie.genre_id, Some(2));
        assert_eq!(movie.director_id, Some(3));
    }

    #[test]
    fn new_movie_ignores_client_id() {
        let new: NewMovie =
            serde_json::from_value(json!({ "id": 42, "title": "M", "genre_id": 1 })).unwrap();
        assert_eq!(new.title.as_deref(), Some("M"));
        assert_eq!(new.genre_id, Some(1));
        assert_eq!(Movie::from_new(1, new).id, 1);
    }

    #[test]
    fn clear_reference_only_touches_matching_column() {
        let mut movie = sample();
        assert!(!movie.clear_reference("director_id", 99));
        assert!(movie.clear_reference("director_id", 3));
        assert_eq!(movie.director_id, None);
        assert_eq!(movie.genre_id, Some(2));
        assert!(!movie.clear_reference("title", 2));
    }
}
