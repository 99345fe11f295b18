//! Wire projections for catalog records.
//!
//! A schema selects which fields of a stored record are returned to callers. Movies expose only
//! `id` and `title`; directors and genres expose their whole record.

use crate::domain::model::{Director, Genre, Movie};
use serde::Serialize;
use utoipa::ToSchema;

pub trait Schema {
    type Record;
    type Output: Serialize;

    fn project(record: &Self::Record) -> Self::Output;

    /// Projects a possibly absent record. An absent record yields `None`, never an error;
    /// the caller decides what absence means.
    fn dump(record: Option<&Self::Record>) -> Option<Self::Output> {
        record.map(Self::project)
    }

    /// Projects a sequence with the same per-item field selection as [`Schema::project`].
    fn dump_many(records: &[Self::Record]) -> Vec<Self::Output> {
        records.iter().map(Self::project).collect()
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct MovieView {
    pub id: i32,
    pub title: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct DirectorView {
    pub id: i32,
    pub name: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq, ToSchema)]
pub struct GenreView {
    pub id: i32,
    pub name: Option<String>,
}

pub struct MovieSchema;

impl Schema for MovieSchema {
    type Record = Movie;
    type Output = MovieView;

    fn project(movie: &Movie) -> MovieView {
        MovieView {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

pub struct DirectorSchema;

impl Schema for DirectorSchema {
    type Record = Director;
    type Output = DirectorView;

    fn project(director: &Director) -> DirectorView {
        DirectorView {
            id: director.id,
            name: director.name.clone(),
        }
    }
}

pub struct GenreSchema;

impl Schema for GenreSchema {
    type Record = Genre;
    type Output = GenreView;

    fn project(genre: &Genre) -> GenreView {
        GenreView {
            id: genre.id,
            name: genre.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn movie(id: i32, title: &str) -> Movie {
        Movie {
            id,
            title: Some(title.to_string()),
            description: Some("long".to_string()),
            trailer: Some("https://example.org/t".to_string()),
            year: Some(2001),
            rating: Some(7.5),
            genre_id: Some(1),
            director_id: Some(2),
        }
    }

    #[test]
    fn movie_projection_exposes_only_id_and_title() {
        let out = serde_json::to_value(MovieSchema::project(&movie(3, "Brazil"))).unwrap();
        assert_eq!(out, json!({ "id": 3, "title": "Brazil" }));
    }

    #[test]
    fn null_title_is_serialized_as_null() {
        let mut m = movie(1, "x");
        m.title = None;
        let out = serde_json::to_value(MovieSchema::project(&m)).unwrap();
        assert_eq!(out, json!({ "id": 1, "title": null }));
    }

    #[test]
    fn dump_of_absent_record_is_none() {
        assert!(MovieSchema::dump(None).is_none());
        assert!(GenreSchema::dump(None).is_none());
    }

    #[test]
    fn dump_many_keeps_order_and_field_selection() {
        let out = serde_json::to_value(MovieSchema::dump_many(&[movie(1, "a"), movie(2, "b")]))
            .unwrap();
        assert_eq!(
            out,
            json!([{ "id": 1, "title": "a" }, { "id": 2, "title": "b" }])
        );
    }

    #[test]
    fn director_projection_is_whole_record() {
        let d = Director {
            id: 4,
            name: Some("Lynch".to_string()),
        };
        let out = serde_json::to_value(DirectorSchema::dump(Some(&d))).unwrap();
        assert_eq!(out, json!({ "id": 4, "name": "Lynch" }));
    }
}
