//! Equality filters for the movie listing.
//!
//! Each supplied parameter becomes one `column = value` predicate on a movie foreign-key column;
//! predicates are combined with AND. No parameters means no narrowing. Whether the referenced
//! director or genre exists is irrelevant: an unmatched value simply matches nothing.
//!
//! Values are held as `i64` so an integer outside the identifier range is still a valid filter;
//! it can never equal a stored identifier and yields an empty listing.

use crate::domain::model::{Movie, RecordId};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid value for '{param}': expected an integer identifier, got '{value}'")]
    InvalidValue { param: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MovieFilter {
    pub director_id: Option<i64>,
    pub genre_id: Option<i64>,
}

impl MovieFilter {
    /// No narrowing at all.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a filter from raw query-string values. A parameter that is present but not an
    /// integer (including the empty string) is rejected.
    pub fn from_params(
        director_id: Option<&str>,
        genre_id: Option<&str>,
    ) -> Result<Self, FilterError> {
        Ok(Self {
            director_id: parse_param("director_id", director_id)?,
            genre_id: parse_param("genre_id", genre_id)?,
        })
    }

    pub fn with_director(mut self, id: RecordId) -> Self {
        self.director_id = Some(id.into());
        self
    }

    pub fn with_genre(mut self, id: RecordId) -> Self {
        self.genre_id = Some(id.into());
        self
    }

    /// `(column, value)` pairs, all of which must hold.
    pub fn predicates(&self) -> Vec<(&'static str, i64)> {
        let mut out = Vec::with_capacity(2);
        if let Some(id) = self.director_id {
            out.push(("director_id", id));
        }
        if let Some(id) = self.genre_id {
            out.push(("genre_id", id));
        }
        out
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        fn holds(wanted: Option<i64>, stored: Option<RecordId>) -> bool {
            wanted.map_or(true, |id| stored.map(i64::from) == Some(id))
        }
        holds(self.director_id, movie.director_id) && holds(self.genre_id, movie.genre_id)
    }
}

fn parse_param(param: &'static str, raw: Option<&str>) -> Result<Option<i64>, FilterError> {
    match raw {
        None => Ok(None),
        Some(value) => value
            .parse::<i64>()
            .map(Some)
            .map_err(|_| FilterError::InvalidValue {
                param,
                value: value.to_string(),
            }),
    }
}
