use super::{Entity, RecordId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Genre {
    pub id: RecordId,
    pub name: Option<String>,
}

/// Body of both `POST /genres/` and `PUT /genres/{id}`. A missing `name` is stored as null.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct GenrePayload {
    pub name: Option<String>,
}

impl Genre {
    pub fn from_payload(id: RecordId, payload: GenrePayload) -> Self {
        Self {
            id,
            name: payload.name,
        }
    }

    pub fn apply_replace(&mut self, payload: GenrePayload) {
        self.name = payload.name;
    }
}

impl Entity for Genre {
    const TABLE: &'static str = "genre";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn create_table_sql() -> &'static str {
        "CREATE TABLE IF NOT EXISTS genre (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255)
        )"
    }
}
