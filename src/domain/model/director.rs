use super::{Entity, RecordId};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Director {
    pub id: RecordId,
    pub name: Option<String>,
}

/// Body of both `POST /directors/` and `PUT /directors/{id}`. A missing `name` is stored as null.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, ToSchema)]
#[serde(default)]
pub struct DirectorPayload {
    pub name: Option<String>,
}

impl Director {
    pub fn from_payload(id: RecordId, payload: DirectorPayload) -> Self {
        Self {
            id,
            name: payload.name,
        }
    }

    pub fn apply_replace(&mut self, payload: DirectorPayload) {
        self.name = payload.name;
    }
}

impl Entity for Director {
    const TABLE: &'static str = "director";
    const COLUMNS: &'static [&'static str] = &["name"];

    fn create_table_sql() -> &'static str {
        "CREATE TABLE IF NOT EXISTS director (
            id SERIAL PRIMARY KEY,
            name VARCHAR(255)
        )"
    }
}
