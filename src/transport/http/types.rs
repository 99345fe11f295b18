use crate::app::CatalogService;
use crate::storage::CatalogStore;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::{IntoParams, ToSchema};

/// Literal body returned with every 404.
pub const NOT_FOUND_BODY: &str = "Not founded";

#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
}

impl AppState {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            catalog: CatalogService::new(store),
        }
    }
}

/// Envelope used for health and for every error other than 404.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Optional equality filters for `GET /movies/`.
///
/// Values are kept as raw strings here; they are parsed into identifiers by the filter builder so
/// a non-numeric value can be reported against the parameter that carried it.
#[derive(Deserialize, Debug, Default, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MovieListQuery {
    /// Only movies whose director has this identifier.
    pub director_id: Option<String>,
    /// Only movies whose genre has this identifier.
    pub genre_id: Option<String>,
}
