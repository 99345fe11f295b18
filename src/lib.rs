pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::CatalogService;
pub use domain::model::{Director, Genre, Movie};
pub use domain::MovieFilter;
pub use infra::config::Config;
pub use storage::{CatalogStore, MemoryCatalogStore, PgCatalogStore};
