pub mod filter;
pub mod model;
pub mod schema;

pub use filter::{FilterError, MovieFilter};
pub use model::{Director, Entity, Genre, Movie, RecordId};
