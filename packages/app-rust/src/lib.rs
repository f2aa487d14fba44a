//! Vidly App: catalog model, data sources, and the entity forms and lists
//! built on `vidly-core`.

pub mod config;
pub mod error;
pub mod forms;
pub mod model;
pub mod movies;
pub mod seed;
pub mod store;
pub mod telemetry;
pub mod traits;

pub use config::{AppConfig, LogConfig};
pub use error::{AppError, SourceError};
pub use model::{Genre, Movie, MovieColumn, MovieFlag};
pub use movies::{GenreOption, MoviesList};
pub use store::InMemorySource;
pub use traits::{DataSource, Entity};
