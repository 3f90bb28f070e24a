//! `PostgreSQL` directory adapter.

mod directory;
mod models;
mod schema;

pub use directory::{DirectoryPgPool, PostgresDirectory};
