//! Database connection management and repositories.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
mod postgres_base;
#[cfg(feature = "postgres")]
pub mod postgres_repo;

#[cfg(feature = "postgres")]
pub mod entity;

pub use connections::DatabaseConfig;
#[cfg(feature = "postgres")]
pub use connections::connect;
pub use memory::InMemoryNoticiaRepository;

#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresNoticiaRepository;
