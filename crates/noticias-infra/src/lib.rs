//! # Noticias Infrastructure
//!
//! Concrete implementations of the ports defined in `noticias-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory repository only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT session tokens

pub mod database;
pub mod storage;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::{DatabaseConfig, InMemoryNoticiaRepository};
pub use storage::LocalImageStore;

#[cfg(feature = "postgres")]
pub use database::PostgresNoticiaRepository;

#[cfg(feature = "auth")]
pub use auth::{JwtConfig, JwtTokenService};
