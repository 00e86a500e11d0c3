//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod image_store;
mod repository;

pub use auth::{AuthError, SessionClaims, TokenService};
pub use image_store::ImageStore;
pub use repository::{BaseRepository, NoticiaRepository};
