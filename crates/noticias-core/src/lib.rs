//! # Noticias Core
//!
//! The domain layer of the news service.
//! Posts, submissions, the post service and the route guard live here,
//! with storage and sessions reached only through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod guard;
pub mod ports;
pub mod services;

pub use error::DomainError;
pub use services::NoticiaService;
