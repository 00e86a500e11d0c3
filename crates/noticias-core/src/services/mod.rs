//! Application services - orchestrate ports to implement use cases.

mod noticia_service;

pub use noticia_service::NoticiaService;
