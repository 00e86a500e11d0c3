//! SeaORM entities.

pub mod noticia;
