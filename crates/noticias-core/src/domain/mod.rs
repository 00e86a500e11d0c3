//! Domain entities - the core business objects.

mod noticia;
mod submission;

pub use noticia::{NewNoticia, Noticia, NoticiaChanges, parse_noticia_id};
pub use submission::{CreateNoticia, ImageUpload, NoticiaSubmission, UpdateNoticia};
