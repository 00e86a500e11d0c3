use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DomainError, MSG_INVALID_ID};

/// Noticia entity - a published news post.
///
/// Serialized with the field names the public API exposes
/// (`id`, `titulo`, `conteudo`, `imagem`, `dataPublicacao`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Noticia {
    pub id: i32,
    pub titulo: String,
    pub conteudo: String,
    /// Public URL path of the stored image, e.g. `/uploads/1700000000000_photo.jpg`.
    pub imagem: String,
    pub data_publicacao: DateTime<Utc>,
}

/// A post ready to be inserted; the id is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNoticia {
    pub titulo: String,
    pub conteudo: String,
    pub imagem: String,
    pub data_publicacao: DateTime<Utc>,
}

/// Mutable fields of an existing post. `imagem: None` keeps the current image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticiaChanges {
    pub titulo: String,
    pub conteudo: String,
    pub imagem: Option<String>,
}

impl Noticia {
    /// Apply an update in place. `id` and `data_publicacao` never change.
    pub fn apply(&mut self, changes: NoticiaChanges) {
        self.titulo = changes.titulo;
        self.conteudo = changes.conteudo;
        if let Some(imagem) = changes.imagem {
            self.imagem = imagem;
        }
    }
}

/// Parse a candidate post id taken from a URL segment.
pub fn parse_noticia_id(raw: &str) -> Result<i32, DomainError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| DomainError::invalid(MSG_INVALID_ID))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Noticia {
        Noticia {
            id: 7,
            titulo: "Hello".to_string(),
            conteudo: "World".to_string(),
            imagem: "/uploads/1_photo.jpg".to_string(),
            data_publicacao: Utc::now(),
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_noticia_id("42").unwrap(), 42);
        assert_eq!(parse_noticia_id(" 3 ").unwrap(), 3);
        assert!(matches!(
            parse_noticia_id("abc"),
            Err(DomainError::InvalidArgument(_))
        ));
        assert!(parse_noticia_id("12abc").is_err());
        assert!(parse_noticia_id("").is_err());
        assert!(parse_noticia_id("99999999999").is_err());
    }

    #[test]
    fn test_apply_without_image_keeps_image() {
        let mut noticia = sample();
        let published = noticia.data_publicacao;
        noticia.apply(NoticiaChanges {
            titulo: "Novo".to_string(),
            conteudo: "Texto".to_string(),
            imagem: None,
        });
        assert_eq!(noticia.titulo, "Novo");
        assert_eq!(noticia.imagem, "/uploads/1_photo.jpg");
        assert_eq!(noticia.id, 7);
        assert_eq!(noticia.data_publicacao, published);
    }

    #[test]
    fn test_apply_with_image_replaces_image() {
        let mut noticia = sample();
        noticia.apply(NoticiaChanges {
            titulo: "Novo".to_string(),
            conteudo: "Texto".to_string(),
            imagem: Some("/uploads/2_other.png".to_string()),
        });
        assert_eq!(noticia.imagem, "/uploads/2_other.png");
    }

    #[test]
    fn test_serializes_public_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("dataPublicacao").is_some());
        assert_eq!(json["titulo"], "Hello");
        assert_eq!(json["id"], 7);
    }
}
