//! Typed form submissions for creating and updating posts.

use crate::error::{
    DomainError, MSG_ALL_FIELDS_REQUIRED, MSG_IMAGE_ONLY, MSG_TITLE_AND_CONTENT_REQUIRED,
};

/// An uploaded image: raw bytes plus what the client told us about them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// File name as sent by the client. Not trusted as a path.
    pub file_name: String,
    /// Declared MIME type of the part, if any.
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// A file part the browser sends when no file was chosen.
    pub fn is_empty(&self) -> bool {
        self.file_name.trim().is_empty() && self.bytes.is_empty()
    }

    /// Accepts parts with no declared type or an `image/*` type.
    fn is_image(&self) -> bool {
        match &self.content_type {
            None => true,
            Some(ct) => ct.trim().to_ascii_lowercase().starts_with("image/"),
        }
    }
}

/// Raw submission as collected from a form. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct NoticiaSubmission {
    pub titulo: Option<String>,
    pub conteudo: Option<String>,
    pub imagem: Option<ImageUpload>,
}

/// A validated create submission.
#[derive(Debug, Clone)]
pub struct CreateNoticia {
    pub titulo: String,
    pub conteudo: String,
    pub imagem: ImageUpload,
}

/// A validated update submission.
#[derive(Debug, Clone)]
pub struct UpdateNoticia {
    pub titulo: String,
    pub conteudo: String,
    pub imagem: Option<ImageUpload>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn present_image(image: Option<ImageUpload>) -> Result<Option<ImageUpload>, DomainError> {
    match image.filter(|i| !i.is_empty()) {
        Some(image) if !image.is_image() => Err(DomainError::invalid(MSG_IMAGE_ONLY)),
        other => Ok(other),
    }
}

impl TryFrom<NoticiaSubmission> for CreateNoticia {
    type Error = DomainError;

    fn try_from(submission: NoticiaSubmission) -> Result<Self, Self::Error> {
        let titulo = present(submission.titulo);
        let conteudo = present(submission.conteudo);
        let imagem = present_image(submission.imagem)?;

        match (titulo, conteudo, imagem) {
            (Some(titulo), Some(conteudo), Some(imagem)) => Ok(Self {
                titulo,
                conteudo,
                imagem,
            }),
            _ => Err(DomainError::invalid(MSG_ALL_FIELDS_REQUIRED)),
        }
    }
}

impl TryFrom<NoticiaSubmission> for UpdateNoticia {
    type Error = DomainError;

    fn try_from(submission: NoticiaSubmission) -> Result<Self, Self::Error> {
        let (Some(titulo), Some(conteudo)) =
            (present(submission.titulo), present(submission.conteudo))
        else {
            return Err(DomainError::invalid(MSG_TITLE_AND_CONTENT_REQUIRED));
        };

        Ok(Self {
            titulo,
            conteudo,
            imagem: present_image(submission.imagem)?,
        })
    }
}
