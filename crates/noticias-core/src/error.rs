//! Domain-level error types.

use thiserror::Error;

/// Message returned when a submission misses a required field on create.
pub const MSG_ALL_FIELDS_REQUIRED: &str = "Todos os campos são obrigatórios.";
/// Message returned when an update misses `titulo` or `conteudo`.
pub const MSG_TITLE_AND_CONTENT_REQUIRED: &str = "Título e conteúdo são obrigatórios.";
/// Message returned when an id is not an integer.
pub const MSG_INVALID_ID: &str = "ID inválido fornecido.";
/// Message returned when the uploaded file is not an image.
pub const MSG_IMAGE_ONLY: &str = "Apenas arquivos de imagem são permitidos.";
/// Message returned when no post matches the id.
pub const MSG_NOT_FOUND: &str = "Notícia não encontrada.";

/// Domain errors - business logic failures.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Malformed id or missing/invalid submission field.
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Notícia não encontrada: id {id}")]
    NotFound { id: i32 },

    /// Database or filesystem failure.
    #[error("Storage failure: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }
}

/// Repository-level errors.
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Entity not found")]
    NotFound,

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Image store errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O failure on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid file name: {0}")]
    InvalidName(String),
}

impl From<StorageError> for DomainError {
    fn from(err: StorageError) -> Self {
        DomainError::Storage(err.to_string())
    }
}
