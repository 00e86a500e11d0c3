//! Post service: validation, image persistence and row storage for news posts.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::{
    CreateNoticia, NewNoticia, Noticia, NoticiaChanges, NoticiaSubmission, UpdateNoticia,
    parse_noticia_id,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{ImageStore, NoticiaRepository};

/// Use cases over news posts.
///
/// Each call is a single stateless operation; failures surface immediately
/// and nothing is retried.
#[derive(Clone)]
pub struct NoticiaService {
    repo: Arc<dyn NoticiaRepository>,
    images: Arc<dyn ImageStore>,
}

impl NoticiaService {
    pub fn new(repo: Arc<dyn NoticiaRepository>, images: Arc<dyn ImageStore>) -> Self {
        Self { repo, images }
    }

    /// All posts, newest first.
    pub async fn list(&self) -> Result<Vec<Noticia>, DomainError> {
        self.repo.list_recent().await.map_err(storage)
    }

    /// Fetch one post by the id as it appears in a URL.
    pub async fn get(&self, raw_id: &str) -> Result<Noticia, DomainError> {
        let id = parse_noticia_id(raw_id)?;
        self.find(id).await
    }

    /// Create a post from a form submission and return its id.
    pub async fn create(&self, submission: NoticiaSubmission) -> Result<i32, DomainError> {
        let CreateNoticia {
            titulo,
            conteudo,
            imagem,
        } = CreateNoticia::try_from(submission)?;

        let now = Utc::now();
        let image_path = self.images.store(&imagem, now).await?;

        let inserted = self
            .repo
            .insert(NewNoticia {
                titulo,
                conteudo,
                imagem: image_path.clone(),
                data_publicacao: now,
            })
            .await;

        match inserted {
            Ok(noticia) => {
                tracing::info!(noticia_id = noticia.id, imagem = %image_path, "Noticia created");
                Ok(noticia.id)
            }
            Err(e) => {
                self.discard_image(&image_path).await;
                Err(storage(e))
            }
        }
    }

    /// Update a post. The image is replaced only when the submission carries one.
    pub async fn update(
        &self,
        raw_id: &str,
        submission: NoticiaSubmission,
    ) -> Result<i32, DomainError> {
        let id = parse_noticia_id(raw_id)?;
        let UpdateNoticia {
            titulo,
            conteudo,
            imagem,
        } = UpdateNoticia::try_from(submission)?;

        let current = self.find(id).await?;

        let new_image = match &imagem {
            Some(upload) => Some(self.images.store(upload, Utc::now()).await?),
            None => None,
        };

        let changes = NoticiaChanges {
            titulo,
            conteudo,
            imagem: new_image.clone(),
        };

        match self.repo.update(id, changes).await {
            Ok(updated) => {
                if let Some(path) = &new_image {
                    tracing::info!(noticia_id = id, imagem = %path, "Noticia image replaced");
                    if *path != current.imagem {
                        self.discard_image(&current.imagem).await;
                    }
                }
                tracing::info!(noticia_id = id, "Noticia updated");
                Ok(updated.id)
            }
            Err(e) => {
                if let Some(path) = &new_image {
                    self.discard_image(path).await;
                }
                Err(not_found_or_storage(e, id))
            }
        }
    }

    /// Delete a post and its image; returns the deleted id.
    pub async fn delete(&self, raw_id: &str) -> Result<i32, DomainError> {
        let id = parse_noticia_id(raw_id)?;
        let current = self.find(id).await?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| not_found_or_storage(e, id))?;

        tracing::info!(noticia_id = id, "Noticia deleted");
        self.discard_image(&current.imagem).await;
        Ok(id)
    }

    async fn find(&self, id: i32) -> Result<Noticia, DomainError> {
        self.repo
            .find_by_id(id)
            .await
            .map_err(storage)?
            .ok_or(DomainError::NotFound { id })
    }

    /// Best-effort removal; a leftover file is logged, never surfaced.
    async fn discard_image(&self, public_path: &str) {
        if let Err(e) = self.images.remove(public_path).await {
            tracing::warn!(imagem = %public_path, error = %e, "Failed to remove image file");
        }
    }
}

fn storage(err: RepoError) -> DomainError {
    DomainError::Storage(err.to_string())
}

fn not_found_or_storage(err: RepoError, id: i32) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::NotFound { id },
        other => storage(other),
    }
}
