//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, EntityTrait, IntoActiveModel, QueryOrder, Set};

use noticias_core::domain::{NewNoticia, Noticia, NoticiaChanges};
use noticias_core::error::RepoError;
use noticias_core::ports::NoticiaRepository;

use super::entity::noticia::{self, Entity as NoticiaEntity};
use super::postgres_base::{PostgresBaseRepository, query_error};

/// PostgreSQL noticia repository.
pub type PostgresNoticiaRepository = PostgresBaseRepository<NoticiaEntity>;

#[async_trait]
impl NoticiaRepository for PostgresNoticiaRepository {
    async fn list_recent(&self) -> Result<Vec<Noticia>, RepoError> {
        let result = NoticiaEntity::find()
            .order_by_desc(noticia::Column::DataPublicacao)
            .all(&self.db)
            .await
            .map_err(query_error)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn insert(&self, noticia: NewNoticia) -> Result<Noticia, RepoError> {
        let model = noticia::ActiveModel::from(noticia)
            .insert(&self.db)
            .await
            .map_err(query_error)?;

        tracing::debug!(noticia_id = model.id, "Inserted noticia row");
        Ok(model.into())
    }

    async fn update(&self, id: i32, changes: NoticiaChanges) -> Result<Noticia, RepoError> {
        let existing = NoticiaEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(query_error)?
            .ok_or(RepoError::NotFound)?;

        let mut active = existing.into_active_model();
        active.titulo = Set(changes.titulo);
        active.conteudo = Set(changes.conteudo);
        if let Some(imagem) = changes.imagem {
            active.imagem = Set(imagem);
        }

        let model = active.update(&self.db).await.map_err(query_error)?;
        Ok(model.into())
    }
}
