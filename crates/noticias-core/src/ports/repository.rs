use async_trait::async_trait;

use crate::domain::{NewNoticia, Noticia, NoticiaChanges};
use crate::error::RepoError;

/// Generic repository trait for lookups and removals by primary key.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Delete an entity by its ID. Fails with `RepoError::NotFound` when no row matched.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// Storage of `Noticia` rows.
#[async_trait]
pub trait NoticiaRepository: BaseRepository<Noticia, i32> {
    /// All posts, newest `data_publicacao` first.
    async fn list_recent(&self) -> Result<Vec<Noticia>, RepoError>;

    /// Insert a post and return it with its storage-assigned id.
    async fn insert(&self, noticia: NewNoticia) -> Result<Noticia, RepoError>;

    /// Update an existing post. Fails with `RepoError::NotFound` when the id is absent.
    async fn update(&self, id: i32, changes: NoticiaChanges) -> Result<Noticia, RepoError>;
}
