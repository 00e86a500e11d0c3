//! In-memory noticia repository - used when no database is configured.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use noticias_core::domain::{NewNoticia, Noticia, NoticiaChanges};
use noticias_core::error::RepoError;
use noticias_core::ports::{BaseRepository, NoticiaRepository};

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Noticia>,
    last_id: i32,
}

/// In-memory repository using a BTreeMap behind an async RwLock.
///
/// Ids are assigned from 1 upward and never reused, like a serial column.
/// Note: Data is lost on process restart.
#[derive(Default)]
pub struct InMemoryNoticiaRepository {
    table: RwLock<Table>,
}

impl InMemoryNoticiaRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<Noticia, i32> for InMemoryNoticiaRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Noticia>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[async_trait]
impl NoticiaRepository for InMemoryNoticiaRepository {
    async fn list_recent(&self) -> Result<Vec<Noticia>, RepoError> {
        let table = self.table.read().await;
        let mut all: Vec<Noticia> = table.rows.values().cloned().collect();
        // Newest first; ties fall back to the higher id.
        all.sort_by(|a, b| {
            b.data_publicacao
                .cmp(&a.data_publicacao)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(all)
    }

    async fn insert(&self, noticia: NewNoticia) -> Result<Noticia, RepoError> {
        let mut table = self.table.write().await;
        let id = table
            .last_id
            .checked_add(1)
            .ok_or_else(|| RepoError::Constraint("id sequence exhausted".to_string()))?;
        table.last_id = id;

        let row = Noticia {
            id,
            titulo: noticia.titulo,
            conteudo: noticia.conteudo,
            imagem: noticia.imagem,
            data_publicacao: noticia.data_publicacao,
        };
        table.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn update(&self, id: i32, changes: NoticiaChanges) -> Result<Noticia, RepoError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&id).ok_or(RepoError::NotFound)?;
        row.apply(changes);
        Ok(row.clone())
    }
}
