//! Noticia entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "Noticia")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub titulo: String,
    #[sea_orm(column_type = "Text")]
    pub conteudo: String,
    #[sea_orm(column_type = "Text")]
    pub imagem: String,
    #[sea_orm(column_name = "dataPublicacao")]
    pub data_publicacao: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Noticia.
impl From<Model> for noticias_core::domain::Noticia {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            titulo: model.titulo,
            conteudo: model.conteudo,
            imagem: model.imagem,
            data_publicacao: model.data_publicacao.into(),
        }
    }
}

/// Insert model; the id is left to the sequence.
impl From<noticias_core::domain::NewNoticia> for ActiveModel {
    fn from(noticia: noticias_core::domain::NewNoticia) -> Self {
        Self {
            id: NotSet,
            titulo: Set(noticia.titulo),
            conteudo: Set(noticia.conteudo),
            imagem: Set(noticia.imagem),
            data_publicacao: Set(noticia.data_publicacao.into()),
        }
    }
}
