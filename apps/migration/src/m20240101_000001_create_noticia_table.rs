use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Noticia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Noticia::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Noticia::Titulo).text().not_null())
                    .col(ColumnDef::new(Noticia::Conteudo).text().not_null())
                    .col(ColumnDef::new(Noticia::Imagem).text().not_null())
                    .col(
                        ColumnDef::new(Noticia::DataPublicacao)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing orders by publication date, newest first.
        manager
            .create_index(
                Index::create()
                    .name("idx_noticia_data_publicacao")
                    .table(Noticia::Table)
                    .col(Noticia::DataPublicacao)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Noticia::Table).if_exists().to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Noticia {
    #[sea_orm(iden = "Noticia")]
    Table,
    Id,
    Titulo,
    Conteudo,
    Imagem,
    #[sea_orm(iden = "dataPublicacao")]
    DataPublicacao,
}
