use super::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Archive::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Archive::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .unique_key()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Archive::Fileku).text().not_null())
                    .col(ColumnDef::new(Archive::Filename).text().not_null())
                    .col(
                        ColumnDef::new(Archive::ContentType)
                            .text()
                            .default("application/octet-stream")
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Archive::ByteSize)
                            .big_integer()
                            .default(0)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Archive::CreatedAt)
                            .date_time()
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Archive::UpdatedAt)
                            .date_time()
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Archive::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub(crate) enum Archive {
    Table,
    Id,
    Fileku,
    Filename,
    ContentType,
    ByteSize,
    CreatedAt,
    UpdatedAt,
}
