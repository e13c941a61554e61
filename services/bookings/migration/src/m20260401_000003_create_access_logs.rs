use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AccessLogs::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AccessLogs::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AccessLogs::UserId).uuid().not_null())
                    .col(ColumnDef::new(AccessLogs::ClassId).uuid())
                    .col(ColumnDef::new(AccessLogs::StaffId).uuid())
                    .col(
                        ColumnDef::new(AccessLogs::EnteredAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(AccessLogs::GateLocation)
                            .string()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Recent-first listing.
        manager
            .create_index(
                Index::create()
                    .table(AccessLogs::Table)
                    .col(AccessLogs::EnteredAt)
                    .name("idx_access_logs_entered_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AccessLogs::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum AccessLogs {
    Table,
    Id,
    UserId,
    ClassId,
    StaffId,
    EnteredAt,
    GateLocation,
}
