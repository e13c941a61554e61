use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bookings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bookings::UserId).uuid().not_null())
                    .col(ColumnDef::new(Bookings::ClassId).uuid().not_null())
                    .col(
                        ColumnDef::new(Bookings::BookingDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Bookings::Status)
                            .string()
                            .not_null()
                            .default("confirmed"),
                    )
                    .col(
                        ColumnDef::new(Bookings::StatusPayment)
                            .string()
                            .not_null()
                            .default("unpaid"),
                    )
                    .col(ColumnDef::new(Bookings::CheckoutAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Bookings::Table, Bookings::ClassId)
                            .to(Classes::Table, Classes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Occupancy counts and overlap checks filter by class and user.
        manager
            .create_index(
                Index::create()
                    .table(Bookings::Table)
                    .col(Bookings::ClassId)
                    .name("idx_bookings_class_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Bookings::Table)
                    .col(Bookings::UserId)
                    .name("idx_bookings_user_id")
                    .to_owned(),
            )
            .await?;

        // At most one live booking per (user, class). Partial indexes are
        // not expressible through the builder, so raw SQL.
        manager
            .get_connection()
            .execute_unprepared(
                "CREATE UNIQUE INDEX uq_bookings_user_class_live \
                 ON bookings (user_id, class_id) \
                 WHERE status <> 'cancelled'",
            )
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bookings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Bookings {
    Table,
    Id,
    UserId,
    ClassId,
    BookingDate,
    Status,
    StatusPayment,
    CheckoutAt,
}

#[derive(Iden)]
enum Classes {
    Table,
    Id,
}
