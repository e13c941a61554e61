use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipTiers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MembershipTiers::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(MembershipTiers::Name).string().not_null())
                    .col(
                        ColumnDef::new(MembershipTiers::Code)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(MembershipTiers::Level).integer().not_null())
                    .col(
                        ColumnDef::new(MembershipTiers::Features)
                            .json_binary()
                            .not_null()
                            .default(Expr::cust("'[]'::jsonb")),
                    )
                    .col(
                        ColumnDef::new(MembershipTiers::ImageSlug)
                            .string()
                            .not_null()
                            .default("default"),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MembershipTiers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum MembershipTiers {
    Table,
    Id,
    Name,
    Code,
    Level,
    Features,
    ImageSlug,
}
