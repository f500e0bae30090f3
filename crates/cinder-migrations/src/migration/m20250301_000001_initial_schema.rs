use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========================================
        // BURN_ARCHIVES TABLE
        // ========================================
        manager
            .create_table(
                Table::create()
                    .table(BurnArchives::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BurnArchives::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BurnArchives::Currency).text().not_null())
                    .col(
                        ColumnDef::new(BurnArchives::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // ========================================
        // BURN_RECORDS TABLE
        // ========================================
        manager
            .create_table(
                Table::create()
                    .table(BurnRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(BurnRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(BurnRecords::ArchiveId).integer().not_null())
                    .col(ColumnDef::new(BurnRecords::Date).date().not_null())
                    .col(
                        ColumnDef::new(BurnRecords::TransactionRef)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(BurnRecords::BurnAmount).double().not_null())
                    .col(
                        ColumnDef::new(BurnRecords::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(BurnRecords::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_burn_records_archive")
                            .from(BurnRecords::Table, BurnRecords::ArchiveId)
                            .to(BurnArchives::Table, BurnArchives::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // One burn record per calendar day; concurrent check-then-insert
        // races resolve against this constraint.
        manager
            .create_index(
                Index::create()
                    .name("idx_burn_records_date_unique")
                    .table(BurnRecords::Table)
                    .col(BurnRecords::Date)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_burn_records_archive_id")
                    .table(BurnRecords::Table)
                    .col(BurnRecords::ArchiveId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_burn_records_archive_id")
                    .table(BurnRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_burn_records_date_unique")
                    .table(BurnRecords::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(BurnRecords::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(BurnArchives::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum BurnArchives {
    Table,
    Id,
    Currency,
    CreatedAt,
}

#[derive(DeriveIden)]
enum BurnRecords {
    Table,
    Id,
    ArchiveId,
    Date,
    TransactionRef,
    BurnAmount,
    CreatedAt,
    UpdatedAt,
}
