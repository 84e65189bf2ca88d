//! Initial database migration.
//!
//! Creates the departments and attachees tables and the index used by status
//! reconciliation.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================================
        // PART 1: DEPARTMENTS
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Departments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Departments::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Departments::Name)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Departments::MaxCapacity).integer())
                    .col(
                        ColumnDef::new(Departments::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 2: ATTACHEES
        // ============================================================
        manager
            .create_table(
                Table::create()
                    .table(Attachees::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Attachees::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Attachees::DepartmentId).uuid().not_null())
                    .col(ColumnDef::new(Attachees::FirstName).string_len(100).not_null())
                    .col(ColumnDef::new(Attachees::LastName).string_len(100).not_null())
                    .col(ColumnDef::new(Attachees::Gender).string_len(20))
                    .col(ColumnDef::new(Attachees::Email).string_len(255))
                    .col(ColumnDef::new(Attachees::Phone).string_len(50))
                    .col(ColumnDef::new(Attachees::School).string_len(255))
                    .col(ColumnDef::new(Attachees::Course).string_len(255))
                    .col(ColumnDef::new(Attachees::LocationSlot).string_len(100))
                    .col(ColumnDef::new(Attachees::ProgressNotes).text())
                    .col(ColumnDef::new(Attachees::StartDate).date().not_null())
                    .col(ColumnDef::new(Attachees::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Attachees::Status)
                            .string_len(20)
                            .not_null()
                            .default("Active"),
                    )
                    .col(ColumnDef::new(Attachees::FiscalYear).string_len(9))
                    .col(
                        ColumnDef::new(Attachees::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-attachees-department")
                            .from(Attachees::Table, Attachees::DepartmentId)
                            .to(Departments::Table, Departments::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================================
        // PART 3: INDEXES
        // ============================================================
        manager
            .create_index(
                Index::create()
                    .name("idx-attachees-status-end-date")
                    .table(Attachees::Table)
                    .col(Attachees::Status)
                    .col(Attachees::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attachees-department-dates")
                    .table(Attachees::Table)
                    .col(Attachees::DepartmentId)
                    .col(Attachees::StartDate)
                    .col(Attachees::EndDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-attachees-fiscal-year")
                    .table(Attachees::Table)
                    .col(Attachees::FiscalYear)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Attachees::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Departments {
    Table,
    Id,
    Name,
    MaxCapacity,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Attachees {
    Table,
    Id,
    DepartmentId,
    FirstName,
    LastName,
    Gender,
    Email,
    Phone,
    School,
    Course,
    LocationSlot,
    ProgressNotes,
    StartDate,
    EndDate,
    Status,
    FiscalYear,
    CreatedAt,
}
