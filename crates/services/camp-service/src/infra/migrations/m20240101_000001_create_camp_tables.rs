//! Migration: Create campers, activities and signups tables.
//!
//! Constraint names follow `fk_<table>_<column>_<referred_table>` and
//! `ix_<table>_<column>`.

use sea_orm_migration::prelude::*;

use domain::{MAX_CAMPER_AGE, MAX_SIGNUP_HOUR, MIN_CAMPER_AGE, MIN_SIGNUP_HOUR};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Campers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Campers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Campers::Name).string().not_null())
                    .col(
                        ColumnDef::new(Campers::Age)
                            .integer()
                            .not_null()
                            .check(Expr::col(Campers::Age).between(MIN_CAMPER_AGE, MAX_CAMPER_AGE)),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Activities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Activities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Activities::Name).string().not_null())
                    .col(ColumnDef::new(Activities::Difficulty).integer().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Signups::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Signups::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Signups::Time)
                            .integer()
                            .not_null()
                            .check(
                                Expr::col(Signups::Time).between(MIN_SIGNUP_HOUR, MAX_SIGNUP_HOUR),
                            ),
                    )
                    .col(ColumnDef::new(Signups::CamperId).integer().not_null())
                    .col(ColumnDef::new(Signups::ActivityId).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signups_camper_id_campers")
                            .from(Signups::Table, Signups::CamperId)
                            .to(Campers::Table, Campers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_signups_activity_id_activities")
                            .from(Signups::Table, Signups::ActivityId)
                            .to(Activities::Table, Activities::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Signups are looked up by either parent
        manager
            .create_index(
                Index::create()
                    .name("ix_signups_camper_id")
                    .table(Signups::Table)
                    .col(Signups::CamperId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_signups_activity_id")
                    .table(Signups::Table)
                    .col(Signups::ActivityId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Child table first
        manager
            .drop_table(Table::drop().table(Signups::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Activities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Campers::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Campers {
    Table,
    Id,
    Name,
    Age,
}

#[derive(Iden)]
enum Activities {
    Table,
    Id,
    Name,
    Difficulty,
}

#[derive(Iden)]
enum Signups {
    Table,
    Id,
    Time,
    CamperId,
    ActivityId,
}
