//! Migration: Create cars, car_services and tickets tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Cars::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Cars::Id).uuid().not_null().primary_key())
                    // One car per employee
                    .col(ColumnDef::new(Cars::OwnerId).uuid().not_null().unique_key())
                    .col(ColumnDef::new(Cars::RegistrationNumber).string().null())
                    .col(ColumnDef::new(Cars::Model).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_cars_owner")
                            .from(Cars::Table, Cars::OwnerId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CarServices::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CarServices::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CarServices::CarId).uuid().not_null())
                    .col(ColumnDef::new(CarServices::Description).string().null())
                    .col(
                        ColumnDef::new(CarServices::ScheduledAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_car_services_car")
                            .from(CarServices::Table, CarServices::CarId)
                            .to(Cars::Table, Cars::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tickets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Tickets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Tickets::UserId).uuid().not_null())
                    .col(ColumnDef::new(Tickets::Title).string().not_null())
                    .col(ColumnDef::new(Tickets::Status).string().not_null())
                    .col(
                        ColumnDef::new(Tickets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tickets_user")
                            .from(Tickets::Table, Tickets::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tickets::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CarServices::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cars::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Cars {
    Table,
    Id,
    OwnerId,
    RegistrationNumber,
    Model,
}

#[derive(Iden)]
enum CarServices {
    Table,
    Id,
    CarId,
    Description,
    ScheduledAt,
}

#[derive(Iden)]
enum Tickets {
    Table,
    Id,
    UserId,
    Title,
    Status,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
