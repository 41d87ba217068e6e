// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create news table
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(News::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(News::Title).string().not_null())
                    .col(ColumnDef::new(News::Description).text().not_null())
                    .col(ColumnDef::new(News::Url).string().not_null())
                    .col(ColumnDef::new(News::PublicationDate).timestamp_with_time_zone())
                    .col(ColumnDef::new(News::SourceName).string().not_null())
                    .col(ColumnDef::new(News::Category).string().not_null())
                    .col(
                        ColumnDef::new(News::RelevanceScore)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(News::Latitude).double())
                    .col(ColumnDef::new(News::Longitude).double())
                    .to_owned(),
            )
            .await?;

        // Create user_activities table. Rows are append-only.
        manager
            .create_table(
                Table::create()
                    .table(UserActivities::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserActivities::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(UserActivities::UserId).big_integer().not_null())
                    .col(ColumnDef::new(UserActivities::NewsId).big_integer().not_null())
                    .col(
                        ColumnDef::new(UserActivities::ActivityType)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserActivities::ActivityTime)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // The trending aggregate always filters on news_id
        manager
            .create_index(
                Index::create()
                    .name("idx_user_activities_news_id")
                    .table(UserActivities::Table)
                    .col(UserActivities::NewsId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserActivities::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(News::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum News {
    Table,
    Id,
    Title,
    Description,
    Url,
    PublicationDate,
    SourceName,
    Category,
    RelevanceScore,
    Latitude,
    Longitude,
}

#[derive(DeriveIden)]
enum UserActivities {
    Table,
    Id,
    UserId,
    NewsId,
    ActivityType,
    ActivityTime,
}
