use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Users::Username).string().not_null().unique_key())
                    .col(created_at(Users::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subphezes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subphezes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Subphezes::Name).string().not_null())
                    .col(ColumnDef::new(Subphezes::Path).string().not_null().unique_key())
                    .col(created_at(Subphezes::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::Title).text().not_null())
                    .col(ColumnDef::new(Posts::Body).text().null())
                    .col(ColumnDef::new(Posts::Url).text().null())
                    .col(ColumnDef::new(Posts::IsSelf).boolean().not_null())
                    .col(ColumnDef::new(Posts::Guid).text().not_null())
                    .col(ColumnDef::new(Posts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Posts::SubphezId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Points).integer().not_null().default(0))
                    .col(ColumnDef::new(Posts::HotScore).double().not_null().default(0.0))
                    .col(created_at(Posts::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_user")
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_posts_subphez")
                            .from(Posts::Table, Posts::SubphezId)
                            .to(Subphezes::Table, Subphezes::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Votes go with their post.
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Votes::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Votes::PostId).uuid().not_null())
                    .col(ColumnDef::new(Votes::UserId).uuid().not_null())
                    .col(ColumnDef::new(Votes::VoteValue).integer().not_null())
                    .col(created_at(Votes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_post")
                            .from(Votes::Table, Votes::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_user")
                            .from(Votes::Table, Votes::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comments::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comments::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comments::CommentableId).uuid().not_null())
                    .col(ColumnDef::new(Comments::CommentableType).string().not_null())
                    .col(ColumnDef::new(Comments::UserId).uuid().not_null())
                    .col(ColumnDef::new(Comments::Body).text().not_null())
                    .col(created_at(Comments::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(SubphezModerators::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(SubphezModerators::SubphezId).uuid().not_null())
                    .col(ColumnDef::new(SubphezModerators::UserId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(SubphezModerators::SubphezId)
                            .col(SubphezModerators::UserId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subphez_moderators_subphez")
                            .from(SubphezModerators::Table, SubphezModerators::SubphezId)
                            .to(Subphezes::Table, Subphezes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscriptions::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Subscriptions::UserId).uuid().not_null())
                    .col(ColumnDef::new(Subscriptions::SubphezId).uuid().not_null())
                    .col(created_at(Subscriptions::CreatedAt))
                    .primary_key(
                        Index::create()
                            .col(Subscriptions::UserId)
                            .col(Subscriptions::SubphezId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_subscriptions_subphez")
                            .from(Subscriptions::Table, Subscriptions::SubphezId)
                            .to(Subphezes::Table, Subphezes::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One vote per user and post.
        manager
            .create_index(
                Index::create()
                    .name("idx_votes_post_user")
                    .table(Votes::Table)
                    .col(Votes::PostId)
                    .col(Votes::UserId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            ("idx_posts_created_at", Posts::CreatedAt),
            ("idx_posts_points", Posts::Points),
            ("idx_posts_hot_score", Posts::HotScore),
            ("idx_posts_subphez_id", Posts::SubphezId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(Posts::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_commentable")
                    .table(Comments::Table)
                    .col(Comments::CommentableType)
                    .col(Comments::CommentableId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Subscriptions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(SubphezModerators::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Comments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Votes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subphezes::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await
    }
}

fn created_at<T: Iden + 'static>(column: T) -> ColumnDef {
    ColumnDef::new(column)
        .timestamp_with_time_zone()
        .not_null()
        .default(Expr::current_timestamp())
        .to_owned()
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Subphezes {
    Table,
    Id,
    Name,
    Path,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Body,
    Url,
    IsSelf,
    Guid,
    UserId,
    SubphezId,
    Points,
    HotScore,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    Id,
    PostId,
    UserId,
    VoteValue,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    CommentableId,
    CommentableType,
    UserId,
    Body,
    CreatedAt,
}

#[derive(DeriveIden)]
enum SubphezModerators {
    Table,
    SubphezId,
    UserId,
}

#[derive(DeriveIden)]
enum Subscriptions {
    Table,
    UserId,
    SubphezId,
    CreatedAt,
}
