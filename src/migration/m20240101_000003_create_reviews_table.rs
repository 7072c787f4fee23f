use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const DEFAULT_REVIEW_IMG_URL: &str =
    "https://images.pexels.com/photos/163064/play-stone-network-networked-interactive-163064.jpeg";

#[derive(DeriveIden)]
enum Reviews {
    Table,
    ReviewId,
    Title,
    Designer,
    Owner,
    ReviewImgUrl,
    ReviewBody,
    Category,
    CreatedAt,
    Votes,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Username,
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Slug,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reviews::ReviewId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Reviews::Title).string().not_null())
                    .col(ColumnDef::new(Reviews::Designer).string_len(40).not_null())
                    .col(ColumnDef::new(Reviews::Owner).string().not_null())
                    .col(
                        ColumnDef::new(Reviews::ReviewImgUrl)
                            .string()
                            .not_null()
                            .default(DEFAULT_REVIEW_IMG_URL),
                    )
                    .col(ColumnDef::new(Reviews::ReviewBody).text().not_null())
                    .col(ColumnDef::new(Reviews::Category).string_len(40).not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Reviews::Votes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_owner")
                            .from(Reviews::Table, Reviews::Owner)
                            .to(Users::Table, Users::Username)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_category")
                            .from(Reviews::Table, Reviews::Category)
                            .to(Categories::Table, Categories::Slug)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_category")
                    .table(Reviews::Table)
                    .col(Reviews::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_owner")
                    .table(Reviews::Table)
                    .col(Reviews::Owner)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}
