use sea_orm_migration::prelude::*;

/// Categories present on a fresh install.
const DEFAULT_CATEGORIES: [&str; 3] = ["Technology", "Health", "LifeStyle"];

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.create_table(categories_table()).await?;
        manager.create_table(posts_table()).await?;
        manager.create_table(comments_table()).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_posts_category_id")
                    .table(Posts::Table)
                    .col(Posts::CategoryId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_post_id")
                    .table(Comments::Table)
                    .col(Comments::PostId)
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        manager.exec_stmt(default_categories()?).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comments::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Posts::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Categories::Table).if_exists().to_owned())
            .await
    }
}

fn categories_table() -> TableCreateStatement {
    Table::create()
        .table(Categories::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Categories::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Categories::Name).string_len(150).not_null())
        .col(ColumnDef::new(Categories::Description).text().null())
        .to_owned()
}

fn posts_table() -> TableCreateStatement {
    Table::create()
        .table(Posts::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Posts::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Posts::Title).string_len(200).not_null())
        .col(ColumnDef::new(Posts::Content).text().not_null())
        .col(ColumnDef::new(Posts::Author).string_len(100).not_null())
        .col(
            ColumnDef::new(Posts::PublishedDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Posts::CategoryId).integer().not_null())
        .col(ColumnDef::new(Posts::FeatureImagePath).string().null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_posts_category")
                .from(Posts::Table, Posts::CategoryId)
                .to(Categories::Table, Categories::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Restrict),
        )
        .to_owned()
}

fn comments_table() -> TableCreateStatement {
    Table::create()
        .table(Comments::Table)
        .if_not_exists()
        .col(
            ColumnDef::new(Comments::Id)
                .integer()
                .not_null()
                .auto_increment()
                .primary_key(),
        )
        .col(ColumnDef::new(Comments::UserName).string_len(100).not_null())
        .col(
            ColumnDef::new(Comments::CommentDate)
                .timestamp_with_time_zone()
                .not_null(),
        )
        .col(ColumnDef::new(Comments::CommentContent).text().not_null())
        .col(ColumnDef::new(Comments::PostId).integer().not_null())
        .foreign_key(
            ForeignKey::create()
                .name("fk_comments_post")
                .from(Comments::Table, Comments::PostId)
                .to(Posts::Table, Posts::Id)
                .on_update(ForeignKeyAction::Cascade)
                .on_delete(ForeignKeyAction::Cascade),
        )
        .to_owned()
}

fn default_categories() -> Result<InsertStatement, DbErr> {
    let mut seed = Query::insert();
    seed.into_table(Categories::Table).columns([Categories::Name]);
    for name in DEFAULT_CATEGORIES {
        seed.values([Expr::value(name)])
            .map_err(|e| DbErr::Custom(e.to_string()))?;
    }
    Ok(seed)
}

#[derive(DeriveIden)]
enum Categories {
    Table,
    Id,
    Name,
    Description,
}

#[derive(DeriveIden)]
enum Posts {
    Table,
    Id,
    Title,
    Content,
    Author,
    PublishedDate,
    CategoryId,
    FeatureImagePath,
}

#[derive(DeriveIden)]
enum Comments {
    Table,
    Id,
    UserName,
    CommentDate,
    CommentContent,
    PostId,
}
