//! Comment entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_name: String,
    pub comment_date: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Text")]
    pub comment_content: String,
    pub post_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::post::Entity",
        from = "Column::PostId",
        to = "super::post::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Post,
}

impl Related<super::post::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Post.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for blogfeed_core::domain::Comment {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            comment_date: model.comment_date.into(),
            comment_content: model.comment_content,
            post_id: model.post_id,
        }
    }
}

impl From<blogfeed_core::domain::Comment> for ActiveModel {
    fn from(comment: blogfeed_core::domain::Comment) -> Self {
        Self {
            id: if comment.id == 0 { NotSet } else { Set(comment.id) },
            user_name: Set(comment.user_name),
            comment_date: Set(comment.comment_date.into()),
            comment_content: Set(comment.comment_content),
            post_id: Set(comment.post_id),
        }
    }
}
