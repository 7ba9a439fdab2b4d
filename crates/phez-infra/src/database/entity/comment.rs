//! Comment entity for SeaORM. Comments are polymorphic; posts are the
//! `commentable_type = 'Post'` rows.

use sea_orm::entity::prelude::*;

pub const POST_COMMENTABLE: &str = "Post";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "comments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub commentable_id: Uuid,
    pub commentable_type: String,
    pub user_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
