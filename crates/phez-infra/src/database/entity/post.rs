//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub body: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub url: Option<String>,
    pub is_self: bool,
    #[sea_orm(column_type = "Text")]
    pub guid: String,
    pub user_id: Uuid,
    pub subphez_id: Uuid,
    pub points: i32,
    pub hot_score: f64,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::subphez::Entity",
        from = "Column::SubphezId",
        to = "super::subphez::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Subphez,
    #[sea_orm(has_many = "super::vote::Entity")]
    Vote,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::subphez::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subphez.def()
    }
}

impl Related<super::vote::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Vote.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for phez_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            url: model.url,
            is_self: model.is_self,
            guid: model.guid,
            user_id: model.user_id,
            subphez_id: model.subphez_id,
            points: model.points,
            hot_score: model.hot_score,
            created_at: model.created_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<phez_core::domain::Post> for ActiveModel {
    fn from(post: phez_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            title: Set(post.title),
            body: Set(post.body),
            url: Set(post.url),
            is_self: Set(post.is_self),
            guid: Set(post.guid),
            user_id: Set(post.user_id),
            subphez_id: Set(post.subphez_id),
            points: Set(post.points),
            hot_score: Set(post.hot_score),
            created_at: Set(post.created_at.into()),
        }
    }
}
