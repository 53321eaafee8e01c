//! User block entity.
//!
//! Stored with a direction, but a row forbids interaction both ways.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pair::UserPair;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_blocks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The user who recorded the block
    pub requestor_id: i32,

    /// The user being blocked
    pub target_id: i32,

    /// Created at
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// The block as an unordered pair.
    #[must_use]
    pub const fn pair(&self) -> UserPair {
        UserPair::new(self.requestor_id, self.target_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::RequestorId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Requestor,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TargetId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Target,
}

impl ActiveModelBehavior for ActiveModel {}
