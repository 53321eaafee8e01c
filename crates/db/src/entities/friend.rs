//! Friend entity (undirected friendship between two users).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::pair::UserPair;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "friends")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// The user whose email came first in the request
    pub user_id: i32,

    /// The other side of the friendship
    pub friend_id: i32,

    /// Created at
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// The friendship as an unordered pair.
    #[must_use]
    pub const fn pair(&self) -> UserPair {
        UserPair::new(self.user_id, self.friend_id)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,

    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::FriendId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Friend,
}

impl ActiveModelBehavior for ActiveModel {}
