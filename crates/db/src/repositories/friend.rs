//! Friendship repository.

use std::sync::Arc;

use super::insert_error;
use crate::entities::{Friend, friend};
use chrono::Utc;
use friendgraph_common::{AppError, AppResult, RelationshipConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Friendship repository for database operations.
///
/// A friendship is stored once per pair; either column may hold either user.
#[derive(Clone)]
pub struct FriendRepository {
    db: Arc<DatabaseConnection>,
}

impl FriendRepository {
    /// Create a new friendship repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All friendships that include `user_id`, oldest first.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<friend::Model>> {
        Friend::find()
            .filter(
                Condition::any()
                    .add(friend::Column::UserId.eq(user_id))
                    .add(friend::Column::FriendId.eq(user_id)),
            )
            .order_by_asc(friend::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the friendship between two users, in either direction.
    pub async fn find_between(&self, user_a: i32, user_b: i32) -> AppResult<Option<friend::Model>> {
        Friend::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(friend::Column::UserId.eq(user_a))
                            .add(friend::Column::FriendId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(friend::Column::UserId.eq(user_b))
                            .add(friend::Column::FriendId.eq(user_a)),
                    ),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether two users are friends.
    pub async fn exists_between(&self, user_a: i32, user_b: i32) -> AppResult<bool> {
        Ok(self.find_between(user_a, user_b).await?.is_some())
    }

    /// Create a friendship between two users.
    pub async fn create(&self, user_id: i32, friend_id: i32) -> AppResult<friend::Model> {
        let model = friend::ActiveModel {
            user_id: Set(user_id),
            friend_id: Set(friend_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| insert_error(&e, RelationshipConflict::AlreadyFriends))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_friend(id: i32, user_id: i32, friend_id: i32) -> friend::Model {
        friend::Model {
            id,
            user_id,
            friend_id,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_user_either_side() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_friend(1, 100, 101),
                    create_test_friend(2, 102, 100),
                ]])
                .into_connection(),
        );

        let repo = FriendRepository::new(db);
        let result = repo.find_by_user(100).await.unwrap();

        let others: Vec<i32> = result
            .iter()
            .filter_map(|f| f.pair().other(100))
            .collect();
        assert_eq!(others, vec![101, 102]);
    }

    #[tokio::test]
    async fn test_exists_between_true() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_friend(1, 101, 100)]])
                .into_connection(),
        );

        let repo = FriendRepository::new(db);
        assert!(repo.exists_between(100, 101).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_between_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<friend::Model>::new()])
                .into_connection(),
        );

        let repo = FriendRepository::new(db);
        assert!(!repo.exists_between(100, 101).await.unwrap());
    }

    #[tokio::test]
    async fn test_create() {
        let created = create_test_friend(1, 100, 101);
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[created.clone()]])
                .into_connection(),
        );

        let repo = FriendRepository::new(db);
        let result = repo.create(100, 101).await.unwrap();

        assert_eq!(result.id, 1);
        assert_eq!(result.pair(), created.pair());
    }
}
