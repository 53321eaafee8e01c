//! Blocking repository.

use std::sync::Arc;

use super::insert_error;
use crate::entities::{UserBlock, user_block};
use chrono::Utc;
use friendgraph_common::{AppError, AppResult, RelationshipConflict};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Blocking repository for database operations.
#[derive(Clone)]
pub struct BlockingRepository {
    db: Arc<DatabaseConnection>,
}

impl BlockingRepository {
    /// Create a new blocking repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// All blocks in which `user_id` is either the requestor or the target.
    pub async fn find_by_user(&self, user_id: i32) -> AppResult<Vec<user_block::Model>> {
        UserBlock::find()
            .filter(
                Condition::any()
                    .add(user_block::Column::RequestorId.eq(user_id))
                    .add(user_block::Column::TargetId.eq(user_id)),
            )
            .order_by_asc(user_block::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a block between two users, whoever requested it.
    pub async fn find_between(
        &self,
        user_a: i32,
        user_b: i32,
    ) -> AppResult<Option<user_block::Model>> {
        UserBlock::find()
            .filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(user_block::Column::RequestorId.eq(user_a))
                            .add(user_block::Column::TargetId.eq(user_b)),
                    )
                    .add(
                        Condition::all()
                            .add(user_block::Column::RequestorId.eq(user_b))
                            .add(user_block::Column::TargetId.eq(user_a)),
                    ),
            )
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check if either user is blocking the other.
    pub async fn is_blocked_between(&self, user_a: i32, user_b: i32) -> AppResult<bool> {
        Ok(self.find_between(user_a, user_b).await?.is_some())
    }

    /// Record that `requestor_id` blocks `target_id`.
    pub async fn create(&self, requestor_id: i32, target_id: i32) -> AppResult<user_block::Model> {
        let model = user_block::ActiveModel {
            requestor_id: Set(requestor_id),
            target_id: Set(target_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| insert_error(&e, RelationshipConflict::AlreadyBlocked))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_block(id: i32, requestor_id: i32, target_id: i32) -> user_block::Model {
        user_block::Model {
            id,
            requestor_id,
            target_id,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_is_blocked_between_reverse_direction() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_block(1, 101, 100)]])
                .into_connection(),
        );

        let repo = BlockingRepository::new(db);
        assert!(repo.is_blocked_between(100, 101).await.unwrap());
    }

    #[tokio::test]
    async fn test_is_blocked_between_none() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_block::Model>::new()])
                .into_connection(),
        );

        let repo = BlockingRepository::new(db);
        assert!(!repo.is_blocked_between(100, 101).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_by_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_block(1, 100, 103),
                    create_test_block(2, 104, 100),
                ]])
                .into_connection(),
        );

        let repo = BlockingRepository::new(db);
        let blocked: Vec<i32> = repo
            .find_by_user(100)
            .await
            .unwrap()
            .iter()
            .filter_map(|b| b.pair().other(100))
            .collect();

        assert_eq!(blocked, vec![103, 104]);
    }

    #[tokio::test]
    async fn test_create() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_block(5, 100, 101)]])
                .into_connection(),
        );

        let repo = BlockingRepository::new(db);
        let result = repo.create(100, 101).await.unwrap();

        assert_eq!(result.id, 5);
        assert_eq!(result.requestor_id, 100);
    }
}
