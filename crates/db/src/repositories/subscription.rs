//! Subscription repository.

use std::sync::Arc;

use super::insert_error;
use crate::entities::{Subscription, subscription};
use chrono::Utc;
use friendgraph_common::{AppError, AppResult, RelationshipConflict};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Subscription repository for database operations.
#[derive(Clone)]
pub struct SubscriptionRepository {
    db: Arc<DatabaseConnection>,
}

impl SubscriptionRepository {
    /// Create a new subscription repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find the subscription of `requestor_id` to `target_id`.
    pub async fn find_by_pair(
        &self,
        requestor_id: i32,
        target_id: i32,
    ) -> AppResult<Option<subscription::Model>> {
        Subscription::find()
            .filter(subscription::Column::RequestorId.eq(requestor_id))
            .filter(subscription::Column::TargetId.eq(target_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether `requestor_id` subscribes to `target_id`.
    pub async fn is_subscribed(&self, requestor_id: i32, target_id: i32) -> AppResult<bool> {
        Ok(self.find_by_pair(requestor_id, target_id).await?.is_some())
    }

    /// Subscribe `requestor_id` to updates from `target_id`.
    pub async fn create(
        &self,
        requestor_id: i32,
        target_id: i32,
    ) -> AppResult<subscription::Model> {
        let model = subscription::ActiveModel {
            requestor_id: Set(requestor_id),
            target_id: Set(target_id),
            created_at: Set(Utc::now().into()),
            ..Default::default()
        };

        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| insert_error(&e, RelationshipConflict::AlreadySubscribed))
    }
}
