//! Relationship creation.
//!
//! Every new relationship passes the same steps: both emails must resolve,
//! the users must differ, nothing may already stand in the way, and only
//! then is a row written. A failing step leaves the store untouched.

use std::fmt;

use friendgraph_common::{AppError, AppResult, RelationshipConflict};
use friendgraph_db::repositories::{
    BlockingRepository, FriendRepository, SubscriptionRepository, UserRepository,
};

use super::user::UserService;

/// The kind of relationship being created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipKind {
    /// Undirected friendship.
    Friendship,
    /// The first user follows updates from the second.
    Subscription,
    /// The first user blocks the second.
    Block,
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Friendship => write!(f, "friendship"),
            Self::Subscription => write!(f, "subscription"),
            Self::Block => write!(f, "block"),
        }
    }
}

/// Creates friendships, subscriptions and blocks.
#[derive(Clone)]
pub struct RelationshipService {
    users: UserService,
    friend_repo: FriendRepository,
    subscription_repo: SubscriptionRepository,
    blocking_repo: BlockingRepository,
}

impl RelationshipService {
    /// Create a new relationship service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        friend_repo: FriendRepository,
        subscription_repo: SubscriptionRepository,
        blocking_repo: BlockingRepository,
    ) -> Self {
        Self {
            users: UserService::new(user_repo),
            friend_repo,
            subscription_repo,
            blocking_repo,
        }
    }

    /// Make two users friends.
    pub async fn add_friend(&self, first: &str, second: &str) -> AppResult<()> {
        self.create(RelationshipKind::Friendship, first, second)
            .await
    }

    /// Subscribe `requestor` to updates from `target`.
    pub async fn subscribe(&self, requestor: &str, target: &str) -> AppResult<()> {
        self.create(RelationshipKind::Subscription, requestor, target)
            .await
    }

    /// Make `requestor` block `target`.
    pub async fn block(&self, requestor: &str, target: &str) -> AppResult<()> {
        self.create(RelationshipKind::Block, requestor, target)
            .await
    }

    /// Create a relationship of `kind` from `first` to `second`.
    pub async fn create(
        &self,
        kind: RelationshipKind,
        first: &str,
        second: &str,
    ) -> AppResult<()> {
        let first_id = self.users.resolve_id(first).await?;
        let second_id = self.users.resolve_id(second).await?;

        if first_id == second_id {
            return Err(AppError::same_email());
        }

        if let Err(e) = self.check(kind, first_id, second_id).await {
            tracing::warn!(
                kind = %kind,
                first_id = first_id,
                second_id = second_id,
                reason = %e,
                "Relationship rejected"
            );
            return Err(e);
        }

        match kind {
            RelationshipKind::Friendship => {
                self.friend_repo.create(first_id, second_id).await?;
            }
            RelationshipKind::Subscription => {
                self.subscription_repo.create(first_id, second_id).await?;
            }
            RelationshipKind::Block => {
                self.blocking_repo.create(first_id, second_id).await?;
            }
        }

        tracing::info!(
            kind = %kind,
            first_id = first_id,
            second_id = second_id,
            "Relationship created"
        );

        Ok(())
    }

    /// Reject relationships that already exist or cross a block.
    async fn check(
        &self,
        kind: RelationshipKind,
        first_id: i32,
        second_id: i32,
    ) -> AppResult<()> {
        match kind {
            RelationshipKind::Friendship => {
                if self.friend_repo.exists_between(first_id, second_id).await? {
                    return Err(RelationshipConflict::AlreadyFriends.into());
                }
                self.ensure_not_blocked(first_id, second_id).await
            }
            RelationshipKind::Subscription => {
                if self
                    .subscription_repo
                    .is_subscribed(first_id, second_id)
                    .await?
                {
                    return Err(RelationshipConflict::AlreadySubscribed.into());
                }
                self.ensure_not_blocked(first_id, second_id).await
            }
            RelationshipKind::Block => {
                if self
                    .blocking_repo
                    .is_blocked_between(first_id, second_id)
                    .await?
                {
                    return Err(RelationshipConflict::AlreadyBlocked.into());
                }
                Ok(())
            }
        }
    }

    async fn ensure_not_blocked(&self, first_id: i32, second_id: i32) -> AppResult<()> {
        if self
            .blocking_repo
            .is_blocked_between(first_id, second_id)
            .await?
        {
            return Err(AppError::Blocked);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use friendgraph_db::entities::{friend, subscription, user, user_block};
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: i32, email: &str) -> user::Model {
        user::Model {
            id,
            name: "Test User".to_string(),
            email: email.to_string(),
        }
    }

    fn create_test_friend(id: i32, user_id: i32, friend_id: i32) -> friend::Model {
        friend::Model {
            id,
            user_id,
            friend_id,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_subscription(
        id: i32,
        requestor_id: i32,
        target_id: i32,
    ) -> subscription::Model {
        subscription::Model {
            id,
            requestor_id,
            target_id,
            created_at: Utc::now().into(),
        }
    }

    fn create_test_block(id: i32, requestor_id: i32, target_id: i32) -> user_block::Model {
        user_block::Model {
            id,
            requestor_id,
            target_id,
            created_at: Utc::now().into(),
        }
    }

    fn users_db(pairs: &[(i32, &str)]) -> MockDatabase {
        pairs
            .iter()
            .fold(MockDatabase::new(DatabaseBackend::Postgres), |db, (id, email)| {
                db.append_query_results([[create_test_user(*id, email)]])
            })
    }

    fn service(
        user_db: MockDatabase,
        friend_db: MockDatabase,
        subscription_db: MockDatabase,
        block_db: MockDatabase,
    ) -> RelationshipService {
        RelationshipService::new(
            UserRepository::new(Arc::new(user_db.into_connection())),
            FriendRepository::new(Arc::new(friend_db.into_connection())),
            SubscriptionRepository::new(Arc::new(subscription_db.into_connection())),
            BlockingRepository::new(Arc::new(block_db.into_connection())),
        )
    }

    fn empty() -> MockDatabase {
        MockDatabase::new(DatabaseBackend::Postgres)
    }

    #[tokio::test]
    async fn test_add_friend() {
        let service = service(
            users_db(&[(100, "john@example.com"), (101, "andy@example.com")]),
            empty()
                .append_query_results([Vec::<friend::Model>::new()])
                .append_query_results([[create_test_friend(1, 100, 101)]]),
            empty(),
            empty().append_query_results([Vec::<user_block::Model>::new()]),
        );

        let result = service
            .add_friend("john@example.com", "andy@example.com")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_add_friend_unknown_first_email() {
        // Nothing but the first lookup is queued; the second email is never resolved.
        let service = service(
            empty().append_query_results([Vec::<user::Model>::new()]),
            empty(),
            empty(),
            empty(),
        );

        let result = service
            .add_friend("ghost@example.com", "andy@example.com")
            .await;

        match result {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "ghost@example.com does not exist"),
            _ => panic!("Expected NotFound error"),
        }
    }

    #[tokio::test]
    async fn test_add_friend_already_friends() {
        let service = service(
            users_db(&[(100, "john@example.com"), (101, "andy@example.com")]),
            empty().append_query_results([[create_test_friend(1, 101, 100)]]),
            empty(),
            empty(),
        );

        let result = service
            .add_friend("john@example.com", "andy@example.com")
            .await;

        assert!(matches!(
            result,
            Err(AppError::Conflict(RelationshipConflict::AlreadyFriends))
        ));
    }

    #[tokio::test]
    async fn test_add_friend_same_user() {
        let service = service(
            users_db(&[(100, "john@example.com"), (100, "john@example.com")]),
            empty(),
            empty(),
            empty(),
        );

        let result = service
            .add_friend("john@example.com", "john@example.com")
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_block_then_add_friend_is_rejected() {
        let block = create_test_block(1, 100, 101);
        let service = service(
            users_db(&[
                (100, "john@example.com"),
                (101, "andy@example.com"),
                (100, "john@example.com"),
                (101, "andy@example.com"),
            ]),
            // No insert result queued for friends: an insert would fail differently.
            empty().append_query_results([Vec::<friend::Model>::new()]),
            empty(),
            empty()
                .append_query_results([Vec::<user_block::Model>::new()])
                .append_query_results([[block.clone()]])
                .append_query_results([[block]]),
        );

        service
            .block("john@example.com", "andy@example.com")
            .await
            .unwrap();

        let result = service
            .add_friend("john@example.com", "andy@example.com")
            .await;

        match result {
            Err(e @ AppError::Blocked) => {
                assert_eq!(e.to_string(), "The users have blocked each other");
            }
            _ => panic!("Expected Blocked error"),
        }
    }

    #[tokio::test]
    async fn test_subscribe() {
        let service = service(
            users_db(&[(100, "lisa@example.com"), (101, "john@example.com")]),
            empty(),
            empty()
                .append_query_results([Vec::<subscription::Model>::new()])
                .append_query_results([[create_test_subscription(1, 100, 101)]]),
            empty().append_query_results([Vec::<user_block::Model>::new()]),
        );

        let result = service
            .subscribe("lisa@example.com", "john@example.com")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_subscribe_twice() {
        let service = service(
            users_db(&[(100, "lisa@example.com"), (101, "john@example.com")]),
            empty(),
            empty().append_query_results([[create_test_subscription(1, 100, 101)]]),
            empty(),
        );

        let result = service
            .subscribe("lisa@example.com", "john@example.com")
            .await;

        assert!(matches!(
            result,
            Err(AppError::Conflict(RelationshipConflict::AlreadySubscribed))
        ));
    }

    #[tokio::test]
    async fn test_subscribe_across_block() {
        let service = service(
            users_db(&[(100, "lisa@example.com"), (101, "john@example.com")]),
            empty(),
            empty().append_query_results([Vec::<subscription::Model>::new()]),
            empty().append_query_results([[create_test_block(1, 101, 100)]]),
        );

        let result = service
            .subscribe("lisa@example.com", "john@example.com")
            .await;

        assert!(matches!(result, Err(AppError::Blocked)));
    }

    #[tokio::test]
    async fn test_block_reverse_existing() {
        let service = service(
            users_db(&[(100, "john@example.com"), (101, "andy@example.com")]),
            empty(),
            empty(),
            empty().append_query_results([[create_test_block(1, 101, 100)]]),
        );

        let result = service.block("john@example.com", "andy@example.com").await;

        match result {
            Err(e @ AppError::Conflict(RelationshipConflict::AlreadyBlocked)) => {
                assert_eq!(e.to_string(), "The blocking relationship already exists");
            }
            _ => panic!("Expected AlreadyBlocked conflict"),
        }
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(RelationshipKind::Friendship.to_string(), "friendship");
        assert_eq!(RelationshipKind::Block.to_string(), "block");
    }
}
