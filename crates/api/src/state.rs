//! Shared application state.

use std::sync::Arc;

use friendgraph_core::{GraphService, RelationshipService, UserService};
use friendgraph_db::repositories::{
    BlockingRepository, FriendRepository, SubscriptionRepository, UserRepository,
};
use sea_orm::DatabaseConnection;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// User lookups.
    pub user_service: UserService,
    /// Friends, common friends and recipients.
    pub graph_service: GraphService,
    /// Friendship, subscription and block creation.
    pub relationship_service: RelationshipService,
}

impl AppState {
    /// Wire repositories and services over one connection pool.
    #[must_use]
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        let user_repo = UserRepository::new(Arc::clone(&db));
        let friend_repo = FriendRepository::new(Arc::clone(&db));
        let subscription_repo = SubscriptionRepository::new(Arc::clone(&db));
        let blocking_repo = BlockingRepository::new(db);

        Self {
            user_service: UserService::new(user_repo.clone()),
            graph_service: GraphService::new(
                user_repo.clone(),
                friend_repo.clone(),
                blocking_repo.clone(),
            ),
            relationship_service: RelationshipService::new(
                user_repo,
                friend_repo,
                subscription_repo,
                blocking_repo,
            ),
        }
    }
}
