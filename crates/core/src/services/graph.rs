//! Graph queries over friendships, subscriptions and blocks.

use std::collections::HashSet;

use friendgraph_common::{AppError, AppResult, mentioned_emails};
use friendgraph_db::repositories::{BlockingRepository, FriendRepository, UserRepository};

use super::user::UserService;

/// Read-only views over the relationship graph.
#[derive(Clone)]
pub struct GraphService {
    users: UserService,
    user_repo: UserRepository,
    friend_repo: FriendRepository,
    blocking_repo: BlockingRepository,
}

impl GraphService {
    /// Create a new graph service.
    #[must_use]
    pub fn new(
        user_repo: UserRepository,
        friend_repo: FriendRepository,
        blocking_repo: BlockingRepository,
    ) -> Self {
        Self {
            users: UserService::new(user_repo.clone()),
            user_repo,
            friend_repo,
            blocking_repo,
        }
    }

    /// Emails of the friends of `user_id`, leaving out anyone in a block with
    /// them in either direction.
    pub async fn friends_without_blocks(&self, user_id: i32) -> AppResult<Vec<String>> {
        let friend_ids: Vec<i32> = self
            .friend_repo
            .find_by_user(user_id)
            .await?
            .iter()
            .filter_map(|f| f.pair().other(user_id))
            .collect();

        let blocked: HashSet<i32> = self
            .blocking_repo
            .find_by_user(user_id)
            .await?
            .iter()
            .filter_map(|b| b.pair().other(user_id))
            .collect();

        let visible: Vec<i32> = friend_ids
            .into_iter()
            .filter(|id| !blocked.contains(id))
            .collect();

        tracing::debug!(
            user_id = user_id,
            friends = visible.len(),
            blocked = blocked.len(),
            "Resolved friends without blocks"
        );

        self.users.resolve_emails(&visible).await
    }

    /// Friends of the user owning `email`.
    pub async fn friends_of(&self, email: &str) -> AppResult<Vec<String>> {
        let user_id = self.users.resolve_id(email).await?;
        self.friends_without_blocks(user_id).await
    }

    /// Friends shared by two users, in the order of the second user's list.
    pub async fn common_friends(&self, first: &str, second: &str) -> AppResult<Vec<String>> {
        if first == second {
            return Err(AppError::same_email());
        }

        let first_id = self.users.resolve_id(first).await?;
        let second_id = self.users.resolve_id(second).await?;

        let first_friends: HashSet<String> = self
            .friends_without_blocks(first_id)
            .await?
            .into_iter()
            .collect();
        let second_friends = self.friends_without_blocks(second_id).await?;

        Ok(second_friends
            .into_iter()
            .filter(|email| first_friends.contains(email))
            .collect())
    }

    /// Who receives a message from `sender`.
    ///
    /// Non-blocked friends and subscribers come first, ordered by user id,
    /// followed by addresses mentioned in `text` in order of appearance.
    /// Every address appears once.
    pub async fn recipients(&self, sender: &str, text: &str) -> AppResult<Vec<String>> {
        let sender_id = self.users.resolve_id(sender).await?;

        let associates = self
            .user_repo
            .find_associates_excluding_blocked(sender_id)
            .await?;

        let mut seen = HashSet::new();
        let mut recipients = Vec::with_capacity(associates.len());

        for associate in associates {
            if seen.insert(associate.email.clone()) {
                recipients.push(associate.email);
            }
        }

        let associate_count = recipients.len();

        for mention in mentioned_emails(text) {
            if seen.insert(mention.to_string()) {
                recipients.push(mention.to_string());
            }
        }

        tracing::debug!(
            sender_id = sender_id,
            associates = associate_count,
            mentioned = recipients.len() - associate_count,
            "Resolved message recipients"
        );

        Ok(recipients)
    }
}
