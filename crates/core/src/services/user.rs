//! User service.

use friendgraph_common::{AppError, AppResult};
use friendgraph_db::repositories::UserRepository;

/// Translates between emails and user ids.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self { user_repo }
    }

    /// Resolve an email to a user id.
    ///
    /// The email is matched exactly as given.
    pub async fn resolve_id(&self, email: &str) -> AppResult<i32> {
        self.user_repo
            .find_id_by_email(email)
            .await?
            .ok_or_else(|| AppError::email_not_found(email))
    }

    /// Resolve ids to emails, preserving the order of `ids`.
    pub async fn resolve_emails(&self, ids: &[i32]) -> AppResult<Vec<String>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        self.user_repo.find_emails_by_ids(ids).await
    }

    /// Emails of every user, ordered by id.
    pub async fn list_emails(&self) -> AppResult<Vec<String>> {
        let users = self.user_repo.find_all().await?;
        Ok(users.into_iter().map(|u| u.email).collect())
    }
}
