//! User repository.

use std::{collections::HashMap, sync::Arc};

use crate::entities::{User, user};
use friendgraph_common::{AppError, AppResult};
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbBackend, EntityTrait, FromQueryResult, QueryFilter,
    QueryOrder, Statement,
};

/// A user reachable from a sender, with the email already resolved.
#[derive(Debug, Clone, PartialEq, Eq, FromQueryResult)]
pub struct Associate {
    /// User ID.
    pub id: i32,
    /// User email.
    pub email: String,
}

/// Friends of the sender plus subscribers of the sender, minus anyone in a
/// block with the sender in either direction.
const ASSOCIATES_SQL: &str = r"
    SELECT val.id, val.email FROM (
        SELECT u.id, u.email
        FROM users u JOIN friends f ON (u.id = f.user_id OR u.id = f.friend_id)
        WHERE u.id <> $1 AND (f.user_id = $1 OR f.friend_id = $1)
        UNION
        SELECT u.id, u.email
        FROM subscriptions s JOIN users u ON s.requestor_id = u.id
        WHERE u.id <> $1 AND s.target_id = $1
    ) AS val
    WHERE NOT EXISTS (
        SELECT 1 FROM user_blocks b
        WHERE (b.requestor_id = val.id AND b.target_id = $1)
           OR (b.target_id = val.id AND b.requestor_id = $1)
    )
    ORDER BY val.id
";

/// User repository for database operations.
#[derive(Clone)]
pub struct UserRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRepository {
    /// Create a new user repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user by email, compared exactly as stored.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<user::Model>> {
        User::find()
            .filter(user::Column::Email.eq(email))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find the id of the user owning `email`.
    pub async fn find_id_by_email(&self, email: &str) -> AppResult<Option<i32>> {
        Ok(self.find_by_email(email).await?.map(|u| u.id))
    }

    /// Resolve ids to emails in one query.
    ///
    /// The result follows the order of `ids`; ids without a user are skipped.
    pub async fn find_emails_by_ids(&self, ids: &[i32]) -> AppResult<Vec<String>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        let users = User::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut by_id: HashMap<i32, String> = users.into_iter().map(|u| (u.id, u.email)).collect();

        Ok(ids.iter().filter_map(|id| by_id.remove(id)).collect())
    }

    /// Get all users ordered by id.
    pub async fn find_all(&self) -> AppResult<Vec<user::Model>> {
        User::find()
            .order_by_asc(user::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Friends and subscribers of `sender_id` that are not blocked either way.
    pub async fn find_associates_excluding_blocked(
        &self,
        sender_id: i32,
    ) -> AppResult<Vec<Associate>> {
        Associate::find_by_statement(Statement::from_sql_and_values(
            DbBackend::Postgres,
            ASSOCIATES_SQL,
            [sender_id.into()],
        ))
        .all(self.db.as_ref())
        .await
        .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use maplit::btreemap;
    use sea_orm::{DatabaseBackend, MockDatabase, Value};

    fn create_test_user(id: i32, email: &str) -> user::Model {
        user::Model {
            id,
            name: email.split('@').next().unwrap_or_default().to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_find_id_by_email_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[create_test_user(100, "john@example.com")]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_id_by_email("john@example.com").await.unwrap();

        assert_eq!(result, Some(100));
    }

    #[tokio::test]
    async fn test_find_id_by_email_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_id_by_email("nobody@example.com").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_find_emails_by_ids_empty_skips_query() {
        // No query results appended: any query would fail.
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = UserRepository::new(db);
        let result = repo.find_emails_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_find_emails_by_ids_follows_input_order() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_user(101, "andy@example.com"),
                    create_test_user(102, "common@example.com"),
                ]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_emails_by_ids(&[102, 101]).await.unwrap();

        assert_eq!(result, vec!["common@example.com", "andy@example.com"]);
    }

    #[tokio::test]
    async fn test_find_all() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[
                    create_test_user(100, "john@example.com"),
                    create_test_user(101, "andy@example.com"),
                ]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_all().await.unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].email, "john@example.com");
    }

    #[tokio::test]
    async fn test_find_associates_excluding_blocked() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([vec![
                    btreemap! {
                        "id" => Into::<Value>::into(101),
                        "email" => Into::<Value>::into("lisa@example.com"),
                    },
                    btreemap! {
                        "id" => Into::<Value>::into(104),
                        "email" => Into::<Value>::into("kate@example.com"),
                    },
                ]])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_associates_excluding_blocked(100).await.unwrap();

        assert_eq!(
            result,
            vec![
                Associate {
                    id: 101,
                    email: "lisa@example.com".to_string()
                },
                Associate {
                    id: 104,
                    email: "kate@example.com".to_string()
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_database_error_is_propagated() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_errors([sea_orm::DbErr::Custom("connection reset".to_string())])
                .into_connection(),
        );

        let repo = UserRepository::new(db);
        let result = repo.find_all().await;

        match result {
            Err(AppError::Database(message)) => assert!(message.contains("connection reset")),
            other => panic!("Expected database error, got {other:?}"),
        }
    }
}
