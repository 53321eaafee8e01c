//! Repository layer for database operations.

mod blocking;
mod friend;
mod subscription;
mod user;

pub use blocking::BlockingRepository;
pub use friend::FriendRepository;
pub use subscription::SubscriptionRepository;
pub use user::{Associate, UserRepository};

use friendgraph_common::{AppError, RelationshipConflict};
use sea_orm::{DbErr, SqlErr};

/// Map an insert failure, turning a unique index hit into `conflict`.
pub(crate) fn insert_error(err: &DbErr, conflict: RelationshipConflict) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::Conflict(conflict),
        _ => AppError::Database(err.to_string()),
    }
}
