//! Database entities.

pub mod friend;
pub mod subscription;
pub mod user;
pub mod user_block;

pub use friend::Entity as Friend;
pub use subscription::Entity as Subscription;
pub use user::Entity as User;
pub use user_block::Entity as UserBlock;
