//! Business logic services.

pub mod graph;
pub mod relationship;
pub mod user;

pub use graph::GraphService;
pub use relationship::{RelationshipKind, RelationshipService};
pub use user::UserService;
