//! Core business logic for friendgraph.
//!
//! Services resolve emails to users, answer graph queries (friends, common
//! friends, message recipients) and guard creation of new relationships.

pub mod services;

pub use services::*;
