//! Common utilities and shared types for friendgraph.
//!
//! This crate provides foundational components used across all friendgraph crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Email pattern**: Address validation and mention scanning
//!
//! # Example
//!
//! ```no_run
//! use friendgraph_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on port {}", config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod email;
pub mod error;

pub use config::Config;
pub use email::{is_valid_email, mentioned_emails};
pub use error::{AppError, AppResult, RelationshipConflict};
