//! Repository Implementations
//!
//! SQLite data access for the registry's tables.
//!
//! ## Available Repositories
//!
//! - **ChatRepository** - Trait implemented by `Individual` and `Group`
//! - **MembershipRepository** - The `memberships` junction table
//!
//! Repositories never open their own connections: each function takes the
//! connection of the caller's `Session`.
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use crate::domain::Group;
//! use crate::infrastructure::repositories::ChatRepository;
//!
//! let mut session = sessions.open().await?;
//! let group = Group::find_by_external_id(session.conn(), 200).await?;
//! ```

pub mod chat_repository;
pub mod group_repository;
pub mod individual_repository;
pub mod membership_repository;

pub use chat_repository::ChatRepository;
pub use membership_repository::MembershipRepository;
