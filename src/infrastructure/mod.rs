//! Infrastructure Layer
//!
//! Contains the SQLite implementations:
//! - Connection pool, schema bootstrap, and sessions
//! - Repositories for chats and memberships

pub mod database;
pub mod repositories;
