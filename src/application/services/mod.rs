//! Application Services
//!
//! Services that coordinate domain and storage operations.
//!
//! ## Available Services
//!
//! - **ChatRegistry**: create/read/update/delete for chats and memberships

pub mod chat_registry;

pub use chat_registry::ChatRegistry;
