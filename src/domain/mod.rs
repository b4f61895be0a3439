//! # Domain Layer
//!
//! Entities of the chat registry, independent of the storage backend.
//!
//! - **entities**: `Individual`, `Group`, `Membership`, and their patches

pub mod entities;

// Re-export commonly used types
pub use entities::*;
