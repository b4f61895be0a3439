//! # Chat Registry Library
//!
//! Persistence for a messaging bot's chat registry:
//! - Individual chats and group chats keyed by their platform id
//! - A many-to-many membership relation between them
//! - SQLite storage through sqlx, one transaction per operation
//!
//! ## Architecture
//!
//! - **Domain Layer**: Entities, patches, and the `ChatEntity` trait
//! - **Application Layer**: The `ChatRegistry` service
//! - **Infrastructure Layer**: Pool, schema, sessions, and repositories
//!
//! ## Module Structure
//!
//! ```text
//! chat_registry/
//! +-- config/          Configuration management
//! +-- domain/          Entities and patches
//! +-- application/     ChatRegistry service
//! +-- infrastructure/  Database and repository implementations
//! +-- shared/          Error types
//! ```

// Configuration module
pub mod config;

// Domain layer - Entities
pub mod domain;

// Application layer - Registry service
pub mod application;

// Infrastructure layer - SQLite implementations
pub mod infrastructure;

// Shared utilities
pub mod shared;

// Telemetry and observability
pub mod telemetry;

pub use application::ChatRegistry;
pub use shared::error::AppError;
