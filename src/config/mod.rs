//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (`DATABASE_URL`, `DATABASE_ECHO`, or prefixed with APP__)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chat_registry::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Registry database: {}", settings.database.url);
//! ```

mod settings;

pub use settings::*;
