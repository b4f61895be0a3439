//! Application Layer
//!
//! Contains the registry service that callers (the bot) talk to.

pub mod services;

pub use services::ChatRegistry;
