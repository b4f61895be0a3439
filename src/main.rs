//! # Chat Registry
//!
//! Schema bootstrap entry point. Run once at setup time:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection and table creation

use anyhow::Result;
use tracing::info;

use chat_registry::config::Settings;
use chat_registry::domain::{Group, Individual};
use chat_registry::ChatRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration from environment and config files
    let settings = Settings::load()?;

    // Initialize tracing subscriber for structured logging
    chat_registry::telemetry::init_tracing(settings.database.echo);

    info!(
        url = %settings.database.url,
        environment = %settings.environment,
        "Configuration loaded"
    );

    let registry = ChatRegistry::connect(&settings.database).await?;
    registry.create_schema().await?;

    let individuals = registry.count_chats::<Individual>().await?;
    let groups = registry.count_chats::<Group>().await?;
    let memberships = registry.count_memberships().await?;
    info!(individuals, groups, memberships, "Registry ready");

    registry.close().await;

    Ok(())
}
