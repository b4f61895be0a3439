//! Chat Registry Service
//!
//! The single entry point for registry persistence. Every method opens its
//! own session, commits its writes before returning, and releases the
//! session on every exit path. No transaction spans two calls. Writes run in
//! write sessions, so concurrent writers against a file database take turns
//! instead of failing with a locked database.

use sqlx::SqlitePool;
use tracing::{debug, info, instrument, warn};

use crate::config::DatabaseSettings;
use crate::domain::{Group, Individual, MembershipOutcome};
use crate::infrastructure::database::{self, SessionFactory};
use crate::infrastructure::repositories::{ChatRepository, MembershipRepository};
use crate::shared::error::AppError;

/// Persistence facade over individuals, groups, and memberships.
///
/// Construct once at startup, pass it to whoever needs it (it is cheap to
/// clone), and call [`ChatRegistry::close`] at shutdown.
///
/// Operations are generic over the chat kind:
///
/// ```rust,ignore
/// let registry = ChatRegistry::connect(&settings.database).await?;
/// registry.create_schema().await?;
///
/// registry.create_chat::<Individual>(100, "Alice").await?;
/// registry.create_chat::<Group>(200, "Team").await?;
/// registry.add_membership(100, 200).await?;
///
/// let team = registry.get_chat::<Group>(Some(200), None).await?;
/// ```
#[derive(Clone)]
pub struct ChatRegistry {
    sessions: SessionFactory,
}

impl ChatRegistry {
    /// Wrap an existing pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            sessions: SessionFactory::new(pool),
        }
    }

    /// Create a pool from settings and wrap it.
    pub async fn connect(settings: &DatabaseSettings) -> Result<Self, AppError> {
        let pool = database::create_pool(settings).await?;
        info!(echo = settings.echo, "Database connection pool created");
        Ok(Self::new(pool))
    }

    /// The underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        self.sessions.pool()
    }

    /// Create any missing tables. Idempotent.
    pub async fn create_schema(&self) -> Result<(), AppError> {
        database::create_schema(self.pool()).await?;
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool().close().await;
        info!("Database connection pool closed");
    }

    /// Register a chat under its platform id.
    ///
    /// Returns `None` without writing when the id is already registered.
    /// The unique constraint on `external_id` is the last guard: an insert
    /// that trips it is reported the same way.
    #[instrument(skip(self, name), fields(kind = %K::KIND), level = "debug")]
    pub async fn create_chat<K: ChatRepository>(
        &self,
        external_id: i64,
        name: &str,
    ) -> Result<Option<K>, AppError> {
        let mut session = self.sessions.open_write().await?;

        if K::find_by_external_id(session.conn(), external_id).await?.is_some() {
            warn!(kind = %K::KIND, external_id, "Attempted to create existing chat");
            return Ok(None);
        }

        let chat = match K::insert(session.conn(), external_id, name).await {
            Ok(chat) => chat,
            Err(e) if e.is_unique_violation() => {
                warn!(kind = %K::KIND, external_id, "Chat was created concurrently");
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        session.commit().await?;
        info!(chat = %chat, external_id, "Chat created");

        Ok(Some(chat))
    }

    /// Look up a chat by platform id or code phrase.
    ///
    /// `external_id` wins when both are given; giving neither is an
    /// `InvalidArgument` error. No match is `Ok(None)`.
    #[instrument(skip(self), fields(kind = %K::KIND), level = "debug")]
    pub async fn get_chat<K: ChatRepository>(
        &self,
        external_id: Option<i64>,
        code_phrase: Option<&str>,
    ) -> Result<Option<K>, AppError> {
        if external_id.is_none() && code_phrase.is_none() {
            return Err(AppError::InvalidArgument(
                "one of external_id or code_phrase must be supplied".to_string(),
            ));
        }

        let mut session = self.sessions.open().await?;

        let chat = match (external_id, code_phrase) {
            (Some(external_id), _) => K::find_by_external_id(session.conn(), external_id).await?,
            (None, Some(code_phrase)) => K::find_by_code_phrase(session.conn(), code_phrase).await?,
            (None, None) => None,
        };

        Ok(chat)
    }

    /// Apply a patch to an existing chat and return the updated record.
    #[instrument(skip(self, patch), fields(kind = %K::KIND), level = "debug")]
    pub async fn update_chat<K: ChatRepository>(
        &self,
        external_id: i64,
        patch: K::Patch,
    ) -> Result<K, AppError> {
        let mut session = self.sessions.open_write().await?;

        let mut chat = K::find_by_external_id(session.conn(), external_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} with external id {} not found",
                    K::KIND,
                    external_id
                ))
            })?;

        chat.apply_patch(patch);
        K::save(session.conn(), &chat).await?;
        session.commit().await?;

        debug!(chat = %chat, "Chat updated");
        Ok(chat)
    }

    /// Every chat of a kind, with relations loaded.
    #[instrument(skip(self), fields(kind = %K::KIND), level = "debug")]
    pub async fn list_chats<K: ChatRepository>(&self) -> Result<Vec<K>, AppError> {
        let mut session = self.sessions.open().await?;
        K::find_all(session.conn()).await
    }

    /// Number of chats of a kind.
    pub async fn count_chats<K: ChatRepository>(&self) -> Result<i64, AppError> {
        let mut session = self.sessions.open().await?;
        K::count(session.conn()).await
    }

    /// Link an individual to a group, both addressed by platform id.
    ///
    /// A missing side or an existing link is reported through the outcome
    /// and logged; nothing is written in those cases.
    #[instrument(skip(self), level = "debug")]
    pub async fn add_membership(
        &self,
        individual_external_id: i64,
        group_external_id: i64,
    ) -> Result<MembershipOutcome, AppError> {
        let mut session = self.sessions.open_write().await?;

        let Some(individual) =
            Individual::find_by_external_id(session.conn(), individual_external_id).await?
        else {
            warn!(individual_external_id, "No individual found");
            return Ok(MembershipOutcome::IndividualMissing);
        };

        let Some(group) = Group::find_by_external_id(session.conn(), group_external_id).await?
        else {
            warn!(group_external_id, "No group found");
            return Ok(MembershipOutcome::GroupMissing);
        };

        if MembershipRepository::find(session.conn(), individual.chat.id, group.chat.id)
            .await?
            .is_some()
        {
            warn!(%individual, %group, "Individual is already a member");
            return Ok(MembershipOutcome::AlreadyMember);
        }

        match MembershipRepository::insert(session.conn(), individual.chat.id, group.chat.id).await {
            Ok(_) => {}
            Err(e) if e.is_unique_violation() => {
                warn!(%individual, %group, "Membership was added concurrently");
                return Ok(MembershipOutcome::AlreadyMember);
            }
            Err(e) => return Err(e),
        }

        session.commit().await?;
        info!(%individual, %group, "Membership added");

        Ok(MembershipOutcome::Added)
    }

    /// Unlink an individual from a group. Returns whether a link was removed;
    /// a missing side is a no-op.
    #[instrument(skip(self), level = "debug")]
    pub async fn remove_membership(
        &self,
        individual_external_id: i64,
        group_external_id: i64,
    ) -> Result<bool, AppError> {
        let mut session = self.sessions.open_write().await?;

        let individual = Individual::find_by_external_id(session.conn(), individual_external_id).await?;
        let group = Group::find_by_external_id(session.conn(), group_external_id).await?;

        let (Some(individual), Some(group)) = (individual, group) else {
            debug!("Membership side missing, nothing to remove");
            return Ok(false);
        };

        let removed = MembershipRepository::delete(session.conn(), individual.chat.id, group.chat.id).await?;
        session.commit().await?;

        debug!(%individual, %group, removed, "Membership removed");
        Ok(removed > 0)
    }

    /// Total number of membership links.
    pub async fn count_memberships(&self) -> Result<i64, AppError> {
        let mut session = self.sessions.open().await?;
        MembershipRepository::count(session.conn()).await
    }

    /// Delete a chat by platform id. Deleting an unknown id is a no-op.
    /// Its memberships are removed with it.
    #[instrument(skip(self), fields(kind = %K::KIND), level = "debug")]
    pub async fn delete_chat<K: ChatRepository>(&self, external_id: i64) -> Result<(), AppError> {
        let mut session = self.sessions.open_write().await?;
        let removed = K::delete_by_external_id(session.conn(), external_id).await?;
        session.commit().await?;

        debug!(kind = %K::KIND, external_id, removed, "Chat deleted");
        Ok(())
    }

    /// Delete chats one by one, each in its own session.
    ///
    /// Stops at the first failure; deletions before it stay committed.
    pub async fn delete_chats<K: ChatRepository>(&self, external_ids: &[i64]) -> Result<(), AppError> {
        for &external_id in external_ids {
            self.delete_chat::<K>(external_id).await?;
        }
        Ok(())
    }
}
