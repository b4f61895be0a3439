//! Shared chat fields, patches, and the `ChatEntity` trait.
//!
//! Both concrete kinds (`Individual` and `Group`) embed a `ChatRecord`
//! rather than inheriting from a base type.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The two kinds of chat the registry stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatKind {
    Individual,
    Group,
}

impl ChatKind {
    /// Human-readable kind name, also the base of the table name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Individual => "Individual",
            Self::Group => "Group",
        }
    }

    /// Table name derived from the kind name: lower-cased and pluralized.
    pub fn table_name(&self) -> String {
        format!("{}s", self.name().to_lowercase())
    }
}

impl fmt::Display for ChatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Fields common to every registered chat.
///
/// Maps to the shared columns of the `individuals` and `groups` tables:
/// - id: INTEGER PRIMARY KEY AUTOINCREMENT
/// - external_id: INTEGER NOT NULL UNIQUE
/// - name: TEXT NOT NULL
/// - active: BOOLEAN NOT NULL DEFAULT 1
/// - code_phrase: TEXT NULL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRecord {
    /// Surrogate key assigned by the database
    pub id: i64,

    /// Identifier assigned by the messaging platform (unique)
    pub external_id: i64,

    /// Display name
    pub name: String,

    /// Whether the chat currently receives messages
    pub active: bool,

    /// Alternate lookup key used by linking flows
    pub code_phrase: Option<String>,
}

/// Field-level update shared by both chat kinds.
///
/// `None` leaves a field untouched. `code_phrase` is doubly optional so a
/// patch can clear it with `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatPatch {
    pub external_id: Option<i64>,
    pub name: Option<String>,
    pub active: Option<bool>,
    pub code_phrase: Option<Option<String>>,
}

impl ChatPatch {
    pub fn external_id(mut self, external_id: i64) -> Self {
        self.external_id = Some(external_id);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn code_phrase(mut self, code_phrase: Option<String>) -> Self {
        self.code_phrase = Some(code_phrase);
        self
    }

    /// True when the patch would not change anything.
    pub fn is_empty(&self) -> bool {
        self.external_id.is_none()
            && self.name.is_none()
            && self.active.is_none()
            && self.code_phrase.is_none()
    }

    /// Write every supplied field into `chat`.
    pub fn apply_to(self, chat: &mut ChatRecord) {
        if let Some(external_id) = self.external_id {
            chat.external_id = external_id;
        }
        if let Some(name) = self.name {
            chat.name = name;
        }
        if let Some(active) = self.active {
            chat.active = active;
        }
        if let Some(code_phrase) = self.code_phrase {
            chat.code_phrase = code_phrase;
        }
    }
}

/// Behaviour shared by `Individual` and `Group`, letting the registry be
/// generic over the chat kind.
pub trait ChatEntity: Clone + fmt::Display + Send + Sync + Sized + 'static {
    /// Which kind this entity is.
    const KIND: ChatKind;

    /// Typed field-level update for this kind.
    type Patch: Send + 'static;

    /// The embedded common fields.
    fn chat(&self) -> &ChatRecord;

    /// Apply a patch in place; only supplied fields change.
    fn apply_patch(&mut self, patch: Self::Patch);

    fn external_id(&self) -> i64 {
        self.chat().external_id
    }

    fn name(&self) -> &str {
        &self.chat().name
    }
}

/// Render a chat as `Kind(id=…, name=…)`.
pub(crate) fn fmt_chat(kind: ChatKind, chat: &ChatRecord, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}(id={}, name={})", kind.name(), chat.id, chat.name)
}
