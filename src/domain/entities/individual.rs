//! Individual chat entity.
//!
//! Maps to the `individuals` table in the database schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chat::{fmt_chat, ChatEntity, ChatKind, ChatPatch, ChatRecord};
use super::group::Group;

/// A one-to-one chat with a single person.
///
/// Maps to the `individuals` table: the common chat columns plus
/// - username: TEXT NULL
///
/// `groups` holds the groups this individual belongs to. It is loaded one
/// level deep: the groups inside it have empty `members`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Individual {
    #[serde(flatten)]
    pub chat: ChatRecord,

    /// Platform username, when the person has one
    pub username: Option<String>,

    /// Groups this individual is a member of
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Individual {
    /// Check if the individual belongs to the group with this external id.
    pub fn is_in_group(&self, group_external_id: i64) -> bool {
        self.groups
            .iter()
            .any(|g| g.chat.external_id == group_external_id)
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_chat(Self::KIND, &self.chat, f)
    }
}

impl ChatEntity for Individual {
    const KIND: ChatKind = ChatKind::Individual;

    type Patch = IndividualPatch;

    fn chat(&self) -> &ChatRecord {
        &self.chat
    }

    fn apply_patch(&mut self, patch: IndividualPatch) {
        patch.chat.apply_to(&mut self.chat);
        if let Some(username) = patch.username {
            self.username = username;
        }
    }
}

/// Field-level update for an `Individual`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IndividualPatch {
    pub chat: ChatPatch,
    pub username: Option<Option<String>>,
}

impl IndividualPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.chat = self.chat.name(name);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.chat = self.chat.active(active);
        self
    }

    pub fn code_phrase(mut self, code_phrase: Option<String>) -> Self {
        self.chat = self.chat.code_phrase(code_phrase);
        self
    }

    pub fn external_id(mut self, external_id: i64) -> Self {
        self.chat = self.chat.external_id(external_id);
        self
    }

    pub fn username(mut self, username: Option<String>) -> Self {
        self.username = Some(username);
        self
    }
}

impl From<ChatPatch> for IndividualPatch {
    fn from(chat: ChatPatch) -> Self {
        Self {
            chat,
            username: None,
        }
    }
}
