//! Group chat entity.
//!
//! Maps to the `groups` table in the database schema.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::chat::{fmt_chat, ChatEntity, ChatKind, ChatPatch, ChatRecord};
use super::individual::Individual;

/// A group chat with any number of individual members.
///
/// Maps to the `groups` table (the common chat columns only). `members` is
/// loaded one level deep: the individuals inside it have empty `groups`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    #[serde(flatten)]
    pub chat: ChatRecord,

    /// Individuals belonging to this group
    #[serde(default)]
    pub members: Vec<Individual>,
}

impl Group {
    /// Check if the individual with this external id is a member.
    pub fn has_member(&self, individual_external_id: i64) -> bool {
        self.members
            .iter()
            .any(|m| m.chat.external_id == individual_external_id)
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_chat(Self::KIND, &self.chat, f)
    }
}

impl ChatEntity for Group {
    const KIND: ChatKind = ChatKind::Group;

    type Patch = GroupPatch;

    fn chat(&self) -> &ChatRecord {
        &self.chat
    }

    fn apply_patch(&mut self, patch: GroupPatch) {
        patch.0.apply_to(&mut self.chat);
    }
}

/// Field-level update for a `Group`. Groups have no fields beyond the
/// common ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupPatch(pub ChatPatch);

impl GroupPatch {
    pub fn name(self, name: impl Into<String>) -> Self {
        Self(self.0.name(name))
    }

    pub fn active(self, active: bool) -> Self {
        Self(self.0.active(active))
    }

    pub fn code_phrase(self, code_phrase: Option<String>) -> Self {
        Self(self.0.code_phrase(code_phrase))
    }

    pub fn external_id(self, external_id: i64) -> Self {
        Self(self.0.external_id(external_id))
    }
}

impl From<ChatPatch> for GroupPatch {
    fn from(chat: ChatPatch) -> Self {
        Self(chat)
    }
}
