//! Membership entity.
//!
//! Maps to the `memberships` junction table in the database schema.

use serde::{Deserialize, Serialize};

/// Records that an individual belongs to a group.
///
/// Maps to the `memberships` table:
/// - id: INTEGER PRIMARY KEY AUTOINCREMENT
/// - group_id: INTEGER NOT NULL REFERENCES groups(id) ON DELETE CASCADE
/// - individual_id: INTEGER NOT NULL REFERENCES individuals(id) ON DELETE CASCADE
/// - UNIQUE (individual_id, group_id)
///
/// Both ids are surrogate keys, not external ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub individual_id: i64,
    pub group_id: i64,
}

/// Result of asking the registry to link an individual to a group.
///
/// Only `Added` writes a row; the other outcomes are non-fatal conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MembershipOutcome {
    /// A new membership row was inserted
    Added,

    /// The individual was already a member of the group
    AlreadyMember,

    /// No individual is registered under the requested external id
    IndividualMissing,

    /// No group is registered under the requested external id
    GroupMissing,
}

impl MembershipOutcome {
    /// Whether the call inserted a membership row.
    pub fn is_added(&self) -> bool {
        matches!(self, Self::Added)
    }
}
