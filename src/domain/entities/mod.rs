//! # Domain Entities
//!
//! The chat registry stores two kinds of chat and the relation between them:
//!
//! - **Individual**: a one-to-one chat with a person
//! - **Group**: a group chat
//! - **Membership**: an individual's membership in a group (many-to-many)
//!
//! Both chat kinds embed a `ChatRecord` holding the common fields and
//! implement `ChatEntity`, which the registry is generic over.

mod chat;
mod group;
mod individual;
mod membership;

pub use chat::{ChatEntity, ChatKind, ChatPatch, ChatRecord};
pub use group::{Group, GroupPatch};
pub use individual::{Individual, IndividualPatch};
pub use membership::{Membership, MembershipOutcome};
