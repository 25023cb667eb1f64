//! Layer 7: Comments and assignments
//!
//! Comment: immutable note on a ticket. A "resolution comment" is just a
//! comment followed by a status flip, not a distinct entity.
//! Assignment: per-ticket grant letting a staff user act beyond role
//! defaults.

use serde::{Deserialize, Serialize};

use super::identity::{CommentId, TicketId, UserId};
use super::time::WallClock;

/// Immutable comment on a ticket. Once created, never changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author_id: UserId,
    pub content: String,
    pub is_internal: bool,
    pub created_at: WallClock,
}

impl Comment {
    pub fn new(
        ticket_id: TicketId,
        author_id: UserId,
        content: impl Into<String>,
        is_internal: bool,
        created_at: WallClock,
    ) -> Self {
        Self {
            id: CommentId::generate(),
            ticket_id,
            author_id,
            content: content.into(),
            is_internal,
            created_at,
        }
    }
}

/// Assignment relation - many-to-many, no ordering significance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Assignment {
    pub ticket_id: TicketId,
    pub user_id: UserId,
}
