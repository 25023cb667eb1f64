//! Ports to external collaborators.
//!
//! The core owns no data: tickets, comments, and assignments live with
//! the persistence collaborator, attachments with the file-storage
//! collaborator, and logins with the identity collaborator. These traits
//! are the seams; implementations adapt whatever backend hosts the data.

use thiserror::Error;

use crate::core::{Assignment, Comment, Ticket, TicketId, TicketStatus, UserId, WallClock};
use crate::error::{Effect, Transience};
use crate::provision::UserProfile;

/// What a collaborator reports when an operation fails.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum StoreError {
    /// A unique key was violated - retry cannot help.
    #[error("duplicate key for {entity}: {key}")]
    DuplicateKey { entity: &'static str, key: String },

    /// A login already exists for this email.
    #[error("already registered: {email}")]
    AlreadyRegistered { email: String },

    /// The backend rejected or failed the call.
    #[error("{operation} failed: {reason}")]
    Backend {
        operation: &'static str,
        reason: String,
        retryable: bool,
    },
}

impl StoreError {
    pub fn backend(operation: &'static str, reason: impl Into<String>, retryable: bool) -> Self {
        StoreError::Backend {
            operation,
            reason: reason.into(),
            retryable,
        }
    }

    pub fn transience(&self) -> Transience {
        match self {
            StoreError::DuplicateKey { .. } | StoreError::AlreadyRegistered { .. } => {
                Transience::Permanent
            }
            StoreError::Backend { retryable, .. } => {
                if *retryable {
                    Transience::Retryable
                } else {
                    Transience::Unknown
                }
            }
        }
    }

    pub fn effect(&self) -> Effect {
        match self {
            StoreError::DuplicateKey { .. } | StoreError::AlreadyRegistered { .. } => Effect::None,
            StoreError::Backend { .. } => Effect::Unknown,
        }
    }
}

/// Persistence collaborator: tickets, comments, assignments.
///
/// Transactionality across calls is the collaborator's concern; the ops
/// layer orders its calls so the essential write lands first.
pub trait TicketStore {
    fn insert_ticket(&mut self, ticket: &Ticket) -> Result<(), StoreError>;
    fn insert_comment(&mut self, comment: &Comment) -> Result<(), StoreError>;
    fn insert_assignment(&mut self, assignment: &Assignment) -> Result<(), StoreError>;
    fn update_status(
        &mut self,
        id: TicketId,
        status: TicketStatus,
        updated_at: WallClock,
    ) -> Result<(), StoreError>;
    fn ticket(&self, id: TicketId) -> Result<Option<Ticket>, StoreError>;
    fn comments(&self, id: TicketId) -> Result<Vec<Comment>, StoreError>;
    fn assignees(&self, id: TicketId) -> Result<Vec<UserId>, StoreError>;
}

/// File-storage collaborator for ticket attachments.
pub trait AttachmentStore {
    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError>;
}

/// Identity collaborator's admin surface, used by user provisioning.
pub trait IdentityAdmin {
    /// Create a login and return its id.
    fn create_login(&mut self, email: &str, password: &str) -> Result<UserId, StoreError>;
    /// Insert the profile row for an existing login.
    fn insert_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError>;
}

/// Storage path for a ticket attachment.
pub fn attachment_path(ticket_id: TicketId, uploaded_at: WallClock, original_name: &str) -> String {
    format!("{}/{}-{}", ticket_id, uploaded_at.as_millis(), original_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_path_shape() {
        let id = TicketId::generate();
        let path = attachment_path(id, WallClock(1_700_000_000_000), "screenshot.png");
        assert_eq!(path, format!("{id}/1700000000000-screenshot.png"));
    }

    #[test]
    fn duplicate_key_is_permanent_backend_flag_wins() {
        let dup = StoreError::DuplicateKey {
            entity: "tickets",
            key: "abc".into(),
        };
        assert_eq!(dup.transience(), Transience::Permanent);

        let transient = StoreError::backend("insert_ticket", "connection reset", true);
        assert_eq!(transient.transience(), Transience::Retryable);

        let unknown = StoreError::backend("insert_ticket", "constraint?", false);
        assert_eq!(unknown.transience(), Transience::Unknown);
    }
}
