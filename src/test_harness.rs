//! In-memory collaborators for tests.
//!
//! Failure injection is per-call-site: set a `fail_*` slot and the next
//! matching call returns it (once), leaving earlier writes in place -
//! exactly the partial-failure shapes the ops layer has to report.

use std::collections::BTreeMap;

use crate::core::{Assignment, Comment, Ticket, TicketId, TicketStatus, UserId, WallClock};
use crate::provision::UserProfile;
use crate::store::{AttachmentStore, IdentityAdmin, StoreError, TicketStore};

/// In-memory persistence collaborator.
#[derive(Default)]
pub struct MemStore {
    pub tickets: BTreeMap<TicketId, Ticket>,
    pub comments: Vec<Comment>,
    pub assignments: Vec<Assignment>,
    pub fail_ticket_insert: Option<StoreError>,
    pub fail_comment_insert: Option<StoreError>,
    pub fail_status_update: Option<StoreError>,
}

impl MemStore {
    pub fn assign(&mut self, ticket_id: TicketId, user_id: UserId) {
        self.assignments.push(Assignment { ticket_id, user_id });
    }
}

impl TicketStore for MemStore {
    fn insert_ticket(&mut self, ticket: &Ticket) -> Result<(), StoreError> {
        if let Some(err) = self.fail_ticket_insert.take() {
            return Err(err);
        }
        if self.tickets.contains_key(&ticket.id) {
            return Err(StoreError::DuplicateKey {
                entity: "tickets",
                key: ticket.id.to_string(),
            });
        }
        self.tickets.insert(ticket.id, ticket.clone());
        Ok(())
    }

    fn insert_comment(&mut self, comment: &Comment) -> Result<(), StoreError> {
        if let Some(err) = self.fail_comment_insert.take() {
            return Err(err);
        }
        self.comments.push(comment.clone());
        Ok(())
    }

    fn insert_assignment(&mut self, assignment: &Assignment) -> Result<(), StoreError> {
        self.assignments.push(*assignment);
        Ok(())
    }

    fn update_status(
        &mut self,
        id: TicketId,
        status: TicketStatus,
        updated_at: WallClock,
    ) -> Result<(), StoreError> {
        if let Some(err) = self.fail_status_update.take() {
            return Err(err);
        }
        let ticket = self.tickets.get_mut(&id).ok_or(StoreError::Backend {
            operation: "update_status",
            reason: format!("no ticket {id}"),
            retryable: false,
        })?;
        ticket.status = status;
        ticket.updated_at = updated_at;
        Ok(())
    }

    fn ticket(&self, id: TicketId) -> Result<Option<Ticket>, StoreError> {
        Ok(self.tickets.get(&id).cloned())
    }

    fn comments(&self, id: TicketId) -> Result<Vec<Comment>, StoreError> {
        Ok(self
            .comments
            .iter()
            .filter(|c| c.ticket_id == id)
            .cloned()
            .collect())
    }

    fn assignees(&self, id: TicketId) -> Result<Vec<UserId>, StoreError> {
        Ok(self
            .assignments
            .iter()
            .filter(|a| a.ticket_id == id)
            .map(|a| a.user_id)
            .collect())
    }
}

/// In-memory file-storage collaborator.
#[derive(Default)]
pub struct MemFiles {
    pub objects: BTreeMap<String, Vec<u8>>,
    pub fail_put: Option<StoreError>,
}

impl AttachmentStore for MemFiles {
    fn put(&mut self, path: &str, bytes: &[u8]) -> Result<(), StoreError> {
        if let Some(err) = self.fail_put.take() {
            return Err(err);
        }
        self.objects.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }
}

/// In-memory identity collaborator for provisioning tests.
#[derive(Default)]
pub struct MemDirectory {
    pub logins: BTreeMap<String, UserId>,
    pub profiles: Vec<UserProfile>,
    pub fail_create_login: Option<StoreError>,
    pub fail_profile_insert: Option<StoreError>,
}

impl IdentityAdmin for MemDirectory {
    fn create_login(&mut self, email: &str, _password: &str) -> Result<UserId, StoreError> {
        if let Some(err) = self.fail_create_login.take() {
            return Err(err);
        }
        if self.logins.contains_key(email) {
            return Err(StoreError::AlreadyRegistered {
                email: email.to_string(),
            });
        }
        let id = UserId::generate();
        self.logins.insert(email.to_string(), id);
        Ok(id)
    }

    fn insert_profile(&mut self, profile: &UserProfile) -> Result<(), StoreError> {
        if let Some(err) = self.fail_profile_insert.take() {
            return Err(err);
        }
        self.profiles.push(profile.clone());
        Ok(())
    }
}
