//! Operations over the ports: create, transition, resolve, view.
//!
//! Ordering discipline for multi-write operations: validation and
//! permission checks run before any write; the essential write lands
//! first; auxiliary writes are best-effort with their own failure
//! reporting. Partial failure is surfaced truthfully through
//! `OpError::effect()` - never swallowed, never papered over.

use thiserror::Error;

use crate::core::{
    Actor, Comment, CoreError, ErrorCode, Role, SlaStanding, SlaTable, Ticket, TicketDraft,
    TicketId, TicketStatus, UserId, ValidationError, WallClock, authorize_transition, can_view,
};
use crate::error::{Effect, Transience};
use crate::store::{AttachmentStore, StoreError, TicketStore, attachment_path};

/// Errors that can occur during operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum OpError {
    #[error("ticket not found: {0}")]
    NotFound(TicketId),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{operation}: {source}")]
    Dependency {
        operation: &'static str,
        #[source]
        source: StoreError,
        /// What we know about side effects already committed when the
        /// failure surfaced.
        effect: Effect,
    },
}

impl OpError {
    fn dependency(operation: &'static str, source: StoreError, effect: Effect) -> Self {
        OpError::Dependency {
            operation,
            source,
            effect,
        }
    }

    /// Stable classification for callers.
    pub fn code(&self) -> ErrorCode {
        match self {
            OpError::NotFound(_) => ErrorCode::NotFound,
            OpError::Core(e) => e.code(),
            OpError::Dependency { .. } => ErrorCode::DependencyFailure,
        }
    }

    /// Whether retrying this operation may succeed.
    pub fn transience(&self) -> Transience {
        match self {
            OpError::NotFound(_) => Transience::Permanent,
            OpError::Core(e) => e.transience(),
            OpError::Dependency { source, effect, .. } => {
                // A failure after a committed write must be retryable so
                // the caller can finish the unit of work.
                if *effect == Effect::Some {
                    Transience::Retryable
                } else {
                    source.transience()
                }
            }
        }
    }

    /// What we know about side effects when this error is returned.
    pub fn effect(&self) -> Effect {
        match self {
            OpError::NotFound(_) => Effect::None,
            OpError::Core(e) => e.effect(),
            OpError::Dependency { effect, .. } => *effect,
        }
    }
}

/// An attachment supplied alongside ticket creation.
#[derive(Clone, Debug)]
pub struct AttachmentInput {
    pub original_name: String,
    pub bytes: Vec<u8>,
}

/// What happened to the attachment during creation.
///
/// Upload failure never unwinds the ticket - it degrades to this
/// warning, scoped to the attachment alone.
#[derive(Clone, Debug)]
pub enum AttachmentOutcome {
    Stored { path: String },
    Failed { path: String, error: StoreError },
}

impl AttachmentOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// Classification for surfacing the warning to callers.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Self::Stored { .. } => None,
            Self::Failed { .. } => Some(ErrorCode::AttachmentFailed),
        }
    }
}

/// Result of a successful ticket creation.
#[derive(Clone, Debug)]
pub struct CreateOutcome {
    pub ticket: Ticket,
    pub attachment: Option<AttachmentOutcome>,
}

/// Read-path view of one ticket.
#[derive(Clone, Debug)]
pub struct TicketView {
    pub ticket: Ticket,
    pub comments: Vec<Comment>,
    pub assignees: Vec<UserId>,
    pub standing: SlaStanding,
}

/// The operation layer: core rules wired to the collaborator ports.
///
/// `S` persists tickets/comments/assignments, `F` stores attachments.
/// Both are owned so tests can drive the whole layer in memory.
pub struct TicketOps<S, F> {
    pub store: S,
    pub files: F,
    sla: SlaTable,
}

impl<S: TicketStore, F: AttachmentStore> TicketOps<S, F> {
    pub fn new(store: S, files: F, sla: SlaTable) -> Self {
        Self { store, files, sla }
    }

    pub fn sla(&self) -> &SlaTable {
        &self.sla
    }

    /// Create a ticket, optionally storing an attachment.
    ///
    /// The ticket insert is the essential write. The attachment upload
    /// runs after it and only downgrades to a warning in the outcome.
    pub fn create_ticket(
        &mut self,
        actor: &Actor,
        draft: TicketDraft,
        attachment: Option<AttachmentInput>,
        now: WallClock,
    ) -> Result<CreateOutcome, OpError> {
        let ticket = Ticket::create(draft, actor, &self.sla, now)?;

        self.store
            .insert_ticket(&ticket)
            .map_err(|e| OpError::dependency("insert ticket", e, Effect::None))?;
        tracing::info!(
            ticket = %ticket.id,
            short_code = %ticket.short_code,
            ticket_type = ticket.ticket_type.as_str(),
            priority = ticket.priority.as_str(),
            sla_hours = ticket.sla_hours,
            "ticket created"
        );

        let attachment = attachment.map(|input| {
            let path = attachment_path(ticket.id, now, &input.original_name);
            match self.files.put(&path, &input.bytes) {
                Ok(()) => AttachmentOutcome::Stored { path },
                Err(error) => {
                    tracing::warn!(ticket = %ticket.id, %path, %error, "attachment upload failed");
                    AttachmentOutcome::Failed { path, error }
                }
            }
        });

        Ok(CreateOutcome { ticket, attachment })
    }

    /// Move a ticket to a new status (anything but `resolved`).
    ///
    /// Resolution goes through `resolve_ticket` because it carries a
    /// mandatory comment.
    pub fn transition_ticket(
        &mut self,
        actor: &Actor,
        ticket_id: TicketId,
        to: TicketStatus,
        now: WallClock,
    ) -> Result<Ticket, OpError> {
        if to == TicketStatus::Resolved {
            return Err(CoreError::from(ValidationError {
                field: "resolution_comment",
                reason: "resolving requires a resolution comment".into(),
            })
            .into());
        }

        let mut ticket = self.load(ticket_id)?;
        let assigned = self.is_assigned(ticket_id, actor.user_id)?;
        authorize_transition(actor, assigned, &ticket, to)?;

        ticket.apply_transition(to, now)?;
        self.store
            .update_status(ticket_id, ticket.status, now)
            .map_err(|e| OpError::dependency("update ticket status", e, Effect::None))?;
        tracing::info!(ticket = %ticket_id, to = to.as_str(), "ticket transitioned");
        Ok(ticket)
    }

    /// Resolve a ticket: write the resolution comment, then flip status.
    ///
    /// One unit of work from this layer's point of view. If the comment
    /// write fails, the status is untouched. If the status write fails
    /// after the comment landed, the error reports `Effect::Some` and is
    /// retryable - the caller is told the comment is already there.
    pub fn resolve_ticket(
        &mut self,
        actor: &Actor,
        ticket_id: TicketId,
        resolution_comment: &str,
        now: WallClock,
    ) -> Result<Ticket, OpError> {
        let mut ticket = self.load(ticket_id)?;
        let assigned = self.is_assigned(ticket_id, actor.user_id)?;
        authorize_transition(actor, assigned, &ticket, TicketStatus::Resolved)?;

        if resolution_comment.trim().is_empty() {
            return Err(CoreError::from(ValidationError {
                field: "resolution_comment",
                reason: "must not be empty".into(),
            })
            .into());
        }

        let comment = Comment::new(ticket_id, actor.user_id, resolution_comment, false, now);
        self.store
            .insert_comment(&comment)
            .map_err(|e| OpError::dependency("insert resolution comment", e, Effect::None))?;

        ticket.apply_transition(TicketStatus::Resolved, now)?;
        self.store
            .update_status(ticket_id, ticket.status, now)
            .map_err(|e| OpError::dependency("update ticket status", e, Effect::Some))?;

        tracing::info!(ticket = %ticket_id, by = %actor.user_id, "ticket resolved");
        Ok(ticket)
    }

    /// Read one ticket with its comments, assignees, and SLA standing.
    ///
    /// Clients only see tickets tied to their own client record, and
    /// internal comments are withheld from them.
    pub fn view_ticket(
        &self,
        actor: &Actor,
        ticket_id: TicketId,
        now: WallClock,
    ) -> Result<Option<TicketView>, OpError> {
        let Some(ticket) = self
            .store
            .ticket(ticket_id)
            .map_err(|e| OpError::dependency("read ticket", e, Effect::None))?
        else {
            return Ok(None);
        };
        if !can_view(actor, &ticket) {
            return Ok(None);
        }

        let mut comments = self
            .store
            .comments(ticket_id)
            .map_err(|e| OpError::dependency("read comments", e, Effect::None))?;
        if actor.role == Role::Client {
            comments.retain(|c| !c.is_internal);
        }
        let assignees = self
            .store
            .assignees(ticket_id)
            .map_err(|e| OpError::dependency("read assignments", e, Effect::None))?;
        let standing = ticket.standing(now);

        Ok(Some(TicketView {
            ticket,
            comments,
            assignees,
            standing,
        }))
    }

    fn load(&self, ticket_id: TicketId) -> Result<Ticket, OpError> {
        self.store
            .ticket(ticket_id)
            .map_err(|e| OpError::dependency("read ticket", e, Effect::None))?
            .ok_or(OpError::NotFound(ticket_id))
    }

    fn is_assigned(&self, ticket_id: TicketId, user_id: UserId) -> Result<bool, OpError> {
        let assignees = self
            .store
            .assignees(ticket_id)
            .map_err(|e| OpError::dependency("read assignments", e, Effect::None))?;
        Ok(assignees.contains(&user_id))
    }
}
