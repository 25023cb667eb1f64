//! Layer 9: The Ticket
//!
//! Creation resolves the SLA row once and locks it into the ticket:
//! priority, allowance, and due date never move afterwards, even if the
//! SLA table is edited later. That lock is what makes deadlines auditable.

use serde::{Deserialize, Serialize};

use super::capability::Capabilities;
use super::domain::{Priority, Role, TicketType};
use super::error::{CoreError, DeniedAction, PermissionError, ValidationError};
use super::identity::{ClientId, ShortCode, TicketId, UserId};
use super::lifecycle::Actor;
use super::metadata::TicketMetadata;
use super::sla::SlaTable;
use super::standing::SlaStanding;
use super::status::TicketStatus;
use super::time::WallClock;

/// Caller-supplied inputs for creating a ticket.
///
/// Everything else on the ticket is derived here, not chosen by the
/// creator: priority and due date come from the SLA row, status is
/// always `open`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketDraft {
    pub ticket_type: TicketType,
    /// None falls back to the type's default title.
    pub title: Option<String>,
    pub description: String,
    /// Ignored for client creators - their own client record wins.
    pub client_id: Option<ClientId>,
    pub metadata: TicketMetadata,
}

/// The principal entity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub short_code: ShortCode,
    #[serde(rename = "type")]
    pub ticket_type: TicketType,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub sla_hours: u32,
    pub created_by: UserId,
    pub created_by_client: bool,
    pub client_id: Option<ClientId>,
    pub created_at: WallClock,
    pub updated_at: WallClock,
    pub due_date: WallClock,
    pub escalation_level: u32,
    pub metadata: TicketMetadata,
}

impl Ticket {
    /// Build a ticket from a draft.
    ///
    /// Checked before anything is derived: the creator's role may create
    /// this type, the metadata variant matches the type, title and
    /// description are non-empty, and an SLA row exists. Any failure
    /// leaves nothing to clean up - no id is burned, no write planned.
    pub fn create(
        draft: TicketDraft,
        actor: &Actor,
        sla: &SlaTable,
        now: WallClock,
    ) -> Result<Ticket, CoreError> {
        let caps = Capabilities::for_role(actor.role);
        if !caps.may_create(draft.ticket_type) {
            return Err(PermissionError {
                role: actor.role,
                action: DeniedAction::Create(draft.ticket_type),
                reason: "role may not create this ticket type",
            }
            .into());
        }

        draft.metadata.check_matches(draft.ticket_type)?;

        let title = match draft.title {
            Some(t) if !t.trim().is_empty() => t,
            Some(_) => {
                return Err(ValidationError {
                    field: "title",
                    reason: "must not be empty".into(),
                }
                .into());
            }
            None => draft.ticket_type.default_title().to_string(),
        };
        if draft.description.trim().is_empty() {
            return Err(ValidationError {
                field: "description",
                reason: "must not be empty".into(),
            }
            .into());
        }

        let entry = sla.resolve(draft.ticket_type)?;

        let created_by_client = actor.role == Role::Client;
        let client_id = if created_by_client {
            actor.client_id
        } else {
            draft.client_id
        };

        Ok(Ticket {
            id: TicketId::generate(),
            short_code: ShortCode::generate(),
            ticket_type: draft.ticket_type,
            title,
            description: draft.description,
            status: TicketStatus::Open,
            priority: entry.priority,
            sla_hours: entry.hours,
            created_by: actor.user_id,
            created_by_client,
            client_id,
            created_at: now,
            updated_at: now,
            due_date: now.plus_hours(entry.hours),
            escalation_level: 0,
            metadata: draft.metadata,
        })
    }

    /// Apply an authorized transition.
    ///
    /// Structural validity is still enforced here; authorization is the
    /// caller's job (see `lifecycle::authorize_transition`). Refreshes
    /// `updated_at`; moving to `escalated` bumps the escalation counter.
    pub fn apply_transition(&mut self, to: TicketStatus, now: WallClock) -> Result<(), CoreError> {
        self.status.check_transition(to)?;
        if to == TicketStatus::Escalated {
            self.escalation_level += 1;
        }
        self.status = to;
        self.updated_at = now;
        Ok(())
    }

    /// Classify this ticket's deadline at `now`.
    pub fn standing(&self, now: WallClock) -> SlaStanding {
        SlaStanding::classify(self.status, self.due_date, now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sla::SlaEntry;

    const T0: WallClock = WallClock(1_700_000_000_000);

    fn sla() -> SlaTable {
        SlaTable::from_entries([
            SlaEntry {
                ticket_type: TicketType::VolumeShortfall,
                hours: 48,
                priority: Priority::High,
            },
            SlaEntry {
                ticket_type: TicketType::DataMismatch,
                hours: 24,
                priority: Priority::Critical,
            },
        ])
        .unwrap()
    }

    fn manager() -> Actor {
        Actor {
            user_id: UserId::generate(),
            role: Role::AccountManager,
            client_id: None,
        }
    }

    fn shortfall_draft() -> TicketDraft {
        TicketDraft {
            ticket_type: TicketType::VolumeShortfall,
            title: None,
            description: "Applications fell short of plan".to_string(),
            client_id: Some(ClientId::generate()),
            metadata: TicketMetadata::VolumeShortfall {
                expected_applications: 25,
                actual_applications: 15,
                time_period: "2025-07-01".to_string(),
            },
        }
    }

    #[test]
    fn creation_derives_everything_from_the_sla_row() {
        let ticket = Ticket::create(shortfall_draft(), &manager(), &sla(), T0).unwrap();
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.sla_hours, 48);
        assert_eq!(ticket.due_date, T0.plus_hours(48));
        assert_eq!(ticket.escalation_level, 0);
        assert_eq!(ticket.created_at, T0);
        assert_eq!(ticket.updated_at, T0);
        assert!(!ticket.created_by_client);
    }

    #[test]
    fn due_date_is_locked_at_creation() {
        let ticket = Ticket::create(shortfall_draft(), &manager(), &sla(), T0).unwrap();
        let due = ticket.due_date;

        // Re-resolving against a mutated table changes nothing on the ticket.
        let tightened = SlaTable::from_entries([SlaEntry {
            ticket_type: TicketType::VolumeShortfall,
            hours: 1,
            priority: Priority::Critical,
        }])
        .unwrap();
        assert_eq!(tightened.resolve(TicketType::VolumeShortfall).unwrap().hours, 1);
        assert_eq!(ticket.due_date, due);
        assert_eq!(ticket.sla_hours, 48);
    }

    #[test]
    fn missing_sla_row_refuses_creation() {
        let empty = SlaTable::default();
        let err = Ticket::create(shortfall_draft(), &manager(), &empty, T0).unwrap_err();
        assert!(matches!(err, CoreError::ConfigurationMissing(_)));
    }

    #[test]
    fn blank_description_is_rejected_before_sla_lookup() {
        let mut draft = shortfall_draft();
        draft.description = "   ".to_string();
        let err = Ticket::create(draft, &manager(), &SlaTable::default(), T0).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[test]
    fn client_creator_is_pinned_to_own_client_record() {
        let own = ClientId::generate();
        let actor = Actor {
            user_id: UserId::generate(),
            role: Role::Client,
            client_id: Some(own),
        };
        let mut draft = shortfall_draft();
        draft.client_id = Some(ClientId::generate());
        let ticket = Ticket::create(draft, &actor, &sla(), T0).unwrap();
        assert!(ticket.created_by_client);
        assert_eq!(ticket.client_id, Some(own));
    }

    #[test]
    fn retired_role_cannot_create() {
        let actor = Actor {
            user_id: UserId::generate(),
            role: Role::Sales,
            client_id: None,
        };
        let err = Ticket::create(shortfall_draft(), &actor, &sla(), T0).unwrap_err();
        assert!(matches!(err, CoreError::Permission(_)));
    }

    #[test]
    fn escalation_bumps_counter_and_updated_at() {
        let mut ticket = Ticket::create(shortfall_draft(), &manager(), &sla(), T0).unwrap();
        let later = WallClock(T0.0 + 5_000);
        ticket.apply_transition(TicketStatus::Escalated, later).unwrap();
        assert_eq!(ticket.status, TicketStatus::Escalated);
        assert_eq!(ticket.escalation_level, 1);
        assert_eq!(ticket.updated_at, later);

        // A second escalation keeps counting.
        let ok = ticket.apply_transition(TicketStatus::ManagerAttention, later);
        assert!(ok.is_ok());
        ticket.apply_transition(TicketStatus::Escalated, later).unwrap();
        assert_eq!(ticket.escalation_level, 2);
    }

    #[test]
    fn resolved_ticket_accepts_no_further_moves() {
        let mut ticket = Ticket::create(shortfall_draft(), &manager(), &sla(), T0).unwrap();
        ticket.apply_transition(TicketStatus::Resolved, T0).unwrap();
        let err = ticket.apply_transition(TicketStatus::Open, T0).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition(_)));
    }
}
