//! Layer 10: Lifecycle authorization
//!
//! Who may move a ticket, decided from the capability table plus the
//! ticket's assignment set. Pure - the caller supplies what it read.
//!
//! The rules, in check order:
//! - clients never transition anything, their own tickets included;
//! - terminal tickets accept no transitions from anyone;
//! - executives may transition without an assignment;
//! - assigned staff may transition, but resolving also needs the role's
//!   resolve capability;
//! - everyone else is denied (the read path stays open).

use serde::{Deserialize, Serialize};

use super::capability::Capabilities;
use super::domain::Role;
use super::error::{CoreError, DeniedAction, PermissionError};
use super::identity::{ClientId, UserId};
use super::status::TicketStatus;
use super::ticket::Ticket;

/// The acting user, as reported by the identity collaborator.
///
/// Trusted input: this core does not authenticate anyone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub user_id: UserId,
    pub role: Role,
    /// The actor's own client record, present only for client users.
    pub client_id: Option<ClientId>,
}

impl Actor {
    pub fn staff(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            client_id: None,
        }
    }

    pub fn client(user_id: UserId, client_id: ClientId) -> Self {
        Self {
            user_id,
            role: Role::Client,
            client_id: Some(client_id),
        }
    }
}

/// Authorize `actor` to move `ticket` to `to`.
///
/// `assigned` is whether the actor appears in the ticket's assignment
/// set, read by the caller from the persistence collaborator.
pub fn authorize_transition(
    actor: &Actor,
    assigned: bool,
    ticket: &Ticket,
    to: TicketStatus,
) -> Result<(), CoreError> {
    if actor.role == Role::Client {
        return Err(PermissionError {
            role: actor.role,
            action: DeniedAction::Transition(to),
            reason: "clients may only view tickets",
        }
        .into());
    }

    ticket.status.check_transition(to)?;

    let caps = Capabilities::for_role(actor.role);
    if caps.is_executive {
        return Ok(());
    }
    if !assigned {
        return Err(PermissionError {
            role: actor.role,
            action: DeniedAction::Transition(to),
            reason: "not assigned to this ticket",
        }
        .into());
    }
    if to == TicketStatus::Resolved && !caps.can_resolve {
        return Err(PermissionError {
            role: actor.role,
            action: DeniedAction::Transition(to),
            reason: "role may not resolve tickets",
        }
        .into());
    }
    Ok(())
}

/// Whether the actor may read this ticket and its comments.
///
/// Staff see everything; clients see only tickets tied to their own
/// client record.
pub fn can_view(actor: &Actor, ticket: &Ticket) -> bool {
    if actor.role != Role::Client {
        return true;
    }
    match (actor.client_id, ticket.client_id) {
        (Some(mine), Some(theirs)) => mine == theirs,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::domain::{Priority, TicketType};
    use crate::core::metadata::TicketMetadata;
    use crate::core::sla::{SlaEntry, SlaTable};
    use crate::core::ticket::TicketDraft;
    use crate::core::time::WallClock;

    const T0: WallClock = WallClock(1_700_000_000_000);

    fn ticket_for(client_id: Option<ClientId>) -> Ticket {
        let sla = SlaTable::from_entries([SlaEntry {
            ticket_type: TicketType::VolumeShortfall,
            hours: 48,
            priority: Priority::High,
        }])
        .unwrap();
        let creator = Actor::staff(UserId::generate(), Role::AccountManager);
        Ticket::create(
            TicketDraft {
                ticket_type: TicketType::VolumeShortfall,
                title: None,
                description: "short of plan".to_string(),
                client_id,
                metadata: TicketMetadata::VolumeShortfall {
                    expected_applications: 25,
                    actual_applications: 15,
                    time_period: "2025-07-01".to_string(),
                },
            },
            &creator,
            &sla,
            T0,
        )
        .unwrap()
    }

    #[test]
    fn client_is_always_denied_even_when_assigned() {
        let ticket = ticket_for(Some(ClientId::generate()));
        let actor = Actor::client(UserId::generate(), ticket.client_id.unwrap());
        for to in [
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Closed,
        ] {
            let err = authorize_transition(&actor, true, &ticket, to).unwrap_err();
            assert!(matches!(err, CoreError::Permission(_)), "{to:?}");
        }
    }

    #[test]
    fn executive_transitions_without_assignment() {
        let ticket = ticket_for(None);
        for role in [Role::Cro, Role::Coo, Role::Ceo] {
            let actor = Actor::staff(UserId::generate(), role);
            assert!(authorize_transition(&actor, false, &ticket, TicketStatus::Resolved).is_ok());
        }
    }

    #[test]
    fn executive_still_blocked_on_terminal_tickets() {
        let mut ticket = ticket_for(None);
        ticket
            .apply_transition(TicketStatus::Resolved, T0)
            .unwrap();
        let actor = Actor::staff(UserId::generate(), Role::Ceo);
        let err = authorize_transition(&actor, false, &ticket, TicketStatus::Open).unwrap_err();
        assert!(matches!(err, CoreError::InvalidTransition(_)));
    }

    #[test]
    fn unassigned_staff_is_denied() {
        let ticket = ticket_for(None);
        let actor = Actor::staff(UserId::generate(), Role::AccountManager);
        let err =
            authorize_transition(&actor, false, &ticket, TicketStatus::InProgress).unwrap_err();
        assert!(matches!(err, CoreError::Permission(_)));
    }

    #[test]
    fn assigned_manager_may_resolve_but_assigned_support_may_not() {
        let ticket = ticket_for(None);

        let manager = Actor::staff(UserId::generate(), Role::AccountManager);
        assert!(authorize_transition(&manager, true, &ticket, TicketStatus::Resolved).is_ok());

        let support = Actor::staff(UserId::generate(), Role::CallSupport);
        assert!(authorize_transition(&support, true, &ticket, TicketStatus::InProgress).is_ok());
        let err = authorize_transition(&support, true, &ticket, TicketStatus::Resolved).unwrap_err();
        assert!(matches!(err, CoreError::Permission(_)));
    }

    #[test]
    fn clients_view_only_their_own_tickets() {
        let mine = ClientId::generate();
        let ticket = ticket_for(Some(mine));
        let me = Actor::client(UserId::generate(), mine);
        let someone_else = Actor::client(UserId::generate(), ClientId::generate());
        let staff = Actor::staff(UserId::generate(), Role::CallSupport);

        assert!(can_view(&me, &ticket));
        assert!(!can_view(&someone_else, &ticket));
        assert!(can_view(&staff, &ticket));

        let orphan = ticket_for(None);
        assert!(!can_view(&me, &orphan));
    }
}
