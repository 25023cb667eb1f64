//! Layer 4: Role capabilities
//!
//! One table, consulted once per operation, instead of role string
//! comparisons scattered through every gate.

use super::domain::{Role, TicketType};

/// What a role is allowed to do, independent of any per-ticket assignment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Capabilities {
    /// May perform the resolve transition (when otherwise eligible).
    pub can_resolve: bool,
    /// Ticket types this role may create.
    pub can_create: &'static [TicketType],
    /// Executive designation: may transition any non-terminal ticket
    /// without an assignment.
    pub is_executive: bool,
}

const NONE: &[TicketType] = &[];
const ALL_TYPES: &[TicketType] = &TicketType::ALL;

impl Capabilities {
    /// Capability row for a role.
    pub fn for_role(role: Role) -> Capabilities {
        match role {
            Role::Client => Capabilities {
                can_resolve: false,
                can_create: ALL_TYPES,
                is_executive: false,
            },
            Role::AccountManager => Capabilities {
                can_resolve: true,
                can_create: ALL_TYPES,
                is_executive: false,
            },
            // Sales and career-associate ticket types were retired; the
            // roles stay so reinstating them is a table edit.
            Role::Sales | Role::CareerAssociate => Capabilities {
                can_resolve: false,
                can_create: NONE,
                is_executive: false,
            },
            Role::CallSupport => Capabilities {
                can_resolve: false,
                can_create: NONE,
                is_executive: false,
            },
            Role::Cro | Role::Coo | Role::Ceo => Capabilities {
                can_resolve: true,
                can_create: ALL_TYPES,
                is_executive: true,
            },
        }
    }

    pub fn may_create(&self, ticket_type: TicketType) -> bool {
        self.can_create.contains(&ticket_type)
    }
}

impl Role {
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::for_role(*self)
    }

    pub fn is_executive(&self) -> bool {
        self.capabilities().is_executive
    }
}
