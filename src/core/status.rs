//! Layer 3: Ticket status
//!
//! The closed set of lifecycle states. `resolved` and `closed` are
//! terminal: nothing moves out of them here.

use serde::{Deserialize, Serialize};

use super::error::{CoreError, TransitionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Escalated,
    Closed,
    ManagerAttention,
    Forwarded,
    Replied,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Escalated => "escalated",
            Self::Closed => "closed",
            Self::ManagerAttention => "manager_attention",
            Self::Forwarded => "forwarded",
            Self::Replied => "replied",
        }
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Check that a move from `self` to `to` is structurally possible,
    /// ignoring who is asking.
    pub fn check_transition(self, to: TicketStatus) -> Result<(), CoreError> {
        if self.is_terminal() || self == to {
            return Err(TransitionError { from: self, to }.into());
        }
        Ok(())
    }
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_reject_all_transitions() {
        for from in [TicketStatus::Resolved, TicketStatus::Closed] {
            for to in [
                TicketStatus::Open,
                TicketStatus::InProgress,
                TicketStatus::Escalated,
                TicketStatus::Closed,
            ] {
                assert!(from.check_transition(to).is_err(), "{from:?} -> {to:?}");
            }
        }
    }

    #[test]
    fn self_transition_is_rejected() {
        assert!(
            TicketStatus::Open
                .check_transition(TicketStatus::Open)
                .is_err()
        );
    }

    #[test]
    fn open_moves_anywhere_else() {
        for to in [
            TicketStatus::InProgress,
            TicketStatus::Resolved,
            TicketStatus::Escalated,
            TicketStatus::ManagerAttention,
            TicketStatus::Forwarded,
            TicketStatus::Replied,
            TicketStatus::Closed,
        ] {
            assert!(TicketStatus::Open.check_transition(to).is_ok());
        }
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&TicketStatus::ManagerAttention).unwrap();
        assert_eq!(json, "\"manager_attention\"");
    }
}
