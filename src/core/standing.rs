//! Layer 8: SLA standing
//!
//! Classifies a ticket against its deadline at read time. The exact due
//! instant still counts as remaining (with 0h); one millisecond past it
//! is overdue (also 0h until a full hour has elapsed). Terminal tickets
//! are never overdue - the deadline only means something for open work.

use serde::{Deserialize, Serialize};

use super::status::TicketStatus;
use super::time::{WallClock, whole_hours};

/// On-time or overdue, with whole hours (floored) either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "standing", rename_all = "snake_case")]
pub enum SlaStanding {
    OnTime { hours_remaining: u64 },
    Overdue { hours_overdue: u64 },
}

impl SlaStanding {
    pub fn is_overdue(&self) -> bool {
        matches!(self, Self::Overdue { .. })
    }

    /// Classify a ticket's deadline at `now`.
    pub fn classify(status: TicketStatus, due_date: WallClock, now: WallClock) -> SlaStanding {
        let delta = due_date.delta_ms(now);
        if status.is_terminal() {
            return SlaStanding::OnTime {
                hours_remaining: whole_hours(delta.max(0) as u64),
            };
        }
        if delta >= 0 {
            SlaStanding::OnTime {
                hours_remaining: whole_hours(delta as u64),
            }
        } else {
            SlaStanding::Overdue {
                hours_overdue: whole_hours(delta.unsigned_abs()),
            }
        }
    }
}
