//! Layer 6: SLA resolution
//!
//! A read-only table mapping ticket type to priority and response-time
//! allowance. Lookup misses are a refusal, never a default: a silently
//! defaulted priority would corrupt every downstream deadline.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Priority, TicketType};
use super::error::{ConfigurationMissing, CoreError, ValidationError};

/// One SLA row: the allowance and severity for a ticket type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaEntry {
    pub ticket_type: TicketType,
    pub hours: u32,
    pub priority: Priority,
}

/// The full SLA table, keyed uniquely by ticket type.
///
/// Immutable once built for a session; sourced externally.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SlaEntry>", into = "Vec<SlaEntry>")]
pub struct SlaTable {
    entries: BTreeMap<&'static str, SlaEntry>,
}

impl SlaTable {
    /// Build a table from rows, rejecting duplicate ticket types and
    /// zero-hour allowances.
    pub fn from_entries(rows: impl IntoIterator<Item = SlaEntry>) -> Result<Self, CoreError> {
        let mut entries = BTreeMap::new();
        for row in rows {
            if row.hours == 0 {
                return Err(ValidationError {
                    field: "hours",
                    reason: format!(
                        "SLA hours for `{}` must be positive",
                        row.ticket_type.as_str()
                    ),
                }
                .into());
            }
            if entries.insert(row.ticket_type.as_str(), row).is_some() {
                return Err(ValidationError {
                    field: "ticket_type",
                    reason: format!("duplicate SLA entry for `{}`", row.ticket_type.as_str()),
                }
                .into());
            }
        }
        Ok(Self { entries })
    }

    /// Look up the SLA row for a ticket type.
    pub fn resolve(&self, ticket_type: TicketType) -> Result<SlaEntry, CoreError> {
        self.entries
            .get(ticket_type.as_str())
            .copied()
            .ok_or_else(|| ConfigurationMissing { ticket_type }.into())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SlaEntry> {
        self.entries.values()
    }
}

impl TryFrom<Vec<SlaEntry>> for SlaTable {
    type Error = CoreError;
    fn try_from(rows: Vec<SlaEntry>) -> Result<Self, Self::Error> {
        SlaTable::from_entries(rows)
    }
}

impl From<SlaTable> for Vec<SlaEntry> {
    fn from(table: SlaTable) -> Vec<SlaEntry> {
        table.entries.into_values().collect()
    }
}
