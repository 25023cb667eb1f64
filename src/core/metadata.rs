//! Layer 5: Type-specific ticket metadata
//!
//! Sum type keyed by ticket type - the variant IS the discriminant, so a
//! volume-shortfall ticket cannot carry data-mismatch fields.

use serde::{Deserialize, Serialize};

use super::domain::{FaultType, TicketType};
use super::error::{CoreError, ValidationError};

/// Metadata variant per ticket type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TicketMetadata {
    VolumeShortfall {
        expected_applications: u32,
        actual_applications: u32,
        /// ISO date of the period the shortfall covers.
        time_period: String,
    },
    DataMismatch {
        fault_type: FaultType,
        #[serde(skip_serializing_if = "Option::is_none")]
        application_url: Option<String>,
    },
}

impl TicketMetadata {
    /// Which ticket type this metadata belongs to.
    pub fn ticket_type(&self) -> TicketType {
        match self {
            Self::VolumeShortfall { .. } => TicketType::VolumeShortfall,
            Self::DataMismatch { .. } => TicketType::DataMismatch,
        }
    }

    /// Reject metadata whose variant does not match the declared type.
    pub fn check_matches(&self, declared: TicketType) -> Result<(), CoreError> {
        if self.ticket_type() != declared {
            return Err(ValidationError {
                field: "metadata",
                reason: format!(
                    "metadata is for `{}` but ticket type is `{}`",
                    self.ticket_type().as_str(),
                    declared.as_str()
                ),
            }
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortfall() -> TicketMetadata {
        TicketMetadata::VolumeShortfall {
            expected_applications: 25,
            actual_applications: 15,
            time_period: "2025-07-01".to_string(),
        }
    }

    #[test]
    fn metadata_knows_its_type() {
        assert_eq!(shortfall().ticket_type(), TicketType::VolumeShortfall);
    }

    #[test]
    fn mismatched_variant_is_rejected() {
        let err = shortfall().check_matches(TicketType::DataMismatch);
        assert!(err.is_err());
        assert!(shortfall().check_matches(TicketType::VolumeShortfall).is_ok());
    }

    #[test]
    fn tagged_serialization() {
        let json = serde_json::to_value(shortfall()).unwrap();
        assert_eq!(json["type"], "volume_shortfall");
        assert_eq!(json["expected_applications"], 25);

        let mismatch = TicketMetadata::DataMismatch {
            fault_type: FaultType::WrongDocumentAttached,
            application_url: None,
        };
        let json = serde_json::to_value(&mismatch).unwrap();
        assert_eq!(json["fault_type"], "wrong_document_attached");
        assert!(json.get("application_url").is_none());
    }
}
