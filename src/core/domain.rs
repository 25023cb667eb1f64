//! Layer 2: Domain enums
//!
//! TicketType: volume_shortfall, data_mismatch
//! Priority: critical/high/medium/low severity tiers
//! Role: the closed set of actor roles
//! FaultType: data-mismatch fault classification

use serde::{Deserialize, Serialize};

/// Ticket type classification.
///
/// Fixes which SLA row and which metadata variant apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketType {
    VolumeShortfall,
    DataMismatch,
}

impl TicketType {
    pub const ALL: [TicketType; 2] = [TicketType::VolumeShortfall, TicketType::DataMismatch];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::VolumeShortfall => "volume_shortfall",
            Self::DataMismatch => "data_mismatch",
        }
    }

    /// Default title used when the creator supplies none.
    pub fn default_title(&self) -> &'static str {
        match self {
            Self::VolumeShortfall => "Volume Shortfall - Applications below expectation",
            Self::DataMismatch => "Data Mismatch - Mistake in application process",
        }
    }
}

/// Severity tier, derived from ticket type at creation.
///
/// Never independently chosen by the creator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Critical,
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Actor role, supplied as trusted input by the identity collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Client,
    AccountManager,
    Sales,
    CareerAssociate,
    CallSupport,
    Cro,
    Coo,
    Ceo,
}

impl Role {
    /// Parse the snake_case role name; None for anything unknown.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "client" => Some(Self::Client),
            "account_manager" => Some(Self::AccountManager),
            "sales" => Some(Self::Sales),
            "career_associate" => Some(Self::CareerAssociate),
            "call_support" => Some(Self::CallSupport),
            "cro" => Some(Self::Cro),
            "coo" => Some(Self::Coo),
            "ceo" => Some(Self::Ceo),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::AccountManager => "account_manager",
            Self::Sales => "sales",
            Self::CareerAssociate => "career_associate",
            Self::CallSupport => "call_support",
            Self::Cro => "cro",
            Self::Coo => "coo",
            Self::Ceo => "ceo",
        }
    }
}

/// What kind of mistake a data-mismatch ticket reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultType {
    AppliedWrongDomain,
    SpellingMistakeInNameOrCoverLetter,
    IncorrectInformationSubmitted,
    WrongDocumentAttached,
    Other,
}

impl FaultType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AppliedWrongDomain => "applied_wrong_domain",
            Self::SpellingMistakeInNameOrCoverLetter => "spelling_mistake_in_name_or_cover_letter",
            Self::IncorrectInformationSubmitted => "incorrect_information_submitted",
            Self::WrongDocumentAttached => "wrong_document_attached",
            Self::Other => "other",
        }
    }
}
