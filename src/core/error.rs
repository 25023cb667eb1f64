//! Core capability errors (parsing, validation, lifecycle refusals).
//!
//! These are bounded and stable: core errors represent domain/refusal
//! states, not library implementation details.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::domain::{Role, TicketType};
use super::status::TicketStatus;
use crate::error::{Effect, Transience};

/// Invalid entity identifier.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum InvalidId {
    #[error("ticket id `{raw}` is invalid: {reason}")]
    Ticket { raw: String, reason: String },
    #[error("comment id `{raw}` is invalid: {reason}")]
    Comment { raw: String, reason: String },
    #[error("user id `{raw}` is invalid: {reason}")]
    User { raw: String, reason: String },
    #[error("client id `{raw}` is invalid: {reason}")]
    Client { raw: String, reason: String },
    #[error("short code `{raw}` is invalid: {reason}")]
    ShortCode { raw: String, reason: String },
}

/// No SLA entry for the requested ticket type.
///
/// Fatal to ticket creation; never defaulted around.
#[derive(Debug, Error, Clone)]
#[error("no SLA configuration for ticket type `{}`", ticket_type.as_str())]
pub struct ConfigurationMissing {
    pub ticket_type: TicketType,
}

/// Required field absent or malformed, rejected before any write.
#[derive(Debug, Error, Clone)]
#[error("validation failed for field {field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

/// What a denied actor was trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeniedAction {
    Create(TicketType),
    Transition(TicketStatus),
}

impl fmt::Display for DeniedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create(ty) => write!(f, "create a `{}` ticket", ty.as_str()),
            Self::Transition(to) => write!(f, "move the ticket to `{}`", to.as_str()),
        }
    }
}

/// Actor lacks the role or assignment for the attempted action.
#[derive(Debug, Error, Clone)]
#[error("role `{}` may not {action}: {reason}", role.as_str())]
pub struct PermissionError {
    pub role: Role,
    pub action: DeniedAction,
    pub reason: &'static str,
}

/// Transition out of a terminal state.
#[derive(Debug, Error, Clone)]
#[error("invalid transition from {} to {}", from.as_str(), to.as_str())]
pub struct TransitionError {
    pub from: TicketStatus,
    pub to: TicketStatus,
}

/// Canonical error enum for core capability.
#[derive(Debug, Error, Clone)]
#[non_exhaustive]
pub enum CoreError {
    #[error(transparent)]
    InvalidId(#[from] InvalidId),
    #[error(transparent)]
    ConfigurationMissing(#[from] ConfigurationMissing),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Permission(#[from] PermissionError),
    #[error(transparent)]
    InvalidTransition(#[from] TransitionError),
}

impl CoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::InvalidId(_) => ErrorCode::InvalidId,
            CoreError::ConfigurationMissing(_) => ErrorCode::ConfigurationMissing,
            CoreError::Validation(_) => ErrorCode::ValidationFailed,
            CoreError::Permission(_) => ErrorCode::PermissionDenied,
            CoreError::InvalidTransition(_) => ErrorCode::InvalidTransition,
        }
    }

    pub fn transience(&self) -> Transience {
        // Core errors are pure domain/input failures.
        Transience::Permanent
    }

    pub fn effect(&self) -> Effect {
        Effect::None
    }
}

/// Stable snake_case classification surfaced to callers.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigurationMissing,
    PermissionDenied,
    ValidationFailed,
    InvalidTransition,
    InvalidId,
    NotFound,
    DependencyFailure,
    AttachmentFailed,
    Unknown(String),
}

impl ErrorCode {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorCode::ConfigurationMissing => "configuration_missing",
            ErrorCode::PermissionDenied => "permission_denied",
            ErrorCode::ValidationFailed => "validation_failed",
            ErrorCode::InvalidTransition => "invalid_transition",
            ErrorCode::InvalidId => "invalid_id",
            ErrorCode::NotFound => "not_found",
            ErrorCode::DependencyFailure => "dependency_failure",
            ErrorCode::AttachmentFailed => "attachment_failed",
            ErrorCode::Unknown(code) => code.as_str(),
        }
    }

    pub fn parse(code: &str) -> Self {
        match code {
            "configuration_missing" => ErrorCode::ConfigurationMissing,
            "permission_denied" => ErrorCode::PermissionDenied,
            "validation_failed" => ErrorCode::ValidationFailed,
            "invalid_transition" => ErrorCode::InvalidTransition,
            "invalid_id" => ErrorCode::InvalidId,
            "not_found" => ErrorCode::NotFound,
            "dependency_failure" => ErrorCode::DependencyFailure,
            "attachment_failed" => ErrorCode::AttachmentFailed,
            other => ErrorCode::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ErrorCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ErrorCode::parse(s))
    }
}

impl Serialize for ErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(ErrorCode::parse(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_roundtrips() {
        for code in [
            ErrorCode::ConfigurationMissing,
            ErrorCode::PermissionDenied,
            ErrorCode::ValidationFailed,
            ErrorCode::InvalidTransition,
            ErrorCode::InvalidId,
            ErrorCode::NotFound,
            ErrorCode::DependencyFailure,
            ErrorCode::AttachmentFailed,
        ] {
            assert_eq!(ErrorCode::parse(code.as_str()), code);
        }
    }

    #[test]
    fn unknown_error_code_survives() {
        let code = ErrorCode::parse("future_code");
        assert_eq!(code, ErrorCode::Unknown("future_code".to_string()));
        assert_eq!(code.as_str(), "future_code");
    }

    #[test]
    fn core_errors_are_permanent_and_effect_free() {
        let err: CoreError = ConfigurationMissing {
            ticket_type: TicketType::DataMismatch,
        }
        .into();
        assert_eq!(err.transience(), Transience::Permanent);
        assert_eq!(err.effect(), Effect::None);
        assert_eq!(err.code(), ErrorCode::ConfigurationMissing);
    }
}
