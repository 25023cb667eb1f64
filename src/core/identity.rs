//! Layer 1: Identity atoms
//!
//! TicketId / CommentId / UserId / ClientId: uuid-backed entity ids.
//! ShortCode: human-facing ticket sort code with a fixed alphabet.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{CoreError, InvalidId};

macro_rules! uuid_id {
    ($name:ident, $kind:ident, $doc:literal) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub fn new(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Generate a fresh random id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4())
            }

            /// Parse from the canonical hyphenated form.
            pub fn parse(s: &str) -> Result<Self, CoreError> {
                Uuid::parse_str(s).map(Self).map_err(|e| {
                    InvalidId::$kind {
                        raw: s.to_string(),
                        reason: e.to_string(),
                    }
                    .into()
                })
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

uuid_id!(TicketId, Ticket, "Ticket identifier - assigned at creation, never reused.");
uuid_id!(CommentId, Comment, "Comment identifier - unique within the system.");
uuid_id!(UserId, User, "Acting-user identifier, supplied by the identity collaborator.");
uuid_id!(ClientId, Client, "Client record identifier.");

/// Alphabet for short codes: lowercase alphanumeric, no ambiguity handling
/// needed since codes are display-only.
const SHORT_CODE_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

const SHORT_CODE_LEN: usize = 6;

/// Human-facing ticket sort code - "tk-{suffix}" format.
///
/// Suffix is lowercase alphanumeric. Display-only; the uuid remains the key.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShortCode(String);

impl ShortCode {
    /// Parse and validate a short code string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let Some(rest) = s.strip_prefix("tk-") else {
            return Err(InvalidId::ShortCode {
                raw: s.to_string(),
                reason: "must start with 'tk-'".into(),
            }
            .into());
        };
        if rest.is_empty() {
            return Err(InvalidId::ShortCode {
                raw: s.to_string(),
                reason: "missing suffix".into(),
            }
            .into());
        }
        for c in rest.bytes() {
            if !SHORT_CODE_ALPHABET.contains(&c) {
                return Err(InvalidId::ShortCode {
                    raw: s.to_string(),
                    reason: "contains non-alphanumeric character".into(),
                }
                .into());
            }
        }
        Ok(Self(s.to_string()))
    }

    /// Generate a new short code.
    pub fn generate() -> Self {
        use rand::Rng;
        let mut rng = rand::rng();
        let suffix: String = (0..SHORT_CODE_LEN)
            .map(|_| {
                let idx = rng.random_range(0..SHORT_CODE_ALPHABET.len());
                SHORT_CODE_ALPHABET[idx] as char
            })
            .collect();
        Self(format!("tk-{}", suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ShortCode({:?})", self.0)
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_id_parse_roundtrip() {
        let id = TicketId::generate();
        let parsed = TicketId::parse(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn ticket_id_rejects_garbage() {
        assert!(TicketId::parse("not-a-uuid").is_err());
        assert!(TicketId::parse("").is_err());
    }

    #[test]
    fn short_code_generate_parses_back() {
        let code = ShortCode::generate();
        assert!(code.as_str().starts_with("tk-"));
        let parsed = ShortCode::parse(code.as_str()).unwrap();
        assert_eq!(code, parsed);
    }

    #[test]
    fn short_code_rejects_bad_prefix_and_chars() {
        assert!(ShortCode::parse("bd-abc123").is_err());
        assert!(ShortCode::parse("tk-").is_err());
        assert!(ShortCode::parse("tk-ABC!").is_err());
    }
}
