//! Core domain types (Layers 0-10)
//!
//! Module hierarchy follows type dependency order:
//! - time: wall-clock primitives (Layer 0)
//! - identity: TicketId, CommentId, UserId, ClientId, ShortCode (Layer 1)
//! - domain: TicketType, Priority, Role, FaultType (Layer 2)
//! - status: TicketStatus (Layer 3)
//! - capability: role capability table (Layer 4)
//! - metadata: type-keyed ticket metadata (Layer 5)
//! - sla: SlaEntry, SlaTable (Layer 6)
//! - comment: Comment, Assignment (Layer 7)
//! - standing: SlaStanding classification (Layer 8)
//! - ticket: TicketDraft, Ticket (Layer 9)
//! - lifecycle: Actor, transition authorization (Layer 10)

pub mod capability;
pub mod comment;
pub mod domain;
pub mod error;
pub mod identity;
pub mod lifecycle;
pub mod metadata;
pub mod sla;
pub mod standing;
pub mod status;
pub mod ticket;
pub mod time;

pub use capability::Capabilities;
pub use comment::{Assignment, Comment};
pub use domain::{FaultType, Priority, Role, TicketType};
pub use error::{
    ConfigurationMissing, CoreError, DeniedAction, ErrorCode, InvalidId, PermissionError,
    TransitionError, ValidationError,
};
pub use identity::{ClientId, CommentId, ShortCode, TicketId, UserId};
pub use lifecycle::{Actor, authorize_transition, can_view};
pub use metadata::TicketMetadata;
pub use sla::{SlaEntry, SlaTable};
pub use standing::SlaStanding;
pub use status::TicketStatus;
pub use ticket::{Ticket, TicketDraft};
pub use time::{HOUR_MS, WallClock, whole_hours};
