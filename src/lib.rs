#![forbid(unsafe_code)]

pub mod config;
pub mod core;
pub mod error;
pub mod ops;
mod paths;
pub mod provision;
pub mod store;
pub mod telemetry;
pub mod test_harness;

pub use error::{Effect, Error, Transience};
pub type Result<T> = std::result::Result<T, Error>;

// Re-export core types at crate root for convenience
pub use crate::core::{
    Actor, Assignment, Capabilities, ClientId, Comment, CommentId, ConfigurationMissing,
    CoreError, DeniedAction, ErrorCode, FaultType, InvalidId, PermissionError, Priority, Role,
    ShortCode, SlaEntry, SlaStanding, SlaTable, Ticket, TicketDraft, TicketId, TicketMetadata,
    TicketStatus, TicketType, TransitionError, UserId, ValidationError, WallClock,
    authorize_transition, can_view,
};
pub use crate::ops::{
    AttachmentInput, AttachmentOutcome, CreateOutcome, OpError, TicketOps, TicketView,
};
pub use crate::provision::{
    NewUserRow, ProvisionReport, RowOutcome, UserProfile, provision_users,
};
pub use crate::store::{
    AttachmentStore, IdentityAdmin, StoreError, TicketStore, attachment_path,
};
