//! Webhook trigger filters
//!
//! Each filter decides whether an incoming push may trigger one pipeline and
//! records the reason when it may not:
//! - `FilterChain` runs filters in order against one `FilterResponse`
//! - `BranchFilter` checks the pushed branch
//! - `PushKindFilter` checks the kind of push

mod branch;
mod chain;
mod push_kind;
mod response;

pub use branch::{branch_name, BranchFilter, BranchPattern};
pub use chain::{FilterChain, WebhookFilter};
pub use push_kind::{CreateAndUpdateCheck, PushActionKind, PushKindFilter};
pub use response::{FailedReason, FilterResponse};
