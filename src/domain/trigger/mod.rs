//! Pipeline trigger rules and direct filter evaluation

pub mod dto;
pub mod handler;
pub mod registry;

pub use dto::TriggerRule;
pub use handler::{evaluate_push_kind, list_rules};
pub use registry::{CompiledRule, TriggerRegistry};
