//! Source-control webhooks that may trigger pipelines

pub mod dto;
pub mod handler;
pub mod service;

pub use handler::handle_push_webhook;
pub use service::{classify_push, evaluate_push};
