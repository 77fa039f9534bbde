pub mod trigger;
pub mod webhook;
