//! Accumulator shared by every filter of one chain evaluation

use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

/// Why a filter rejected an event for a pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FailedReason {
    pub pipeline_id: String,
    /// Name of the rejecting filter
    pub filter: String,
    pub message: String,
}

/// Collects rejection reasons and the parameters passing filters expose.
///
/// One instance is created per (event, pipeline) evaluation, handed as
/// `&mut` to each filter of the chain, then read by the caller.
#[derive(Debug, Default, Clone)]
pub struct FilterResponse {
    failed_reasons: Vec<FailedReason>,
    params: HashMap<String, String>,
}

impl FilterResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_failed_reason(
        &mut self,
        pipeline_id: impl Into<String>,
        filter: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.failed_reasons.push(FailedReason {
            pipeline_id: pipeline_id.into(),
            filter: filter.into(),
            message: message.into(),
        });
    }

    pub fn add_param(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    pub fn failed_reasons(&self) -> &[FailedReason] {
        &self.failed_reasons
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn into_failed_reasons(self) -> Vec<FailedReason> {
        self.failed_reasons
    }
}
