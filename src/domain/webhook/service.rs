//! Push classification and trigger evaluation

use tracing::{debug, info};

use super::dto::{PushPayload, PushTriggerResult, RejectedPipeline, TriggeredPipeline};
use crate::domain::trigger::TriggerRegistry;
use crate::filter::{FilterResponse, PushActionKind};

/// Action kinds carried by a push, in a stable order.
///
/// A push that creates its ref yields `new-branch`; a push with at least one
/// commit touching files yields `push-file`.
pub fn classify_push(payload: &PushPayload) -> Vec<String> {
    let mut actions = Vec::with_capacity(2);
    if payload.creates_ref() {
        actions.push(PushActionKind::NewBranch.as_str().to_string());
    }
    if payload.commits.iter().any(|c| c.touches_files()) {
        actions.push(PushActionKind::PushFile.as_str().to_string());
    }
    actions
}

/// Run every applicable pipeline's filter chain against the push.
///
/// Each pipeline gets its own `FilterResponse`.
pub fn evaluate_push(registry: &TriggerRegistry, payload: &PushPayload) -> PushTriggerResult {
    if payload.deletes_ref() {
        debug!(git_ref = %payload.git_ref, "Ignoring ref deletion");
        return PushTriggerResult::ignored("Ref deletion does not trigger pipelines");
    }

    let action_list = classify_push(payload);
    let mut result = PushTriggerResult::accepted(action_list);

    for rule in registry.for_repository(&payload.repository.full_name) {
        let mut response = FilterResponse::new();
        let chain = rule.filter_chain(&payload.git_ref, &result.action_list);

        if chain.do_filter(&mut response) {
            result.triggered.push(TriggeredPipeline {
                pipeline_id: rule.pipeline_id().to_string(),
                branch: response.param("branch").map(str::to_string),
            });
        } else {
            debug!(
                pipeline_id = rule.pipeline_id(),
                reasons = ?response.failed_reasons(),
                "Pipeline not triggered"
            );
            result.rejected.push(RejectedPipeline {
                pipeline_id: rule.pipeline_id().to_string(),
                reasons: response.into_failed_reasons(),
            });
        }
    }

    info!(
        event_id = %result.event_id,
        repository = %payload.repository.full_name,
        git_ref = %payload.git_ref,
        action_list = ?result.action_list,
        triggered = result.triggered.len(),
        rejected = result.rejected.len(),
        "Evaluated push against trigger rules"
    );

    result
}
