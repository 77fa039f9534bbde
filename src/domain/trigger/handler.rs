use axum::{extract::rejection::JsonRejection, extract::State, Json};
use tracing::info;
use validator::Validate;

use super::dto::{
    EvaluatePushKindRequest, EvaluatePushKindResponse, EvaluatePushKindResult, TriggerRule,
    TriggerRuleListResponse,
};
use crate::filter::{FilterResponse, PushKindFilter, WebhookFilter};
use crate::state::AppState;
use crate::utils::{AppError, BaseResponse, ErrorResponse};

/// List registered trigger rules
#[utoipa::path(
    get,
    path = "/api/triggers",
    tag = "Trigger",
    responses(
        (status = 200, description = "Registered trigger rules", body = BaseResponse<Vec<TriggerRule>>)
    )
)]
pub async fn list_rules(State(state): State<AppState>) -> Json<TriggerRuleListResponse> {
    let rules = state.registry.rules().cloned().collect();
    Json(BaseResponse::success(rules))
}

/// Evaluate the push-kind filter for one pipeline
#[utoipa::path(
    post,
    path = "/api/triggers/push-kind/evaluate",
    tag = "Trigger",
    request_body = EvaluatePushKindRequest,
    responses(
        (status = 200, body = BaseResponse<EvaluatePushKindResult>),
        (status = 400, body = ErrorResponse)
    )
)]
pub async fn evaluate_push_kind(
    payload: Result<Json<EvaluatePushKindRequest>, JsonRejection>,
) -> Result<Json<EvaluatePushKindResponse>, AppError> {
    let Json(req) = payload?;
    req.validate()?;

    let filter = PushKindFilter::new(
        req.pipeline_id,
        req.action_list,
        req.check_create_and_update,
    );
    let mut response = FilterResponse::new();
    let matched = filter.do_filter(&mut response);

    info!(
        pipeline_id = filter.pipeline_id(),
        matched, "Evaluated push kind filter"
    );

    Ok(Json(BaseResponse::success(EvaluatePushKindResult {
        matched,
        reasons: response.into_failed_reasons(),
    })))
}
