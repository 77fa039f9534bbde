//! DTOs for pipeline trigger rules

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::filter::FailedReason;
use crate::utils::BaseResponse;

/// Trigger configuration of one pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TriggerRule {
    #[validate(length(min = 1, message = "pipelineId must not be empty"))]
    pub pipeline_id: String,
    /// Repository full name (`owner/repo`); any repository when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    /// Branch patterns that may trigger; any branch when empty
    #[serde(default)]
    pub branches: Vec<String>,
    /// Branch patterns that never trigger
    #[serde(default)]
    pub exclude_branches: Vec<String>,
    /// Create/update restriction; absent, true or false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub check_create_and_update: Option<bool>,
}

/// Direct evaluation of the push-kind filter
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePushKindRequest {
    #[validate(length(min = 1, message = "pipelineId must not be empty"))]
    pub pipeline_id: String,
    #[serde(default)]
    pub action_list: Vec<String>,
    #[serde(default)]
    pub check_create_and_update: Option<bool>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatePushKindResult {
    pub matched: bool,
    pub reasons: Vec<FailedReason>,
}

pub type EvaluatePushKindResponse = BaseResponse<EvaluatePushKindResult>;
pub type TriggerRuleListResponse = BaseResponse<Vec<TriggerRule>>;
