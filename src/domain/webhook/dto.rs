//! DTOs for source-control push webhooks

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::filter::FailedReason;
use crate::utils::BaseResponse;

/// `before` value of a push that created its ref
pub const NULL_SHA: &str = "0000000000000000000000000000000000000000";

/// Event type from the X-GitHub-Event header
#[derive(Debug, Clone, PartialEq)]
pub enum GitHubEventType {
    Push,
    Ping,
    Unknown(String),
}

impl From<&str> for GitHubEventType {
    fn from(s: &str) -> Self {
        match s {
            "push" => GitHubEventType::Push,
            "ping" => GitHubEventType::Ping,
            other => GitHubEventType::Unknown(other.to_string()),
        }
    }
}

/// Push event payload (X-GitHub-Event: push)
#[derive(Debug, Clone, Deserialize)]
pub struct PushPayload {
    /// Full ref, e.g. `refs/heads/main`
    #[serde(rename = "ref")]
    pub git_ref: String,
    pub before: String,
    pub after: String,
    #[serde(default)]
    pub created: bool,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default)]
    pub commits: Vec<PushCommit>,
    pub repository: PushRepository,
    pub pusher: Option<PushPusher>,
}

impl PushPayload {
    pub fn creates_ref(&self) -> bool {
        self.created || self.before == NULL_SHA
    }

    pub fn deletes_ref(&self) -> bool {
        self.deleted || self.after == NULL_SHA
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushCommit {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub added: Vec<String>,
    #[serde(default)]
    pub modified: Vec<String>,
    #[serde(default)]
    pub removed: Vec<String>,
}

impl PushCommit {
    pub fn touches_files(&self) -> bool {
        !(self.added.is_empty() && self.modified.is_empty() && self.removed.is_empty())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushRepository {
    pub full_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PushPusher {
    pub name: String,
}

/// Pipeline the push triggered
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TriggeredPipeline {
    pub pipeline_id: String,
    /// Branch reported by the branch filter
    pub branch: Option<String>,
}

/// Pipeline the push did not trigger, with the reasons collected by its chain
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RejectedPipeline {
    pub pipeline_id: String,
    pub reasons: Vec<FailedReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WebhookStatus {
    Accepted,
    Ignored,
}

/// Outcome of one push webhook
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PushTriggerResult {
    pub event_id: Uuid,
    pub received_at: DateTime<Utc>,
    pub status: WebhookStatus,
    /// Set when the event was ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub action_list: Vec<String>,
    pub triggered: Vec<TriggeredPipeline>,
    pub rejected: Vec<RejectedPipeline>,
}

impl PushTriggerResult {
    pub fn accepted(action_list: Vec<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            received_at: Utc::now(),
            status: WebhookStatus::Accepted,
            message: None,
            action_list,
            triggered: Vec::new(),
            rejected: Vec::new(),
        }
    }

    pub fn ignored(message: impl Into<String>) -> Self {
        Self {
            status: WebhookStatus::Ignored,
            message: Some(message.into()),
            ..Self::accepted(Vec::new())
        }
    }
}

pub type PushWebhookResponse = BaseResponse<PushTriggerResult>;
