//! Push webhook handler
//!
//! Verifies the payload signature, keeps only push events and evaluates the
//! registered trigger rules against them.

use axum::{body::Bytes, extract::State, http::HeaderMap, Json};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::{debug, error, info, warn};

use super::dto::{GitHubEventType, PushPayload, PushTriggerResult, PushWebhookResponse};
use super::service::evaluate_push;
use crate::state::AppState;
use crate::utils::{AppError, BaseResponse, ErrorResponse};

/// Verify a `sha256=<hex>` HMAC-SHA256 signature of `body`
pub(crate) fn verify_signature(secret: &str, signature: &str, body: &[u8]) -> Result<(), AppError> {
    let signature = signature.strip_prefix("sha256=").ok_or_else(|| {
        warn!("Invalid signature format: missing sha256= prefix");
        AppError::unauthorized("Invalid signature format")
    })?;

    let expected = hex::decode(signature).map_err(|_| {
        warn!("Signature is not valid hex");
        AppError::unauthorized("Invalid signature format")
    })?;

    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|e| {
        error!(error = %e, "HMAC initialization failed");
        AppError::internal_error("HMAC error")
    })?;
    mac.update(body);

    mac.verify_slice(&expected).map_err(|_| {
        warn!("Webhook signature mismatch");
        AppError::unauthorized("Signature mismatch")
    })
}

fn check_signature(state: &AppState, headers: &HeaderMap, body: &[u8]) -> Result<(), AppError> {
    if state.config.skip_signature_verification {
        warn!("Webhook signature verification skipped (development mode)");
        return Ok(());
    }

    let signature = headers
        .get("X-Hub-Signature-256")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            warn!("Missing X-Hub-Signature-256 header");
            AppError::unauthorized("Missing signature header")
        })?;

    let secret = state.config.webhook_secret.as_deref().ok_or_else(|| {
        error!("WEBHOOK_SECRET not configured");
        AppError::internal_error("WEBHOOK_SECRET not configured")
    })?;

    verify_signature(secret, signature, body)
}

/// Receive a push webhook and report which pipelines it triggers
#[utoipa::path(
    post,
    path = "/api/webhooks/push",
    tag = "Webhook",
    request_body(content = String, content_type = "application/json"),
    responses(
        (status = 200, body = BaseResponse<PushTriggerResult>),
        (status = 400, body = ErrorResponse),
        (status = 401, body = ErrorResponse),
        (status = 500, body = ErrorResponse)
    )
)]
pub async fn handle_push_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PushWebhookResponse>, AppError> {
    check_signature(&state, &headers, &body)?;

    let event_type = headers
        .get("X-GitHub-Event")
        .and_then(|v| v.to_str().ok())
        .map(GitHubEventType::from)
        .ok_or_else(|| {
            warn!("Missing X-GitHub-Event header");
            AppError::bad_request("Missing X-GitHub-Event header")
        })?;

    debug!(event_type = ?event_type, "Received webhook");

    match event_type {
        GitHubEventType::Push => {}
        GitHubEventType::Ping => {
            return Ok(Json(BaseResponse::success(PushTriggerResult::ignored(
                "pong",
            ))));
        }
        GitHubEventType::Unknown(event_name) => {
            warn!(event = %event_name, "Unsupported webhook event type");
            return Ok(Json(BaseResponse::success(PushTriggerResult::ignored(
                format!("Unsupported event type: {}", event_name),
            ))));
        }
    }

    let payload: PushPayload = serde_json::from_slice(&body).map_err(|e| {
        error!(error = %e, "Failed to parse push payload");
        AppError::bad_request(format!("Invalid payload: {}", e))
    })?;

    info!(
        repository = %payload.repository.full_name,
        git_ref = %payload.git_ref,
        pusher = payload.pusher.as_ref().map(|p| p.name.as_str()).unwrap_or("unknown"),
        commits = payload.commits.len(),
        "Processing push event"
    );

    let result = evaluate_push(&state.registry, &payload);
    Ok(Json(BaseResponse::success(result)))
}
