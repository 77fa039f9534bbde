pub mod config;
pub mod domain;
pub mod filter;
pub mod state;
pub mod utils;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(
        domain::webhook::handler::handle_push_webhook,
        domain::trigger::handler::list_rules,
        domain::trigger::handler::evaluate_push_kind,
    ),
    components(
        schemas(
            domain::webhook::dto::PushTriggerResult,
            domain::webhook::dto::TriggeredPipeline,
            domain::webhook::dto::RejectedPipeline,
            domain::webhook::dto::WebhookStatus,
            domain::trigger::dto::TriggerRule,
            domain::trigger::dto::EvaluatePushKindRequest,
            domain::trigger::dto::EvaluatePushKindResult,
            filter::FailedReason,
            filter::PushActionKind,
            utils::response::ErrorResponse,
        )
    ),
    tags(
        (name = "Webhook", description = "Source-control webhooks"),
        (name = "Trigger", description = "Pipeline trigger rules")
    )
)]
pub struct ApiDoc;

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api/webhooks/push",
            post(domain::webhook::handle_push_webhook),
        )
        .route("/api/triggers", get(domain::trigger::list_rules))
        .route(
            "/api/triggers/push-kind/evaluate",
            post(domain::trigger::evaluate_push_kind),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
