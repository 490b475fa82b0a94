use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;
use weatherbot_core::{Bot, Query, WebhookRequest, WebhookResponse};

/// Message returned for every internal failure, regardless of stage.
pub const GENERIC_FAILURE: &str = "An error occurred. Please try again later.";

/// Assemble the application router.
///
/// CORS is wide open: the webhook serves browser chat clients from any
/// origin and carries no credentials.
pub fn router(bot: Arc<Bot>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/webhook", post(webhook))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(bot)
}

async fn health() -> &'static str {
    "OK"
}

/// Chat transport entry point: one request in, one fulfillment text out.
///
/// Every pipeline failure is caught here, logged with its stage, and
/// collapsed into the one generic 500 body; no partial reply ever leaves
/// this handler.
async fn webhook(
    State(bot): State<Arc<Bot>>,
    Json(request): Json<WebhookRequest>,
) -> impl IntoResponse {
    let query = Query {
        text: request.query_text,
        session_id: request.session_id,
        language_code: request.language_code,
        fallback_location: request.location_lat_long,
    };

    match bot.respond(&query).await {
        Ok(fulfillment_text) => {
            (StatusCode::OK, Json(WebhookResponse { fulfillment_text }))
        }
        Err(err) => {
            error!(session_id = %query.session_id, error = %err, "webhook request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(WebhookResponse { fulfillment_text: GENERIC_FAILURE.to_string() }),
            )
        }
    }
}
