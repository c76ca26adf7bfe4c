//! HTTP serving surface for Oravox
//!
//! The voice platform delivers skill requests over a single webhook.
//! This module exposes that webhook as an axum router: `POST /` takes a
//! [`SkillRequest`](crate::skill::SkillRequest) body and returns the
//! [`SkillResponse`](crate::skill::SkillResponse), and `GET /healthz`
//! answers liveness probes.

use crate::skill::{SkillHandler, SkillRequest, SkillResponse};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;

/// Build the skill webhook router over the given handler
pub fn router(handler: Arc<SkillHandler>) -> Router {
    Router::new()
        .route("/", post(handle_skill_request))
        .route("/healthz", get(healthz))
        .with_state(handler)
}

async fn handle_skill_request(
    State(handler): State<Arc<SkillHandler>>,
    Json(request): Json<SkillRequest>,
) -> Json<SkillResponse> {
    Json(handler.handle(request).await)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
