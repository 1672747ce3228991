//! services/api/src/web/chat.rs
//!
//! The conversational endpoints: welcome message, free-text craving
//! messages, and decision reporting. Each reply waits out the configured
//! "thinking" pause before returning; this models the original assistant's
//! typing delay and has no effect on the core logic.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use craveshield_core::domain::SavingsLedger;
use serde::{Deserialize, Serialize};
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// Request/Response Types
//=========================================================================================

#[derive(Deserialize, ToSchema)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponse {
    pub reply: String,
    /// True when a matched product now awaits a decision.
    pub awaiting_decision: bool,
}

#[derive(Deserialize, ToSchema)]
pub struct DecisionRequest {
    /// One of "resist", "alternative", or "original". Anything else earns a
    /// restatement prompt and records nothing.
    pub choice: String,
}

#[derive(Serialize, ToSchema)]
pub struct DecisionResponse {
    pub reply: String,
    pub calories_saved: i64,
    pub money_saved: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub savings: Option<SavingsLedger>,
}

#[derive(Serialize, ToSchema)]
pub struct WelcomeResponse {
    pub message: String,
}

async fn thinking_pause(state: &AppState) {
    if !state.config.reply_delay.is_zero() {
        tokio::time::sleep(state.config.reply_delay).await;
    }
}

//=========================================================================================
// Handlers
//=========================================================================================

/// GET /chat/welcome - Profile-aware conversation opener
#[utoipa::path(
    get,
    path = "/chat/welcome",
    responses(
        (status = 200, description = "Welcome message", body = WelcomeResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn welcome_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let user = state
        .auth
        .user(user_id)
        .await
        .map_err(|e| {
            error!("Failed to load user: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load user".to_string(),
            )
        })?
        .ok_or((StatusCode::UNAUTHORIZED, "Unknown user".to_string()))?;

    let message = state.assistant.welcome(user_id, &user.name).await;
    Ok(Json(WelcomeResponse { message }))
}

/// POST /chat/message - Submit one free-text message
#[utoipa::path(
    post,
    path = "/chat/message",
    request_body = MessageRequest,
    responses(
        (status = 200, description = "Assistant reply", body = MessageResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn message_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<MessageRequest>,
) -> impl IntoResponse {
    let reply = state.assistant.submit_message(user_id, &req.text).await;
    thinking_pause(&state).await;
    Json(MessageResponse {
        reply: reply.text,
        awaiting_decision: reply.awaiting_decision,
    })
}

/// POST /chat/decision - Report the decision for the pending product
#[utoipa::path(
    post,
    path = "/chat/decision",
    request_body = DecisionRequest,
    responses(
        (status = 200, description = "Decision recorded (or restatement prompt)", body = DecisionResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn decision_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(req): Json<DecisionRequest>,
) -> impl IntoResponse {
    let outcome = state.assistant.submit_decision(user_id, &req.choice).await;
    thinking_pause(&state).await;
    Json(DecisionResponse {
        reply: outcome.message,
        calories_saved: outcome.calories_saved,
        money_saved: outcome.money_saved,
        savings: outcome.ledger,
    })
}
