//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the profile, savings, and goals REST
//! endpoints, and the master definition for the OpenAPI specification.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Extension, Json};
use craveshield_core::domain::{SavingsLedger, UserProfile};
use craveshield_core::goals::GoalProgressReport;
use craveshield_core::AssistantError;
use serde::Serialize;
use tracing::error;
use utoipa::{OpenApi, ToSchema};
use uuid::Uuid;

use crate::web::state::AppState;

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::auth::signup_handler,
        crate::web::auth::login_handler,
        crate::web::auth::logout_handler,
        crate::web::auth::delete_account_handler,
        crate::web::chat::welcome_handler,
        crate::web::chat::message_handler,
        crate::web::chat::decision_handler,
        get_profile_handler,
        save_profile_handler,
        delete_profile_handler,
        get_savings_handler,
        reset_savings_handler,
        goal_progress_handler,
    ),
    components(
        schemas(
            crate::web::auth::SignupRequest,
            crate::web::auth::LoginRequest,
            crate::web::auth::AuthResponse,
            crate::web::chat::MessageRequest,
            crate::web::chat::MessageResponse,
            crate::web::chat::DecisionRequest,
            crate::web::chat::DecisionResponse,
            crate::web::chat::WelcomeResponse,
            ProfileResponse,
            SavingsResponse,
            GoalProgressResponse,
        )
    ),
    tags(
        (name = "CraveShield API", description = "API endpoints for the craving management assistant.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Serialize, ToSchema)]
pub struct ProfileResponse {
    #[schema(value_type = Option<Object>)]
    pub profile: Option<UserProfile>,
}

#[derive(Serialize, ToSchema)]
pub struct SavingsResponse {
    #[schema(value_type = Object)]
    pub savings: SavingsLedger,
}

#[derive(Serialize, ToSchema)]
pub struct GoalProgressResponse {
    #[schema(value_type = Option<Object>)]
    pub progress: Option<GoalProgressReport>,
}

//=========================================================================================
// Profile Handlers
//=========================================================================================

/// GET /profile - The saved profile, if any
#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile (null when none is saved)", body = ProfileResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> impl IntoResponse {
    let profile = state.assistant.profile(user_id).await;
    Json(ProfileResponse { profile })
}

/// PUT /profile - Validate and save the profile wholesale
#[utoipa::path(
    put,
    path = "/profile",
    request_body = Object,
    responses(
        (status = 200, description = "Profile saved", body = ProfileResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn save_profile_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
    Json(profile): Json<UserProfile>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    match state.assistant.save_profile(user_id, profile).await {
        Ok(saved) => Ok(Json(ProfileResponse {
            profile: Some(saved),
        })),
        Err(AssistantError::Profile(e)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(AssistantError::Port(e)) => {
            error!("Failed to save profile: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to save profile".to_string(),
            ))
        }
    }
}

/// DELETE /profile - Remove the saved profile
#[utoipa::path(
    delete,
    path = "/profile",
    responses(
        (status = 200, description = "Profile removed"),
        (status = 401, description = "Not signed in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_profile_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    state.assistant.delete_profile(user_id).await.map_err(|e| {
        error!("Failed to delete profile: {:?}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to delete profile".to_string(),
        )
    })?;
    Ok(StatusCode::OK)
}

//=========================================================================================
// Savings and Goals Handlers
//=========================================================================================

/// GET /savings - The running savings ledger
#[utoipa::path(
    get,
    path = "/savings",
    responses(
        (status = 200, description = "Current savings totals", body = SavingsResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn get_savings_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> impl IntoResponse {
    let savings = state.assistant.savings(user_id).await;
    Json(SavingsResponse { savings })
}

/// POST /savings/reset - Reset the ledger to zero
#[utoipa::path(
    post,
    path = "/savings/reset",
    responses(
        (status = 200, description = "Ledger after the reset", body = SavingsResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn reset_savings_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> impl IntoResponse {
    let savings = state.assistant.reset_savings(user_id).await;
    Json(SavingsResponse { savings })
}

/// GET /goals/progress - Percent-of-target figures against the profile's goals
#[utoipa::path(
    get,
    path = "/goals/progress",
    responses(
        (status = 200, description = "Progress report (null without a profile)", body = GoalProgressResponse),
        (status = 401, description = "Not signed in")
    )
)]
pub async fn goal_progress_handler(
    State(state): State<AppState>,
    Extension(user_id): Extension<Uuid>,
) -> impl IntoResponse {
    let progress = state.assistant.goal_progress(user_id).await;
    Json(GoalProgressResponse { progress })
}
