//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{auth::AuthStore, kv::JsonFileStore},
    config::Config,
    error::ApiError,
    web::{
        auth::{delete_account_handler, login_handler, logout_handler, signup_handler},
        chat::{decision_handler, message_handler, welcome_handler},
        rest::{
            get_profile_handler, get_savings_handler, goal_progress_handler,
            delete_profile_handler, reset_savings_handler, save_profile_handler,
        },
        state::AppState,
        require_auth, ApiDoc,
    },
};
use axum::{
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use craveshield_core::Assistant;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Open the Key-Value Store ---
    info!("Opening data store at {}", config.data_path.display());
    let store = Arc::new(JsonFileStore::open(&config.data_path).await?);

    // --- 3. Initialize Adapters and the Core Assistant ---
    let auth_store = Arc::new(AuthStore::new(store.clone()));
    let assistant = Arc::new(
        Assistant::new(store)
            .map_err(|e| ApiError::Internal(format!("correction patterns failed to compile: {e}")))?,
    );

    // --- 4. Build the Shared AppState ---
    let app_state = AppState {
        assistant,
        auth: auth_store.clone(),
        identity: auth_store,
        config: config.clone(),
    };

    let cors = CorsLayer::new()
        .allow_origin(
            config
                .cors_origin
                .parse::<HeaderValue>()
                .map_err(|e| ApiError::Internal(format!("invalid CORS_ORIGIN: {e}")))?,
        )
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT]);

    // --- 5. Create the Web Router ---
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/auth/signup", post(signup_handler))
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route("/auth/account", delete(delete_account_handler))
        .route("/chat/welcome", get(welcome_handler))
        .route("/chat/message", post(message_handler))
        .route("/chat/decision", post(decision_handler))
        .route(
            "/profile",
            get(get_profile_handler)
                .put(save_profile_handler)
                .delete(delete_profile_handler),
        )
        .route("/savings", get(get_savings_handler))
        .route("/savings/reset", post(reset_savings_handler))
        .route("/goals/progress", get(goal_progress_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Combine API routes
    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .with_state(app_state);

    // Merge the API router with the Swagger UI router for a complete application.
    let app = Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
