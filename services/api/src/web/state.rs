//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use craveshield_core::ports::IdentityProvider;
use craveshield_core::Assistant;

use crate::adapters::auth::AuthStore;
use crate::config::Config;

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub auth: Arc<AuthStore>,
    pub identity: Arc<dyn IdentityProvider>,
    pub config: Arc<Config>,
}
