//! crates/craveshield_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of specific external implementations like storage or auth.

use async_trait::async_trait;
use uuid::Uuid;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., filesystem, auth).
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

/// A generic string-keyed store for JSON-serialized records.
///
/// This is the only persistence contract the core knows about. Profile and
/// ledger records are stored under `craveshield-<namespace>-<identity>` keys;
/// the adapter is responsible for the atomicity of its own writes.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> PortResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> PortResult<()>;
    async fn remove(&self, key: &str) -> PortResult<()>;
}

/// Resolves a session token to the identity it belongs to.
///
/// Returns `Ok(None)` for an unknown or expired token; `Err` is reserved for
/// failures of the underlying store.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn identity_for_token(&self, token: &str) -> PortResult<Option<Uuid>>;
}
