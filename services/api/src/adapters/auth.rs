//! services/api/src/adapters/auth.rs
//!
//! Account and session management over the key-value store, playing the
//! role of the identity collaborator. Passwords are argon2-hashed; session
//! tokens live for 30 days. Implements the core's `IdentityProvider` port
//! so the auth middleware stays decoupled from this concrete store.

use std::collections::HashMap;
use std::sync::Arc;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use craveshield_core::domain::User;
use craveshield_core::ports::{IdentityProvider, KeyValueStore, PortError, PortResult};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

const USERS_KEY: &str = "craveshield-users";
const SESSIONS_KEY: &str = "craveshield-auth-sessions";

/// How long a login session stays valid.
pub const SESSION_TTL_DAYS: i64 = 30;

const MIN_PASSWORD_LEN: usize = 6;

/// Errors surfaced by account operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("User already exists with this email")]
    EmailTaken,
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("Password must be at least {MIN_PASSWORD_LEN} characters")]
    WeakPassword,
    #[error("Password hashing failed: {0}")]
    Hash(String),
    #[error(transparent)]
    Port(#[from] PortError),
}

//=========================================================================================
// Stored record shapes
//=========================================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredUser {
    id: Uuid,
    email: String,
    name: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    last_login: DateTime<Utc>,
}

impl StoredUser {
    fn to_domain(&self) -> User {
        User {
            id: self.id,
            email: self.email.clone(),
            name: self.name.clone(),
            created_at: self.created_at,
            last_login: self.last_login,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredSession {
    user_id: Uuid,
    expires_at: DateTime<Utc>,
}

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// Account registry and session table, both kept as JSON maps in the
/// key-value store.
pub struct AuthStore {
    store: Arc<dyn KeyValueStore>,
}

impl AuthStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn load_map<T: for<'de> Deserialize<'de>>(
        &self,
        key: &str,
    ) -> PortResult<HashMap<String, T>> {
        let Some(raw) = self.store.get(key).await? else {
            return Ok(HashMap::new());
        };
        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                warn!(key, error = %e, "stored map is malformed, starting empty");
                Ok(HashMap::new())
            }
        }
    }

    async fn save_map<T: Serialize>(&self, key: &str, map: &HashMap<String, T>) -> PortResult<()> {
        let json =
            serde_json::to_string(map).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store.set(key, &json).await
    }

    fn hash_password(password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hash(e.to_string()))
    }

    fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AuthError> {
        let parsed = PasswordHash::new(stored_hash).map_err(|e| AuthError::Hash(e.to_string()))?;
        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }

    /// Creates a new account. Emails are unique, compared case-insensitively.
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User, AuthError> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }

        let email = email.trim().to_lowercase();
        let mut users: HashMap<String, StoredUser> = self.load_map(USERS_KEY).await?;
        if users.values().any(|u| u.email == email) {
            return Err(AuthError::EmailTaken);
        }

        let now = Utc::now();
        let user = StoredUser {
            id: Uuid::new_v4(),
            email,
            name: name.trim().to_string(),
            password_hash: Self::hash_password(password)?,
            created_at: now,
            last_login: now,
        };
        let domain = user.to_domain();
        users.insert(user.id.to_string(), user);
        self.save_map(USERS_KEY, &users).await?;
        Ok(domain)
    }

    /// Verifies credentials and stamps `last_login`.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let email = email.trim().to_lowercase();
        let mut users: HashMap<String, StoredUser> = self.load_map(USERS_KEY).await?;

        let Some(user) = users.values_mut().find(|u| u.email == email) else {
            return Err(AuthError::InvalidCredentials);
        };
        if !Self::verify_password(password, &user.password_hash)? {
            return Err(AuthError::InvalidCredentials);
        }

        user.last_login = Utc::now();
        let domain = user.to_domain();
        self.save_map(USERS_KEY, &users).await?;
        Ok(domain)
    }

    /// Opens a new session for the user and returns its token.
    pub async fn create_session(&self, user_id: Uuid) -> PortResult<String> {
        let token = Uuid::new_v4().to_string();
        let mut sessions: HashMap<String, StoredSession> = self.load_map(SESSIONS_KEY).await?;
        sessions.insert(
            token.clone(),
            StoredSession {
                user_id,
                expires_at: Utc::now() + Duration::days(SESSION_TTL_DAYS),
            },
        );
        self.save_map(SESSIONS_KEY, &sessions).await?;
        Ok(token)
    }

    pub async fn delete_session(&self, token: &str) -> PortResult<()> {
        let mut sessions: HashMap<String, StoredSession> = self.load_map(SESSIONS_KEY).await?;
        sessions.remove(token);
        self.save_map(SESSIONS_KEY, &sessions).await
    }

    /// The user record behind an id, if any.
    pub async fn user(&self, user_id: Uuid) -> PortResult<Option<User>> {
        let users: HashMap<String, StoredUser> = self.load_map(USERS_KEY).await?;
        Ok(users.get(&user_id.to_string()).map(StoredUser::to_domain))
    }

    /// Removes the account and every per-user record it owns: sessions,
    /// profile, and savings.
    pub async fn delete_account(&self, user_id: Uuid) -> PortResult<()> {
        let mut users: HashMap<String, StoredUser> = self.load_map(USERS_KEY).await?;
        users.remove(&user_id.to_string());
        self.save_map(USERS_KEY, &users).await?;

        let mut sessions: HashMap<String, StoredSession> = self.load_map(SESSIONS_KEY).await?;
        sessions.retain(|_, s| s.user_id != user_id);
        self.save_map(SESSIONS_KEY, &sessions).await?;

        self.store
            .remove(&format!("craveshield-profile-{user_id}"))
            .await?;
        self.store
            .remove(&format!("craveshield-savings-{user_id}"))
            .await
    }
}

#[async_trait]
impl IdentityProvider for AuthStore {
    /// Resolves a session token, pruning it if expired.
    async fn identity_for_token(&self, token: &str) -> PortResult<Option<Uuid>> {
        let mut sessions: HashMap<String, StoredSession> = self.load_map(SESSIONS_KEY).await?;
        let Some(session) = sessions.get(token) else {
            return Ok(None);
        };
        if session.expires_at < Utc::now() {
            sessions.remove(token);
            self.save_map(SESSIONS_KEY, &sessions).await?;
            return Ok(None);
        }
        Ok(Some(session.user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::kv::MemoryStore;

    fn auth() -> AuthStore {
        AuthStore::new(Arc::new(MemoryStore::default()))
    }

    #[tokio::test]
    async fn register_then_login() {
        let auth = auth();
        let user = auth
            .register("Dana@Example.com", "Dana", "hunter22")
            .await
            .unwrap();
        assert_eq!(user.email, "dana@example.com");

        let logged_in = auth.login("dana@example.com", "hunter22").await.unwrap();
        assert_eq!(logged_in.id, user.id);
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let auth = auth();
        auth.register("a@b.com", "A", "secretpw").await.unwrap();
        let err = auth.register("A@B.com", "A2", "secretpw").await.unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn short_password_is_rejected() {
        let err = auth().register("a@b.com", "A", "123").await.unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword));
    }

    #[tokio::test]
    async fn wrong_password_is_rejected() {
        let auth = auth();
        auth.register("a@b.com", "A", "secretpw").await.unwrap();
        let err = auth.login("a@b.com", "not-it-at-all").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[tokio::test]
    async fn sessions_resolve_until_deleted() {
        let auth = auth();
        let user = auth.register("a@b.com", "A", "secretpw").await.unwrap();
        let token = auth.create_session(user.id).await.unwrap();

        assert_eq!(auth.identity_for_token(&token).await.unwrap(), Some(user.id));

        auth.delete_session(&token).await.unwrap();
        assert_eq!(auth.identity_for_token(&token).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_account_removes_all_user_records() {
        let store = Arc::new(MemoryStore::default());
        let auth = AuthStore::new(store.clone());
        let user = auth.register("a@b.com", "A", "secretpw").await.unwrap();
        let token = auth.create_session(user.id).await.unwrap();

        let savings_key = format!("craveshield-savings-{}", user.id);
        store.set(&savings_key, "{}").await.unwrap();

        auth.delete_account(user.id).await.unwrap();
        assert!(auth.user(user.id).await.unwrap().is_none());
        assert_eq!(auth.identity_for_token(&token).await.unwrap(), None);
        assert_eq!(store.get(&savings_key).await.unwrap(), None);
    }
}
