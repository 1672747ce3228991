//! crates/craveshield_core/src/assistant.rs
//!
//! The conversation orchestrator. Wires the matcher, correction parser,
//! response generation, and decision accounting together, and owns the two
//! pieces of state the core contract describes: the single-slot pending
//! decision per identity (in-memory only) and the persisted per-identity
//! ledger and profile records behind the `KeyValueStore` port.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Timelike, Utc};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::Catalog;
use crate::corrections::CorrectionParser;
use crate::decisions::{self, Choice};
use crate::domain::{Product, ProfileError, SavingsLedger, UserProfile};
use crate::goals::{self, GoalProgressReport};
use crate::matcher;
use crate::ports::{KeyValueStore, PortError, PortResult};
use crate::responder;

/// Errors surfaced by assistant operations that cannot be absorbed into a
/// conversational reply.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error(transparent)]
    Port(#[from] PortError),
}

/// The reply to one submitted message.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub text: String,
    /// True when a matched product is now awaiting the user's decision.
    pub awaiting_decision: bool,
}

/// The reply to one submitted decision, including the ledger as it stands
/// after accounting (absent when nothing was recorded).
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionReply {
    pub message: String,
    pub calories_saved: i64,
    pub money_saved: f64,
    pub ledger: Option<SavingsLedger>,
}

/// Shared, identity-scoped conversational core.
///
/// All methods take the resolved identity explicitly; session-token
/// resolution belongs to the `IdentityProvider` port at the transport
/// boundary.
pub struct Assistant {
    catalog: Catalog,
    parser: CorrectionParser,
    store: Arc<dyn KeyValueStore>,
    // One pending product per identity, overwritten or cleared on every new
    // question and cleared when a decision is recorded. Never persisted.
    pending: Mutex<HashMap<Uuid, Product>>,
}

impl Assistant {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Result<Self, regex::Error> {
        Ok(Self {
            catalog: Catalog::builtin(),
            parser: CorrectionParser::new()?,
            store,
            pending: Mutex::new(HashMap::new()),
        })
    }

    fn savings_key(user_id: Uuid) -> String {
        format!("craveshield-savings-{user_id}")
    }

    fn profile_key(user_id: Uuid) -> String {
        format!("craveshield-profile-{user_id}")
    }

    /// Runs one free-text message through the matching pipeline.
    ///
    /// While a decision is pending, a detected correction re-renders the
    /// comparison and replaces the pending product with the corrected one,
    /// so the eventual decision is accounted against corrected numbers.
    /// Any other message clears the pending slot before matching.
    pub async fn submit_message(&self, user_id: Uuid, text: &str) -> Reply {
        let mut pending = self.pending.lock().await;

        if let Some(product) = pending.get(&user_id) {
            let correction = self.parser.detect(text);
            if correction.detected() {
                debug!(%user_id, ?correction, "applying correction to pending product");
                let (text, corrected) = responder::corrected_response(product, &correction);
                pending.insert(user_id, corrected);
                return Reply {
                    text,
                    awaiting_decision: true,
                };
            }
        }

        // A new question always clears the previous pending product.
        pending.remove(&user_id);

        if let Some(product) = matcher::find_product(&self.catalog, text) {
            let reply = responder::product_response(product);
            pending.insert(user_id, product.clone());
            return Reply {
                text: reply,
                awaiting_decision: true,
            };
        }
        drop(pending);

        if let Some(guess) = matcher::detect_unknown_food(text) {
            return Reply {
                text: responder::clarification_response(&guess),
                awaiting_decision: false,
            };
        }

        Reply {
            text: responder::general_response(text),
            awaiting_decision: false,
        }
    }

    /// Records the user's decision about the pending product.
    ///
    /// With no pending product, or with a value outside the closed choice
    /// set, the reply is a clarifying message and the ledger is untouched.
    /// Storage failures while persisting are logged, not surfaced; the
    /// in-memory accounting still stands for the reply.
    pub async fn submit_decision(&self, user_id: Uuid, choice: &str) -> DecisionReply {
        let product = self.pending.lock().await.get(&user_id).cloned();
        let Some(product) = product else {
            return DecisionReply {
                message: "There's no craving waiting on a decision right now. Tell me what \
                          you're craving first!"
                    .to_string(),
                calories_saved: 0,
                money_saved: 0.0,
                ledger: None,
            };
        };

        let Some(choice) = Choice::parse(choice) else {
            // Unrecognized value: ask the user to restate, keep the pending
            // product so they can.
            let outcome = decisions::restate_choice_outcome();
            return DecisionReply {
                message: outcome.message,
                calories_saved: 0,
                money_saved: 0.0,
                ledger: None,
            };
        };

        let outcome = decisions::decision_response(choice, &product);

        let mut ledger = self.savings(user_id).await;
        ledger.add_savings(outcome.money_saved, outcome.calories_saved);
        self.persist(&Self::savings_key(user_id), &ledger).await;

        self.pending.lock().await.remove(&user_id);

        DecisionReply {
            message: outcome.message,
            calories_saved: outcome.calories_saved,
            money_saved: outcome.money_saved,
            ledger: Some(ledger),
        }
    }

    /// The user's ledger, falling back to all-zero defaults when no record
    /// exists or the stored record cannot be read.
    pub async fn savings(&self, user_id: Uuid) -> SavingsLedger {
        self.load(&Self::savings_key(user_id))
            .await
            .unwrap_or_default()
    }

    /// Resets the ledger to zero and persists the reset.
    pub async fn reset_savings(&self, user_id: Uuid) -> SavingsLedger {
        let mut ledger = self.savings(user_id).await;
        ledger.reset();
        self.persist(&Self::savings_key(user_id), &ledger).await;
        ledger
    }

    /// The user's profile, if one has been saved.
    pub async fn profile(&self, user_id: Uuid) -> Option<UserProfile> {
        self.load(&Self::profile_key(user_id)).await
    }

    /// Validates and saves a profile, stamping `last_updated`.
    pub async fn save_profile(
        &self,
        user_id: Uuid,
        mut profile: UserProfile,
    ) -> Result<UserProfile, AssistantError> {
        profile.validate()?;
        profile.last_updated = Utc::now();
        let json = serde_json::to_string(&profile)
            .map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store.set(&Self::profile_key(user_id), &json).await?;
        Ok(profile)
    }

    pub async fn delete_profile(&self, user_id: Uuid) -> PortResult<()> {
        self.store.remove(&Self::profile_key(user_id)).await
    }

    /// Goal progress for users with a profile; `None` without one.
    pub async fn goal_progress(&self, user_id: Uuid) -> Option<GoalProgressReport> {
        let profile = self.profile(user_id).await?;
        let ledger = self.savings(user_id).await;
        Some(goals::progress_toward_goals(&ledger, &profile.goals))
    }

    /// The conversation opener for this user, profile-aware.
    pub async fn welcome(&self, user_id: Uuid, user_name: &str) -> String {
        let profile = self.profile(user_id).await;
        responder::welcome_message(user_name, profile.as_ref(), Utc::now().hour())
    }

    async fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.store.get(key).await {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(key, error = %e, "storage read failed, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "stored record is malformed, using defaults");
                None
            }
        }
    }

    async fn persist<T: Serialize>(&self, key: &str, value: &T) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                warn!(key, error = %e, "failed to serialize record");
                return;
            }
        };
        if let Err(e) = self.store.set(key, &json).await {
            warn!(key, error = %e, "storage write failed");
        }
    }
}
