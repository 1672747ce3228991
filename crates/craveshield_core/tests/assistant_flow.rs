//! End-to-end conversation flows driven through an in-memory key-value
//! store fake: match, correct, decide, and watch the ledger.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use chrono::Utc;
use craveshield_core::ports::{KeyValueStore, PortResult};
use craveshield_core::{
    ActivityLevel, Assistant, AssistantError, PrimaryGoal, ProfileError, UserGoals, UserProfile,
};

#[derive(Default)]
struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> PortResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> PortResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> PortResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

fn assistant() -> (Assistant, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::default());
    let assistant = Assistant::new(store.clone()).expect("built-in patterns compile");
    (assistant, store)
}

#[tokio::test]
async fn match_then_resist_credits_full_product() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    let reply = assistant.submit_message(user, "I want a big mac and fries").await;
    assert!(reply.awaiting_decision);
    assert!(reply.text.contains("Big Mac"));

    let decision = assistant.submit_decision(user, "resist").await;
    assert_eq!(decision.calories_saved, 550);
    assert_eq!(decision.money_saved, 6.99);

    let ledger = decision.ledger.expect("decision was recorded");
    assert_eq!(ledger.total_calories_saved, 550);
    assert_eq!(ledger.alternatives_chosen, 1);
}

#[tokio::test]
async fn correction_persists_onto_the_pending_decision() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    assistant.submit_message(user, "craving a big mac").await;
    let reply = assistant
        .submit_message(user, "actually it's 700 calories")
        .await;
    assert!(reply.awaiting_decision);
    assert!(reply.text.contains("700 kcal"));

    // The resist credit now uses the corrected calorie count.
    let decision = assistant.submit_decision(user, "resist").await;
    assert_eq!(decision.calories_saved, 700);
}

#[tokio::test]
async fn a_new_question_clears_the_pending_product() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    assistant.submit_message(user, "I want pizza").await;
    let reply = assistant.submit_message(user, "never mind, hello!").await;
    assert!(!reply.awaiting_decision);

    let decision = assistant.submit_decision(user, "resist").await;
    assert!(decision.ledger.is_none());
    assert_eq!(assistant.savings(user).await.alternatives_chosen, 0);
}

#[tokio::test]
async fn invalid_choice_keeps_ledger_and_pending_untouched() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    assistant.submit_message(user, "I want pizza").await;
    let decision = assistant.submit_decision(user, "maybe later").await;
    assert!(decision.message.contains("didn't quite understand"));
    assert!(decision.ledger.is_none());
    assert_eq!(assistant.savings(user).await.alternatives_chosen, 0);

    // The pending product survived the bad value, so a real decision still
    // lands.
    let decision = assistant.submit_decision(user, "alternative").await;
    assert_eq!(decision.calories_saved, 220);
    assert_eq!(assistant.savings(user).await.alternatives_chosen, 1);
}

#[tokio::test]
async fn choosing_original_still_counts_the_decision() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    assistant.submit_message(user, "sushi please").await;
    let decision = assistant.submit_decision(user, "original").await;
    assert_eq!(decision.calories_saved, 0);
    assert_eq!(decision.money_saved, 0.0);

    let ledger = decision.ledger.unwrap();
    assert_eq!(ledger.total_calories_saved, 0);
    assert_eq!(ledger.alternatives_chosen, 1);
}

#[tokio::test]
async fn unknown_food_asks_for_clarification() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    let reply = assistant
        .submit_message(user, "I'm craving quizzlewich right now")
        .await;
    assert!(!reply.awaiting_decision);
    assert!(reply.text.contains("\"quizzlewich\""));
}

#[tokio::test]
async fn non_food_chatter_gets_general_support() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    let reply = assistant.submit_message(user, "nice weather today").await;
    assert!(!reply.awaiting_decision);
    assert!(reply.text.starts_with("Thanks for sharing!"));
}

#[tokio::test]
async fn ledger_survives_a_restart_through_the_store() {
    let (assistant, store) = assistant();
    let user = Uuid::new_v4();

    assistant.submit_message(user, "I want tacos").await;
    assistant.submit_decision(user, "alternative").await;
    let before = assistant.savings(user).await;

    // A fresh assistant over the same store sees the same ledger.
    let reloaded = Assistant::new(store).unwrap();
    let after = reloaded.savings(user).await;
    assert_eq!(before, after);
    assert_eq!(after.total_calories_saved, 240);
}

#[tokio::test]
async fn ledgers_are_scoped_per_identity() {
    let (assistant, _) = assistant();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    assistant.submit_message(alice, "I want ramen").await;
    assistant.submit_decision(alice, "resist").await;

    assert_eq!(assistant.savings(alice).await.total_calories_saved, 380);
    assert_eq!(assistant.savings(bob).await.total_calories_saved, 0);
}

fn sample_profile() -> UserProfile {
    UserProfile {
        name: "Sam".to_string(),
        age: Some(34),
        activity_level: ActivityLevel::LightlyActive,
        primary_goal: PrimaryGoal::SaveMoney,
        goals: UserGoals {
            daily_calorie_target: 500.0,
            weekly_money_target: 25.0,
            monthly_calorie_target: 15000.0,
            monthly_money_target: 100.0,
            personal_motivation: None,
        },
        created_at: Utc::now(),
        last_updated: Utc::now(),
    }
}

#[tokio::test]
async fn profile_round_trips_through_the_store() {
    let (assistant, store) = assistant();
    let user = Uuid::new_v4();

    let saved = assistant.save_profile(user, sample_profile()).await.unwrap();

    let reloaded = Assistant::new(store).unwrap();
    let loaded = reloaded.profile(user).await.expect("profile exists");
    assert_eq!(saved, loaded);
}

#[tokio::test]
async fn invalid_profile_is_rejected_at_save() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    let mut profile = sample_profile();
    profile.goals.monthly_money_target = -5.0;
    let err = assistant.save_profile(user, profile).await.unwrap_err();
    assert!(matches!(
        err,
        AssistantError::Profile(ProfileError::NonPositiveTarget("monthlyMoneyTarget"))
    ));
    assert!(assistant.profile(user).await.is_none());
}

#[tokio::test]
async fn goal_progress_requires_a_profile() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();
    assert!(assistant.goal_progress(user).await.is_none());

    assistant.save_profile(user, sample_profile()).await.unwrap();
    assistant.submit_message(user, "I want a big mac").await;
    assistant.submit_decision(user, "resist").await;

    let report = assistant.goal_progress(user).await.unwrap();
    assert_eq!(report.daily_calories.progress, 100.0);
    assert!((report.weekly_money.progress - 6.99 / 25.0 * 100.0).abs() < 1e-9);
}

#[tokio::test]
async fn reset_returns_the_ledger_to_zero() {
    let (assistant, _) = assistant();
    let user = Uuid::new_v4();

    assistant.submit_message(user, "donuts!").await;
    assistant.submit_decision(user, "resist").await;
    let ledger = assistant.reset_savings(user).await;
    assert_eq!(ledger.total_money_saved, 0.0);
    assert_eq!(ledger.total_calories_saved, 0);
    assert_eq!(ledger.alternatives_chosen, 0);

    // The reset is persisted, not just in the reply.
    assert_eq!(assistant.savings(user).await.alternatives_chosen, 0);
}
