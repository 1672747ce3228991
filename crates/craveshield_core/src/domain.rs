//! crates/craveshield_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! These structs are independent of any storage backend or transport.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A healthier home-cooked substitute for a craved food.
///
/// `recipe` is an ordered sequence of instruction steps; the order is
/// meaningful and is rendered as a numbered list starting at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alternative {
    pub name: String,
    pub description: String,
    pub recipe: Vec<String>,
    pub calories: u32,
    pub prep_time: String,
}

/// One craved food item from the catalog, together with its substitute.
///
/// Catalog entries are immutable for the lifetime of the process. A
/// `Product` value handed back from the matcher may later be cloned and
/// overridden with user-supplied corrections, but the catalog itself never
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    pub calories: u32,
    pub cost: f64,
    pub currency: String,
    pub alternative: Alternative,
}

/// Per-identity accumulator of everything the user has saved so far.
///
/// Mutated exclusively through [`SavingsLedger::add_savings`] and
/// [`SavingsLedger::reset`]; the totals never decrease otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsLedger {
    pub total_money_saved: f64,
    pub total_calories_saved: i64,
    pub alternatives_chosen: u32,
    pub last_updated: DateTime<Utc>,
}

impl SavingsLedger {
    /// An all-zero ledger, used whenever no record exists for an identity.
    pub fn new() -> Self {
        Self {
            total_money_saved: 0.0,
            total_calories_saved: 0,
            alternatives_chosen: 0,
            last_updated: Utc::now(),
        }
    }

    /// Folds one decision's outcome into the running totals.
    ///
    /// The choice counter increments on every call, including zero-savings
    /// outcomes. Negative deltas are accepted but never produced by the
    /// decision accounting.
    pub fn add_savings(&mut self, money_saved: f64, calories_saved: i64) {
        self.total_money_saved += money_saved;
        self.total_calories_saved += calories_saved;
        self.alternatives_chosen += 1;
        self.last_updated = Utc::now();
    }

    /// Explicit reset-to-zero of all totals.
    pub fn reset(&mut self) {
        self.total_money_saved = 0.0;
        self.total_calories_saved = 0;
        self.alternatives_chosen = 0;
        self.last_updated = Utc::now();
    }
}

impl Default for SavingsLedger {
    fn default() -> Self {
        Self::new()
    }
}

/// Self-reported activity level, collected during profile setup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

/// What the user primarily wants out of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimaryGoal {
    WeightLoss,
    HealthyEating,
    SaveMoney,
    Both,
}

/// User-declared savings targets, all strictly positive once validated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserGoals {
    pub daily_calorie_target: f64,
    pub weekly_money_target: f64,
    pub monthly_calorie_target: f64,
    pub monthly_money_target: f64,
    pub personal_motivation: Option<String>,
}

/// User-declared targets and demographics. A user may have no profile at
/// all; that is a valid state and prompts profile setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub age: Option<u32>,
    pub activity_level: ActivityLevel,
    pub primary_goal: PrimaryGoal,
    pub goals: UserGoals,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// Validation failure raised when a profile is saved.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("name must not be empty")]
    EmptyName,
    #[error("{0} must be greater than zero")]
    NonPositiveTarget(&'static str),
}

impl UserProfile {
    /// Rejects profiles that would later make goal-progress division
    /// meaningless. A zero or negative target never reaches the progress
    /// computation.
    pub fn validate(&self) -> Result<(), ProfileError> {
        if self.name.trim().is_empty() {
            return Err(ProfileError::EmptyName);
        }
        let targets = [
            ("dailyCalorieTarget", self.goals.daily_calorie_target),
            ("weeklyMoneyTarget", self.goals.weekly_money_target),
            ("monthlyCalorieTarget", self.goals.monthly_calorie_target),
            ("monthlyMoneyTarget", self.goals.monthly_money_target),
        ];
        for (field, value) in targets {
            if value <= 0.0 {
                return Err(ProfileError::NonPositiveTarget(field));
            }
        }
        Ok(())
    }
}

// Represents a user - used throughout the app
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub last_login: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goals() -> UserGoals {
        UserGoals {
            daily_calorie_target: 500.0,
            weekly_money_target: 25.0,
            monthly_calorie_target: 15000.0,
            monthly_money_target: 100.0,
            personal_motivation: None,
        }
    }

    fn profile() -> UserProfile {
        UserProfile {
            name: "Sam".to_string(),
            age: Some(29),
            activity_level: ActivityLevel::ModeratelyActive,
            primary_goal: PrimaryGoal::Both,
            goals: goals(),
            created_at: Utc::now(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn ledger_accumulates_commutatively() {
        let deltas = [(6.99, 550_i64), (0.0, 0), (4.89, 230), (1.25, 95)];

        let mut forward = SavingsLedger::new();
        for (money, calories) in deltas {
            forward.add_savings(money, calories);
        }
        let mut backward = SavingsLedger::new();
        for (money, calories) in deltas.iter().rev() {
            backward.add_savings(*money, *calories);
        }

        assert_eq!(forward.alternatives_chosen, deltas.len() as u32);
        assert_eq!(forward.total_calories_saved, 875);
        assert!((forward.total_money_saved - 13.13).abs() < 1e-9);
        assert_eq!(forward.total_calories_saved, backward.total_calories_saved);
        assert!((forward.total_money_saved - backward.total_money_saved).abs() < 1e-9);
    }

    #[test]
    fn ledger_reset_zeroes_everything() {
        let mut ledger = SavingsLedger::new();
        ledger.add_savings(12.50, 700);
        ledger.reset();
        assert_eq!(ledger.total_money_saved, 0.0);
        assert_eq!(ledger.total_calories_saved, 0);
        assert_eq!(ledger.alternatives_chosen, 0);
    }

    #[test]
    fn ledger_serde_round_trip() {
        let mut ledger = SavingsLedger::new();
        ledger.add_savings(9.79, 410);
        let json = serde_json::to_string(&ledger).unwrap();
        let reloaded: SavingsLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, reloaded);
    }

    #[test]
    fn valid_profile_passes_validation() {
        assert_eq!(profile().validate(), Ok(()));
    }

    #[test]
    fn zero_target_is_rejected() {
        let mut p = profile();
        p.goals.weekly_money_target = 0.0;
        assert_eq!(
            p.validate(),
            Err(ProfileError::NonPositiveTarget("weeklyMoneyTarget"))
        );
    }

    #[test]
    fn empty_name_is_rejected() {
        let mut p = profile();
        p.name = "   ".to_string();
        assert_eq!(p.validate(), Err(ProfileError::EmptyName));
    }

    #[test]
    fn profile_serde_round_trip_keeps_optional_fields() {
        let mut p = profile();
        p.age = None;
        p.goals.personal_motivation = Some("fit into my old jeans".to_string());
        let json = serde_json::to_string(&p).unwrap();
        let reloaded: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(p, reloaded);
    }
}
