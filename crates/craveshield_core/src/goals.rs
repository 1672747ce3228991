//! crates/craveshield_core/src/goals.rs
//!
//! Derives percentage-of-target figures from the savings ledger and the
//! profile's declared goals. Read-only; no side effects.

use serde::{Deserialize, Serialize};

use crate::domain::{SavingsLedger, UserGoals};

/// Progress of one metric against one target.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub current: f64,
    pub target: f64,
    /// Percent complete, capped at 100.
    pub progress: f64,
}

/// All four (metric, period) pairs the app tracks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressReport {
    pub daily_calories: GoalProgress,
    pub weekly_money: GoalProgress,
    pub monthly_calories: GoalProgress,
    pub monthly_money: GoalProgress,
}

/// One goal a user can achieve, addressed by (metric, period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    DailyCalories,
    WeeklyMoney,
    MonthlyCalories,
    MonthlyMoney,
}

fn metric(kind: GoalKind, ledger: &SavingsLedger, goals: &UserGoals) -> (f64, f64) {
    let calories = ledger.total_calories_saved as f64;
    let money = ledger.total_money_saved;
    match kind {
        GoalKind::DailyCalories => (calories, goals.daily_calorie_target),
        GoalKind::WeeklyMoney => (money, goals.weekly_money_target),
        GoalKind::MonthlyCalories => (calories, goals.monthly_calorie_target),
        GoalKind::MonthlyMoney => (money, goals.monthly_money_target),
    }
}

fn percent(current: f64, target: f64) -> f64 {
    // Profile validation keeps targets positive, but a record written before
    // validation existed could still carry a zero. Treat it as 0% rather
    // than dividing.
    if target <= 0.0 {
        return 0.0;
    }
    (current / target * 100.0).min(100.0)
}

fn progress(kind: GoalKind, ledger: &SavingsLedger, goals: &UserGoals) -> GoalProgress {
    let (current, target) = metric(kind, ledger, goals);
    GoalProgress {
        current,
        target,
        progress: percent(current, target),
    }
}

/// Computes the full progress report for one ledger against one set of
/// goals. Pure; calling it twice with the same inputs yields identical
/// figures.
pub fn progress_toward_goals(ledger: &SavingsLedger, goals: &UserGoals) -> GoalProgressReport {
    GoalProgressReport {
        daily_calories: progress(GoalKind::DailyCalories, ledger, goals),
        weekly_money: progress(GoalKind::WeeklyMoney, ledger, goals),
        monthly_calories: progress(GoalKind::MonthlyCalories, ledger, goals),
        monthly_money: progress(GoalKind::MonthlyMoney, ledger, goals),
    }
}

/// True once the ledger total has met or passed the target for `kind`.
pub fn is_goal_achieved(kind: GoalKind, ledger: &SavingsLedger, goals: &UserGoals) -> bool {
    let (current, target) = metric(kind, ledger, goals);
    current >= target
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

    fn ledger_with(money: f64, calories: i64) -> SavingsLedger {
        let mut ledger = SavingsLedger::new();
        ledger.add_savings(money, calories);
        ledger
    }

    #[test]
    fn reports_plain_percentages() {
        let report = progress_toward_goals(&ledger_with(12.50, 250), &goals());
        assert_eq!(report.daily_calories.progress, 50.0);
        assert_eq!(report.weekly_money.progress, 50.0);
        assert!((report.monthly_calories.progress - 250.0 / 15000.0 * 100.0).abs() < 1e-9);
        assert_eq!(report.monthly_money.current, 12.50);
    }

    #[test]
    fn progress_is_capped_at_one_hundred() {
        let report = progress_toward_goals(&ledger_with(500.0, 40000), &goals());
        assert_eq!(report.daily_calories.progress, 100.0);
        assert_eq!(report.weekly_money.progress, 100.0);
        assert_eq!(report.monthly_calories.progress, 100.0);
    }

    #[test]
    fn zero_target_reads_as_zero_percent() {
        let mut g = goals();
        g.weekly_money_target = 0.0;
        let report = progress_toward_goals(&ledger_with(10.0, 100), &g);
        assert_eq!(report.weekly_money.progress, 0.0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let ledger = ledger_with(7.75, 430);
        let g = goals();
        assert_eq!(progress_toward_goals(&ledger, &g), progress_toward_goals(&ledger, &g));
    }

    #[test]
    fn achievement_is_met_at_the_target() {
        let g = goals();
        assert!(is_goal_achieved(GoalKind::DailyCalories, &ledger_with(0.0, 500), &g));
        assert!(!is_goal_achieved(GoalKind::DailyCalories, &ledger_with(0.0, 499), &g));
        assert!(is_goal_achieved(GoalKind::WeeklyMoney, &ledger_with(25.0, 0), &g));
        assert!(!is_goal_achieved(GoalKind::MonthlyMoney, &ledger_with(25.0, 0), &g));
    }
}
