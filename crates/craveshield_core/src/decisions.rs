//! crates/craveshield_core/src/decisions.rs
//!
//! Turns the user's explicit decision about a matched product into a
//! confirmation message and the savings to credit. Pure computation; the
//! caller feeds the outcome into the ledger.

use serde::{Deserialize, Serialize};

use crate::domain::Product;
use crate::responder::INGREDIENT_COST_RATIO;

/// The closed set of decisions a user can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    /// Resisted the craving entirely.
    Resist,
    /// Cooked the suggested alternative.
    Alternative,
    /// Went with the original item anyway.
    Original,
}

impl Choice {
    /// Parses a wire value. Anything outside the closed set is `None`, which
    /// callers surface as a zero-effect restatement prompt that never
    /// touches the ledger.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "resist" => Some(Self::Resist),
            "alternative" => Some(Self::Alternative),
            "original" => Some(Self::Original),
            _ => None,
        }
    }
}

/// One decision's confirmation message and the savings it earned.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    pub message: String,
    pub calories_saved: i64,
    pub money_saved: f64,
}

/// Computes the outcome for a recognized choice.
///
/// `resist` credits the full product calories and cost; `alternative`
/// credits the calorie difference and 70% of the cost (homemade ingredients
/// are assumed to run 30% of the original's price); `original` credits
/// nothing but stays encouraging.
pub fn decision_response(choice: Choice, product: &Product) -> DecisionOutcome {
    let alternative = &product.alternative;
    match choice {
        Choice::Resist => DecisionOutcome {
            message: format!(
                "Amazing willpower! By resisting the {} craving completely, you've saved \
                 yourself {} calories and ${}. That's fantastic self-control! Your body and \
                 wallet will thank you.",
                product.name, product.calories, product.cost
            ),
            calories_saved: product.calories as i64,
            money_saved: product.cost,
        },
        Choice::Alternative => {
            let calories_saved = product.calories as i64 - alternative.calories as i64;
            let money_saved = product.cost * (1.0 - INGREDIENT_COST_RATIO);
            DecisionOutcome {
                message: format!(
                    "Great choice! By choosing the {} instead of {}, you've saved {} calories \
                     and ${:.2} (estimated ingredient cost). You're building healthier habits \
                     while still satisfying your craving!",
                    alternative.name, product.name, calories_saved, money_saved
                ),
                calories_saved,
                money_saved,
            }
        }
        Choice::Original => DecisionOutcome {
            message: format!(
                "I understand cravings can be tough to resist! While you chose the original {} \
                 this time, remember that every small step toward healthier choices counts. \
                 Next time, maybe try the {} - it's just as satisfying! Keep working toward \
                 your goals.",
                product.name, alternative.name
            ),
            calories_saved: 0,
            money_saved: 0.0,
        },
    }
}

/// The zero-effect fallback for an unrecognized choice value.
pub fn restate_choice_outcome() -> DecisionOutcome {
    DecisionOutcome {
        message: "I didn't quite understand your choice. Could you let me know what you decided \
                  to do?"
            .to_string(),
        calories_saved: 0,
        money_saved: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn big_mac() -> Product {
        Catalog::builtin().get("big mac").unwrap().clone()
    }

    #[test]
    fn resist_credits_everything() {
        let outcome = decision_response(Choice::Resist, &big_mac());
        assert_eq!(outcome.calories_saved, 550);
        assert_eq!(outcome.money_saved, 6.99);
        assert!(outcome.message.contains("Amazing willpower!"));
    }

    #[test]
    fn alternative_credits_the_difference() {
        let outcome = decision_response(Choice::Alternative, &big_mac());
        assert_eq!(outcome.calories_saved, 230);
        assert!((outcome.money_saved - 6.99 * 0.7).abs() < 1e-9);
        assert!(outcome.message.contains("Homemade Turkey Burger"));
    }

    #[test]
    fn original_credits_nothing_but_stays_kind() {
        let outcome = decision_response(Choice::Original, &big_mac());
        assert_eq!(outcome.calories_saved, 0);
        assert_eq!(outcome.money_saved, 0.0);
        assert!(outcome.message.contains("Next time"));
    }

    #[test]
    fn parse_accepts_only_the_closed_set() {
        assert_eq!(Choice::parse("resist"), Some(Choice::Resist));
        assert_eq!(Choice::parse(" Alternative "), Some(Choice::Alternative));
        assert_eq!(Choice::parse("original"), Some(Choice::Original));
        assert_eq!(Choice::parse("maybe"), None);
        assert_eq!(Choice::parse(""), None);
    }

    #[test]
    fn restate_outcome_is_zero_effect() {
        let outcome = restate_choice_outcome();
        assert_eq!(outcome.calories_saved, 0);
        assert_eq!(outcome.money_saved, 0.0);
    }
}
