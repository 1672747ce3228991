//! crates/craveshield_core/src/responder.rs
//!
//! Pure text construction from already-resolved data. Nothing in here does
//! matching, parsing, or persistence; callers hand in the product or guess
//! and get display text back.

use std::fmt::Write;

use crate::corrections::Correction;
use crate::domain::{PrimaryGoal, Product, UserProfile};

/// Fraction of the original price assumed to cover the home-cooked
/// ingredients.
pub const INGREDIENT_COST_RATIO: f64 = 0.3;

fn numbered_recipe(steps: &[String]) -> String {
    let mut out = String::new();
    for (index, step) in steps.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let _ = write!(out, "{}. {}", index + 1, step);
    }
    out
}

/// Renders the full product card: nutritional info, the alternative, the
/// calorie comparison, and the numbered recipe, ending with a decision
/// prompt.
pub fn product_response(product: &Product) -> String {
    let alternative = &product.alternative;
    format!(
        "{name} is approximately {calories} kcal and costs ${cost} {currency} - correct me if I'm wrong! I have a better alternative home cooking idea!\n\n\
        **{alt_name}**\n\
        {alt_description}\n\n\
        **Nutritional Comparison:**\n\
        - Original: {calories} kcal\n\
        - Alternative: {alt_calories} kcal ({saved} kcal saved!)\n\n\
        **Prep Time:** {prep_time}\n\n\
        **Recipe:**\n\
        {recipe}\n\n\
        This homemade alternative will satisfy your craving while being much healthier for you!\n\n\
        What would you like to do?",
        name = product.name,
        calories = product.calories,
        cost = product.cost,
        currency = product.currency,
        alt_name = alternative.name,
        alt_description = alternative.description,
        alt_calories = alternative.calories,
        saved = product.calories as i64 - alternative.calories as i64,
        prep_time = alternative.prep_time,
        recipe = numbered_recipe(&alternative.recipe),
    )
}

/// Fixed clarification template for a food word the catalog does not know.
/// Performs no catalog lookup.
pub fn clarification_response(unknown_food: &str) -> String {
    format!(
        "I noticed you mentioned \"{unknown_food}\" but I don't have specific nutritional information for that food in my database yet. \n\n\
        Could you help me understand what type of food this is? For example:\n\
        - Is it a snack, main dish, or dessert?\n\
        - What are the main ingredients?\n\
        - Is it similar to anything I might know (like pizza, pasta, cookies, etc.)?\n\n\
        This will help me give you better recommendations and alternatives! In the meantime, I can provide general healthy eating advice if you'd like."
    )
}

/// Builds the corrected product (partial-override merge: only the supplied
/// fields change) and renders the recalculated comparison. The returned
/// product must be used for any subsequent decision accounting.
pub fn corrected_response(original: &Product, correction: &Correction) -> (String, Product) {
    let mut corrected = original.clone();
    if let Some(calories) = correction.calories {
        corrected.calories = calories;
    }
    if let Some(price) = correction.price {
        corrected.cost = price;
    }

    let alternative = &corrected.alternative;
    let calories_saved = corrected.calories as i64 - alternative.calories as i64;
    let estimated_ingredient_cost = corrected.cost * INGREDIENT_COST_RATIO;
    let money_saved = corrected.cost - estimated_ingredient_cost;

    let mut acknowledgment = String::from("Thanks for the correction! ");
    match (correction.calories, correction.price) {
        (Some(_), Some(_)) => {
            let _ = write!(
                acknowledgment,
                "You're right - {} is {} kcal and costs ${}. ",
                corrected.name, corrected.calories, corrected.cost
            );
        }
        (Some(_), None) => {
            let _ = write!(
                acknowledgment,
                "You're right - {} is {} kcal. ",
                corrected.name, corrected.calories
            );
        }
        (None, Some(_)) => {
            let _ = write!(
                acknowledgment,
                "You're right - {} costs ${}. ",
                corrected.name, corrected.cost
            );
        }
        (None, None) => {}
    }

    let response = format!(
        "{acknowledgment}Let me recalculate the benefits of the healthy alternative:\n\n\
        **{alt_name}**\n\
        {alt_description}\n\n\
        **Updated Nutritional Comparison:**\n\
        - Original: {calories} kcal\n\
        - Alternative: {alt_calories} kcal ({calories_saved} kcal saved!)\n\n\
        **Updated Cost Comparison:**\n\
        - Original: ${cost}\n\
        - Alternative: ~${estimated_ingredient_cost:.2} (estimated ingredient cost)\n\
        - Money saved: ~${money_saved:.2}\n\n\
        **Prep Time:** {prep_time}\n\n\
        **Recipe:**\n\
        {recipe}\n\n\
        With these corrected numbers, the homemade alternative is even more beneficial! What would you like to do?",
        alt_name = alternative.name,
        alt_description = alternative.description,
        calories = corrected.calories,
        alt_calories = alternative.calories,
        cost = corrected.cost,
        prep_time = alternative.prep_time,
        recipe = numbered_recipe(&alternative.recipe),
    );

    (response, corrected)
}

/// Keyword-routed general support for messages that matched no product and
/// produced no unknown-food guess.
pub fn general_response(text: &str) -> String {
    let input = text.to_lowercase();

    if input.contains("hungry") || input.contains("craving") {
        return "I understand you're experiencing cravings. Can you tell me what specific food \
                you're craving? I can help you find healthier alternatives with recipes and \
                nutritional information!"
            .to_string();
    }

    if input.contains("sweet") || input.contains("sugar") {
        return "Sweet cravings are very common! Try mentioning a specific sweet treat you're \
                craving (like 'chocolate chip cookies' or 'ice cream') and I'll give you the \
                nutritional info plus a healthier homemade alternative."
            .to_string();
    }

    if input.contains("fast food") || input.contains("junk food") {
        return "Fast food cravings can be tough! Tell me exactly what you're craving (like \
                'Big Mac' or 'pizza') and I'll show you how many calories it has, the cost, and \
                give you a delicious homemade alternative recipe."
            .to_string();
    }

    if input.contains("help") || input.contains("how") {
        return "I'm here to help you make healthier choices! Just tell me what specific food \
                you're craving, and I'll provide:\n\n- Calorie and cost information\n- A \
                healthier homemade alternative\n- Step-by-step recipe instructions\n\nTry saying \
                something like 'I'm craving chocolate chip cookies' or 'I want pizza'!"
            .to_string();
    }

    "Thanks for sharing! I'm here to help you manage your cravings with healthier alternatives. \
     Try mentioning a specific food you're craving (like cookies, pizza, burgers, etc.) and I'll \
     give you nutritional info plus a homemade recipe alternative!"
        .to_string()
}

/// Time-of-day greeting for a user with a profile.
pub fn greeting(profile: &UserProfile, hour: u32) -> String {
    let time_greeting = if hour < 12 {
        "Good morning"
    } else if hour < 17 {
        "Good afternoon"
    } else {
        "Good evening"
    };
    format!("{}, {}!", time_greeting, profile.name)
}

/// Per-goal motivational line, overridden by the user's own motivation text
/// when one is set.
pub fn motivational_message(profile: &UserProfile) -> String {
    if let Some(motivation) = profile
        .goals
        .personal_motivation
        .as_deref()
        .filter(|m| !m.trim().is_empty())
    {
        return format!("Remember: {motivation}");
    }

    match profile.primary_goal {
        PrimaryGoal::WeightLoss => {
            "Every healthy choice brings you closer to your weight loss goals!".to_string()
        }
        PrimaryGoal::HealthyEating => {
            "Building healthy eating habits one choice at a time!".to_string()
        }
        PrimaryGoal::SaveMoney => {
            "Smart choices today mean more money in your pocket tomorrow!".to_string()
        }
        PrimaryGoal::Both => {
            "You're improving your health AND saving money - that's a win-win!".to_string()
        }
    }
}

/// Opening message for a conversation: greeting plus motivation for users
/// with a profile, a setup prompt otherwise.
pub fn welcome_message(user_name: &str, profile: Option<&UserProfile>, hour: u32) -> String {
    match profile {
        Some(profile) => format!("{} {}", greeting(profile, hour), motivational_message(profile)),
        None => format!(
            "Welcome {user_name}! Let's set up your profile to personalize your CraveShield \
             experience and start tracking your progress."
        ),
    }
}
