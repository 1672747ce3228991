//! crates/craveshield_core/src/matcher.rs
//!
//! Resolves free text to a catalog entry, and guesses at food words the
//! catalog does not know about.
//!
//! Matching is deliberately a case-insensitive substring test, not a
//! tokenized word-boundary test. An input containing a catalog key inside a
//! longer unrelated word will still match; that is accepted heuristic
//! behavior, not a defect.

use crate::catalog::Catalog;
use crate::domain::Product;

/// Words that suggest the user is talking about food at all.
const FOOD_KEYWORDS: &[&str] = &[
    "craving",
    "want",
    "eating",
    "hungry",
    "food",
    "taste",
    "delicious",
    "restaurant",
    "order",
    "delivery",
    "cook",
    "recipe",
    "meal",
    "snack",
    "breakfast",
    "lunch",
    "dinner",
    "dessert",
    "sweet",
    "savory",
];

/// Filler words discarded when hunting for an unknown food name.
const STOP_WORDS: &[&str] = &[
    "i", "am", "i'm", "i've", "i'd", "it's", "that's", "want", "need", "like", "love", "hate",
    "craving", "for", "some", "a", "an", "the", "really", "very", "so", "too", "just", "now",
    "today", "tonight", "this", "that", "these", "those", "and", "or", "but", "with", "without",
    "have", "had", "get", "got", "make", "eat", "eating",
];

/// Resolves free text to a catalog product.
///
/// First-hit-wins, in two passes: canonical keys in catalog order, then the
/// alias table in its order. Returns `None` for "no known product" - not an
/// error.
pub fn find_product<'a>(catalog: &'a Catalog, text: &str) -> Option<&'a Product> {
    let input = text.to_lowercase();

    for (key, product) in catalog.entries() {
        if input.contains(key) {
            return Some(product);
        }
    }

    for (alias, key) in catalog.aliases() {
        if input.contains(alias) {
            return catalog.get(key);
        }
    }

    None
}

/// Guesses which word in the input names a food the catalog does not know.
///
/// Only meaningful when [`find_product`] already returned `None`. If the
/// input carries no food context at all, returns `None` (the message is not
/// about food). Otherwise the first word surviving the stop-word and
/// food-keyword filters is taken as the guess.
pub fn detect_unknown_food(text: &str) -> Option<String> {
    let input = text.to_lowercase();

    let has_food_context = FOOD_KEYWORDS.iter().any(|keyword| input.contains(keyword));
    if !has_food_context {
        return None;
    }

    input
        .split_whitespace()
        .find(|word| {
            word.len() > 2 && !STOP_WORDS.contains(word) && !FOOD_KEYWORDS.contains(word)
        })
        .map(|word| word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_catalog_key_matches_itself() {
        let catalog = Catalog::builtin();
        for (key, product) in catalog.entries() {
            let matched = find_product(&catalog, key).expect("key should match");
            assert_eq!(matched.name, product.name);
        }
    }

    #[test]
    fn matches_key_inside_a_longer_sentence() {
        let catalog = Catalog::builtin();
        let product = find_product(&catalog, "I want a big mac and fries").unwrap();
        assert_eq!(product.name, "Big Mac");
    }

    #[test]
    fn matching_is_case_insensitive() {
        let catalog = Catalog::builtin();
        let product = find_product(&catalog, "SUSHI sounds great").unwrap();
        assert_eq!(product.name, "Sushi Roll (8 pieces)");
    }

    #[test]
    fn alias_resolves_to_canonical_entry() {
        let catalog = Catalog::builtin();
        let product = find_product(&catalog, "something from mcdonalds").unwrap();
        assert_eq!(product.name, "Big Mac");
    }

    #[test]
    fn direct_key_wins_over_alias() {
        // "fried chicken" is a canonical key; "chicken" alone is only an alias.
        let catalog = Catalog::builtin();
        let product = find_product(&catalog, "fried chicken tonight").unwrap();
        assert_eq!(product.name, "Fried Chicken (3 pieces)");
    }

    #[test]
    fn unknown_text_matches_nothing() {
        let catalog = Catalog::builtin();
        assert!(find_product(&catalog, "xyzzy-not-a-food").is_none());
    }

    #[test]
    fn empty_and_whitespace_input_match_nothing() {
        let catalog = Catalog::builtin();
        assert!(find_product(&catalog, "").is_none());
        assert!(find_product(&catalog, "   ").is_none());
    }

    #[test]
    fn unknown_food_guess_survives_filtering() {
        assert_eq!(
            detect_unknown_food("I'm craving quizzlewich right now"),
            Some("quizzlewich".to_string())
        );
    }

    #[test]
    fn no_food_context_means_no_guess() {
        assert_eq!(detect_unknown_food("the weather is lovely"), None);
    }

    #[test]
    fn food_context_without_a_candidate_word_yields_none() {
        // Every word is either short, a stop word, or a food keyword.
        assert_eq!(detect_unknown_food("i am so hungry now"), None);
    }

    #[test]
    fn empty_input_yields_none() {
        assert_eq!(detect_unknown_food(""), None);
    }
}
