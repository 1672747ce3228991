//! crates/craveshield_core/src/corrections.rs
//!
//! Extracts user-asserted calorie and price corrections from free text.
//!
//! The parser only activates when a correction-signal keyword is present.
//! Once active, an ordered list of compiled patterns is evaluated with
//! first-match-wins semantics, independently for calories and for price.

use regex::Regex;

/// Correction-signal keywords. One of these must appear (as a substring)
/// before any numeric extraction is attempted.
const CORRECTION_KEYWORDS: &[&str] = &[
    "actually",
    "wrong",
    "incorrect",
    "more like",
    "really",
    "costs more",
    "higher",
    "lower",
    "expensive",
    "cheaper",
    "correction",
    "correct",
];

const CALORIE_PATTERNS: &[&str] = &[
    r"actually.*?(\d+)\s*(?:kcal|cal|calorie)",
    r"it'?s.*?(\d+)\s*(?:kcal|cal|calorie)",
    r"more like.*?(\d+)\s*(?:kcal|cal|calorie)",
    r"around.*?(\d+)\s*(?:kcal|cal|calorie)",
    r"about.*?(\d+)\s*(?:kcal|cal|calorie)",
    r"(\d+)\s*(?:kcal|cal|calorie).*?(?:actually|really|more)",
];

const PRICE_PATTERNS: &[&str] = &[
    r"actually.*?\$?(\d+(?:\.\d{2})?)",
    r"it'?s.*?\$?(\d+(?:\.\d{2})?)",
    r"more like.*?\$?(\d+(?:\.\d{2})?)",
    r"around.*?\$?(\d+(?:\.\d{2})?)",
    r"about.*?\$?(\d+(?:\.\d{2})?)",
    r"costs?.*?\$?(\d+(?:\.\d{2})?)",
    r"price.*?\$?(\d+(?:\.\d{2})?)",
    r"\$(\d+(?:\.\d{2})?).*?(?:actually|really|more)",
];

/// The outcome of a correction scan. Calorie and price extraction are
/// independent; either, neither, or both may be present.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Correction {
    pub calories: Option<u32>,
    pub price: Option<f64>,
}

impl Correction {
    /// True iff at least one numeric value was extracted. Keyword presence
    /// alone, without a parsable number, does not count as a correction.
    pub fn detected(&self) -> bool {
        self.calories.is_some() || self.price.is_some()
    }
}

/// Keyword-gated, pattern-list correction parser. Patterns are compiled once
/// at construction so they can be applied per message without re-parsing.
#[derive(Debug)]
pub struct CorrectionParser {
    calorie_patterns: Vec<Regex>,
    price_patterns: Vec<Regex>,
}

impl CorrectionParser {
    pub fn new() -> Result<Self, regex::Error> {
        let compile = |patterns: &[&str]| -> Result<Vec<Regex>, regex::Error> {
            patterns.iter().map(|p| Regex::new(p)).collect()
        };
        Ok(Self {
            calorie_patterns: compile(CALORIE_PATTERNS)?,
            price_patterns: compile(PRICE_PATTERNS)?,
        })
    }

    /// Scans one message for corrections.
    pub fn detect(&self, text: &str) -> Correction {
        let input = text.to_lowercase();

        let has_keyword = CORRECTION_KEYWORDS
            .iter()
            .any(|keyword| input.contains(keyword));
        if !has_keyword {
            return Correction::default();
        }

        Correction {
            calories: first_capture(&self.calorie_patterns, &input)
                .and_then(|value| value.parse().ok()),
            price: first_capture(&self.price_patterns, &input)
                .and_then(|value| value.parse().ok()),
        }
    }
}

/// Applies the pattern list in order and returns the first capture group of
/// the first pattern that matches.
fn first_capture<'a>(patterns: &[Regex], input: &'a str) -> Option<&'a str> {
    patterns.iter().find_map(|pattern| {
        pattern
            .captures(input)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CorrectionParser {
        CorrectionParser::new().unwrap()
    }

    #[test]
    fn extracts_a_calorie_correction() {
        let correction = parser().detect("actually it's 700 calories");
        assert_eq!(correction.calories, Some(700));
        assert!(correction.detected());
    }

    #[test]
    fn extracts_a_price_correction() {
        let correction = parser().detect("it actually costs $8.50 here");
        assert_eq!(correction.price, Some(8.50));
        assert!(correction.detected());
    }

    #[test]
    fn extracts_both_at_once() {
        let correction = parser().detect("actually it costs $9.25 for 700 calories");
        assert_eq!(correction.calories, Some(700));
        assert_eq!(correction.price, Some(9.25));
    }

    #[test]
    fn no_keyword_means_no_extraction_attempt() {
        // "700 calories" without a signal keyword is not treated as a
        // correction at all.
        let correction = parser().detect("I love this");
        assert_eq!(correction, Correction::default());
        assert!(!correction.detected());
    }

    #[test]
    fn keyword_without_a_number_is_not_a_correction() {
        let correction = parser().detect("that seems wrong to me");
        assert!(!correction.detected());
    }

    #[test]
    fn first_matching_pattern_wins() {
        // "actually ... 500 cal" is claimed by the first calorie pattern even
        // though later patterns would also match.
        let correction = parser().detect("actually more like 500 cal");
        assert_eq!(correction.calories, Some(500));
    }

    #[test]
    fn bare_number_near_a_keyword_is_read_as_price() {
        // The price patterns accept a number without a currency symbol, so a
        // calorie correction also yields a price candidate. Known heuristic
        // behavior carried over from the original rules.
        let correction = parser().detect("actually it's 700 calories");
        assert_eq!(correction.price, Some(700.0));
    }
}
