//! crates/craveshield_core/src/catalog.rs
//!
//! The static registry of known craved foods and their healthy alternatives.
//!
//! Entries are kept as an ordered list of `(key, Product)` pairs rather than a
//! map: the matcher scans them in definition order and the first substring hit
//! wins, so iteration order is part of the matching contract.

use crate::domain::{Alternative, Product};

/// Immutable, ordered catalog of products plus the alias table mapping common
/// synonyms and brand names onto canonical keys.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<(&'static str, Product)>,
    aliases: Vec<(&'static str, &'static str)>,
}

impl Catalog {
    /// Looks up a product by its canonical key.
    pub fn get(&self, key: &str) -> Option<&Product> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, product)| product)
    }

    /// Canonical entries in their fixed definition order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &Product)> {
        self.entries.iter().map(|(k, p)| (*k, p))
    }

    /// Alias pairs `(alias, canonical key)` in their fixed definition order.
    pub fn aliases(&self) -> impl Iterator<Item = (&'static str, &'static str)> + use<'_> {
        self.aliases.iter().copied()
    }

    /// The built-in catalog: twelve craved foods with home-cooked substitutes.
    pub fn builtin() -> Self {
        fn product(
            name: &str,
            calories: u32,
            cost: f64,
            alt_name: &str,
            alt_description: &str,
            alt_calories: u32,
            prep_time: &str,
            recipe: &[&str],
        ) -> Product {
            Product {
                name: name.to_string(),
                calories,
                cost,
                currency: "USD".to_string(),
                alternative: Alternative {
                    name: alt_name.to_string(),
                    description: alt_description.to_string(),
                    recipe: recipe.iter().map(|s| s.to_string()).collect(),
                    calories: alt_calories,
                    prep_time: prep_time.to_string(),
                },
            }
        }

        let entries = vec![
            // Fast food
            (
                "big mac",
                product(
                    "Big Mac",
                    550,
                    6.99,
                    "Homemade Turkey Burger",
                    "A healthier burger alternative with lean turkey and fresh vegetables",
                    320,
                    "15 minutes",
                    &[
                        "1 lb ground turkey (93% lean)",
                        "1 whole wheat bun",
                        "Lettuce, tomato, onion",
                        "1 tbsp olive oil",
                        "Season with salt, pepper, garlic powder",
                        "Grill turkey patty for 6-7 minutes each side",
                        "Assemble with fresh vegetables",
                    ],
                ),
            ),
            (
                "pizza",
                product(
                    "Large Pizza Slice",
                    400,
                    3.50,
                    "Cauliflower Crust Personal Pizza",
                    "A low-carb pizza alternative that's just as satisfying",
                    180,
                    "30 minutes",
                    &[
                        "1 head cauliflower, riced",
                        "1 egg",
                        "1/4 cup mozzarella cheese",
                        "2 tbsp tomato sauce",
                        "Fresh basil and vegetables",
                        "Preheat oven to 425F",
                        "Mix cauliflower, egg, and cheese for crust",
                        "Bake crust 15 min, add toppings, bake 10 more min",
                    ],
                ),
            ),
            // Sweets
            (
                "chocolate chip cookies",
                product(
                    "Chocolate Chip Cookies (3 pieces)",
                    450,
                    4.99,
                    "Oatmeal Banana Cookies",
                    "Naturally sweetened cookies with no added sugar",
                    180,
                    "20 minutes",
                    &[
                        "2 ripe bananas, mashed",
                        "1 cup rolled oats",
                        "1/4 cup dark chocolate chips",
                        "1 tsp vanilla extract",
                        "1/2 tsp cinnamon",
                        "Preheat oven to 350F",
                        "Mix all ingredients",
                        "Drop spoonfuls on baking sheet",
                        "Bake for 12-15 minutes",
                    ],
                ),
            ),
            (
                "ice cream",
                product(
                    "Ice Cream (1 cup)",
                    350,
                    5.99,
                    "Frozen Banana Nice Cream",
                    "Creamy, naturally sweet ice cream alternative",
                    120,
                    "5 minutes",
                    &[
                        "3 frozen bananas, sliced",
                        "2 tbsp almond milk",
                        "1 tsp vanilla extract",
                        "Optional: 1 tbsp cocoa powder or berries",
                        "Blend frozen bananas in food processor",
                        "Add milk gradually until creamy",
                        "Add vanilla and mix-ins",
                        "Serve immediately or freeze for firmer texture",
                    ],
                ),
            ),
            (
                "donuts",
                product(
                    "Glazed Donut",
                    260,
                    1.99,
                    "Baked Apple Cinnamon Rings",
                    "Sweet, satisfying rings without the guilt",
                    95,
                    "25 minutes",
                    &[
                        "2 large apples, cored and sliced into rings",
                        "1/2 cup whole wheat flour",
                        "1/4 cup oats, ground",
                        "1 tsp cinnamon",
                        "2 tbsp honey",
                        "1 egg, beaten",
                        "Dip apple rings in egg, then flour mixture",
                        "Bake at 375F for 15-20 minutes until golden",
                    ],
                ),
            ),
            // Snacks
            (
                "potato chips",
                product(
                    "Potato Chips (1 bag)",
                    320,
                    2.49,
                    "Baked Sweet Potato Chips",
                    "Crispy, naturally sweet chips with more nutrients",
                    140,
                    "30 minutes",
                    &[
                        "2 large sweet potatoes, thinly sliced",
                        "1 tbsp olive oil",
                        "1/2 tsp sea salt",
                        "Optional: paprika, garlic powder",
                        "Preheat oven to 400F",
                        "Toss slices with oil and seasonings",
                        "Arrange on baking sheet in single layer",
                        "Bake 15-20 minutes, flipping halfway",
                    ],
                ),
            ),
            (
                "candy bar",
                product(
                    "Chocolate Candy Bar",
                    280,
                    1.79,
                    "Dark Chocolate Energy Bites",
                    "Naturally sweet energy bites with protein and fiber",
                    150,
                    "15 minutes",
                    &[
                        "1 cup dates, pitted",
                        "1/2 cup almonds",
                        "2 tbsp cocoa powder",
                        "1 tbsp chia seeds",
                        "1 tsp vanilla extract",
                        "Process dates and almonds in food processor",
                        "Add cocoa, chia seeds, and vanilla",
                        "Roll into small balls",
                        "Refrigerate for 30 minutes",
                    ],
                ),
            ),
            // International foods
            (
                "ramen",
                product(
                    "Instant Ramen (1 package)",
                    380,
                    1.50,
                    "Homemade Vegetable Ramen",
                    "Fresh, nutritious ramen with real vegetables and lean protein",
                    180,
                    "15 minutes",
                    &[
                        "2 cups low-sodium chicken or vegetable broth",
                        "1 pack shirataki noodles or zucchini noodles",
                        "1 soft-boiled egg",
                        "1/2 cup mixed vegetables (carrots, spinach, mushrooms)",
                        "1 green onion, sliced",
                        "1 tsp miso paste (optional)",
                        "Heat broth and add miso paste",
                        "Add vegetables and cook for 3-4 minutes",
                        "Add noodles and heat through",
                        "Top with egg and green onions",
                    ],
                ),
            ),
            (
                "sushi",
                product(
                    "Sushi Roll (8 pieces)",
                    450,
                    12.99,
                    "Homemade Sushi Bowl",
                    "Deconstructed sushi with fresh ingredients and brown rice",
                    320,
                    "10 minutes",
                    &[
                        "1 cup cooked brown rice",
                        "4 oz fresh salmon or tuna (sashimi grade)",
                        "1/2 avocado, sliced",
                        "1/2 cucumber, julienned",
                        "1 sheet nori, cut into strips",
                        "1 tbsp low-sodium soy sauce",
                        "1 tsp wasabi",
                        "Pickled ginger",
                        "Arrange rice in bowl",
                        "Top with fish, avocado, and cucumber",
                        "Garnish with nori strips",
                        "Serve with soy sauce and wasabi",
                    ],
                ),
            ),
            (
                "tacos",
                product(
                    "Fast Food Tacos (3 pieces)",
                    520,
                    8.99,
                    "Lettuce Wrap Tacos",
                    "Fresh lettuce wraps with lean protein and vegetables",
                    280,
                    "20 minutes",
                    &[
                        "6 large lettuce leaves (butter lettuce or iceberg)",
                        "6 oz lean ground turkey or chicken",
                        "1/2 cup black beans",
                        "1/4 cup corn",
                        "1/4 cup diced tomatoes",
                        "1/4 avocado, diced",
                        "2 tbsp salsa",
                        "1 tbsp Greek yogurt",
                        "Cook protein with taco seasoning",
                        "Warm beans and corn",
                        "Fill lettuce leaves with ingredients",
                        "Top with salsa and yogurt",
                    ],
                ),
            ),
            (
                "pasta",
                product(
                    "Restaurant Pasta (1 serving)",
                    650,
                    15.99,
                    "Zucchini Noodle Pasta",
                    "Light and fresh zucchini noodles with homemade sauce",
                    220,
                    "15 minutes",
                    &[
                        "2 large zucchini, spiralized",
                        "1 cup cherry tomatoes",
                        "2 cloves garlic, minced",
                        "2 tbsp olive oil",
                        "1/4 cup fresh basil",
                        "2 tbsp parmesan cheese",
                        "Salt and pepper to taste",
                        "Saute garlic in olive oil",
                        "Add tomatoes and cook until soft",
                        "Add zucchini noodles for 2-3 minutes",
                        "Toss with basil and parmesan",
                    ],
                ),
            ),
            (
                "fried chicken",
                product(
                    "Fried Chicken (3 pieces)",
                    740,
                    9.99,
                    "Baked Crispy Chicken",
                    "Crispy baked chicken with herbs and spices",
                    380,
                    "35 minutes",
                    &[
                        "3 chicken thighs, skinless",
                        "1/2 cup whole wheat breadcrumbs",
                        "1/4 cup parmesan cheese",
                        "1 tsp paprika",
                        "1 tsp garlic powder",
                        "1 tsp dried herbs",
                        "2 tbsp olive oil",
                        "Preheat oven to 425F",
                        "Mix breadcrumbs with cheese and spices",
                        "Brush chicken with oil",
                        "Coat with breadcrumb mixture",
                        "Bake for 25-30 minutes until crispy",
                    ],
                ),
            ),
        ];

        // Alias scan order matters the same way entry order does.
        let aliases = vec![
            ("mcdonald", "big mac"),
            ("burger", "big mac"),
            ("cookie", "chocolate chip cookies"),
            ("chips", "potato chips"),
            ("chocolate", "candy bar"),
            ("candy", "candy bar"),
            ("donut", "donuts"),
            ("doughnut", "donuts"),
            ("noodles", "ramen"),
            ("instant noodles", "ramen"),
            ("taco", "tacos"),
            ("spaghetti", "pasta"),
            ("noodle", "pasta"),
            ("chicken", "fried chicken"),
        ];

        Self { entries, aliases }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_alias_targets_an_existing_entry() {
        let catalog = Catalog::builtin();
        for (alias, key) in catalog.aliases() {
            assert!(
                catalog.get(key).is_some(),
                "alias '{}' points at missing key '{}'",
                alias,
                key
            );
        }
    }

    #[test]
    fn every_alternative_saves_calories() {
        // The "calories saved" framing in the response templates relies on
        // this holding for all shipped data.
        for (key, product) in Catalog::builtin().entries() {
            assert!(
                product.alternative.calories < product.calories,
                "'{}' alternative does not save calories",
                key
            );
        }
    }

    #[test]
    fn every_entry_has_recipe_steps_and_positive_cost() {
        for (key, product) in Catalog::builtin().entries() {
            assert!(!product.alternative.recipe.is_empty(), "'{}' has no recipe", key);
            assert!(product.cost > 0.0, "'{}' has non-positive cost", key);
            assert_eq!(product.currency, "USD");
        }
    }

    #[test]
    fn lookup_by_unknown_key_is_none() {
        assert!(Catalog::builtin().get("xyzzy-not-a-food").is_none());
    }
}
