//! Canned search results served when live search is unavailable.
//!
//! Output depends only on the query text, so repeated calls with the same
//! query return identical results.

use super::{SearchHit, SearchResults};

fn hit(title: impl Into<String>, snippet: impl Into<String>, link: &str) -> SearchHit {
    SearchHit {
        title: title.into(),
        snippet: snippet.into(),
        link: link.to_string(),
    }
}

/// Canned recipe results. Chicken-soup queries get three fixed records;
/// anything else gets one record templated on the query.
#[must_use]
pub fn recipe_results(query: &str) -> SearchResults {
    if query.to_lowercase().contains("chicken soup") {
        return SearchResults {
            results: vec![
                hit(
                    "Classic Chicken Soup Recipe",
                    "This homemade chicken soup recipe features tender chicken, fresh vegetables, \
                     and aromatic herbs in a flavorful broth. Perfect comfort food for cold days!",
                    "https://example.com/classic-chicken-soup",
                ),
                hit(
                    "Easy 30-Minute Chicken Soup",
                    "Make delicious chicken soup in just 30 minutes with this simple recipe. Uses \
                     rotisserie chicken, pre-cut vegetables, and boxed broth for a quick meal.",
                    "https://cooking.example.com/quick-chicken-soup",
                ),
                hit(
                    "Healing Chicken Noodle Soup",
                    "This medicinal chicken noodle soup is packed with immune-boosting ingredients \
                     like garlic, ginger, and turmeric. Perfect when feeling under the weather.",
                    "https://health.example.com/healing-soup",
                ),
            ],
        };
    }

    SearchResults {
        results: vec![hit(
            format!("Recipe for {query}"),
            format!("Delicious {query} recipe that can be made in under 30 minutes."),
            "https://example.com/recipe",
        )],
    }
}

/// Canned answers for a general cooking question: two records templated
/// on the query.
#[must_use]
pub fn cooking_results(query: &str) -> SearchResults {
    SearchResults {
        results: vec![
            hit(
                format!("How to {query}"),
                format!("Learn the best techniques for {query} with these expert tips."),
                "https://example.com/cooking-tips",
            ),
            hit(
                format!("Common mistakes when {query}"),
                format!("Avoid these common errors when {query} to get better results every time."),
                "https://cooking-school.example.com/mistakes",
            ),
        ],
    }
}
