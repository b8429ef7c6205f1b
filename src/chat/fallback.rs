//! Free-text questions answered by the generative model, grounded on the
//! top place of each category.

use tracing::debug;

use crate::Result;
use crate::llm::GenerativeModel;
use crate::models::Category;
use crate::ranking::SearchResults;

/// One `"{Plural}: {name} (Rating: {rating})"` line per non-empty category,
/// taken from the head of each category as the API ranked it.
#[must_use]
pub fn grounding_context(results: &SearchResults) -> Vec<String> {
    Category::ALL
        .into_iter()
        .filter_map(|category| {
            results.category(category).first().map(|top| {
                format!(
                    "{}: {} (Rating: {})",
                    category.plural_label(),
                    top.name,
                    top.format_rating()
                )
            })
        })
        .collect()
}

#[must_use]
pub fn compose_prompt(destination: &str, context: &[String], utterance: &str) -> String {
    format!(
        "You are a helpful travel assistant for {destination}.\n\
         Here are the top rated places:\n\
         {}\n\n\
         Provide a very brief response (max 2 sentences) about the places that match the user's question.\n\
         Only talk about the places listed above.\n\
         User: {utterance}",
        context.join("\n")
    )
}

/// Ask the model; its text comes back untouched
pub async fn ask<M>(model: &M, results: &SearchResults, utterance: &str) -> Result<String>
where
    M: GenerativeModel + ?Sized,
{
    let context = grounding_context(results);
    debug!("Grounding context has {} lines", context.len());
    let prompt = compose_prompt(&results.destination.name, &context, utterance);
    model.generate(&prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, PlaceRecord};

    fn place(category: Category, name: &str, rating: Option<f64>) -> PlaceRecord {
        let mut record = PlaceRecord::empty(category);
        record.name = name.to_string();
        record.rating = rating;
        record
    }

    fn results(dining: Vec<PlaceRecord>) -> SearchResults {
        SearchResults::new(
            Location::new(38.72, -9.14, "Lisbon".to_string()),
            vec![
                place(Category::Lodging, "Upstream First", Some(4.1)),
                place(Category::Lodging, "Upstream Second", Some(4.9)),
            ],
            dining,
            vec![place(Category::Attraction, "Belem Tower", Some(4.6))],
        )
    }

    #[test]
    fn test_context_uses_first_of_each_category() {
        let context = grounding_context(&results(vec![place(Category::Dining, "Taberna", None)]));
        assert_eq!(
            context,
            [
                "Hotels: Upstream First (Rating: 4.1)",
                "Restaurants: Taberna (Rating: n/a)",
                "Tourist Spots: Belem Tower (Rating: 4.6)",
            ]
        );
    }

    #[test]
    fn test_context_skips_empty_categories() {
        let context = grounding_context(&results(Vec::new()));
        assert_eq!(context.len(), 2);
        assert!(context.iter().all(|l| !l.starts_with("Restaurants")));
    }

    #[test]
    fn test_prompt_layout() {
        let prompt = compose_prompt(
            "Lisbon",
            &["Hotels: A (Rating: 4.0)".to_string()],
            "where to sleep?",
        );
        assert!(prompt.starts_with("You are a helpful travel assistant for Lisbon.\n"));
        assert!(prompt.contains("Here are the top rated places:\nHotels: A (Rating: 4.0)\n"));
        assert!(prompt.contains("max 2 sentences"));
        assert!(prompt.ends_with("\nUser: where to sleep?"));
    }
}
