//! Rule-based command interpreter for the chat.
//!
//! Rules are tried in a fixed order and the first match wins:
//!
//! | Input                    | Answer                                        |
//! |--------------------------|-----------------------------------------------|
//! | `top 5 <category>`       | first five ranked places of that category     |
//! | `rating <name fragment>` | rating and review count of the first match    |
//! | `popular places`         | three places with the most reviews            |
//!
//! Anything else is [`CommandResult::Unhandled`]. `help` is answered by the
//! session before the interpreter runs.

use crate::models::{Category, PlaceRecord};
use crate::ranking::{PlaceCollection, popularity_order};

const TOP_PREFIX: &str = "top 5";
const TOP_LIMIT: usize = 5;
const RATING_PREFIX: &str = "rating ";
const POPULAR_COMMAND: &str = "popular places";
const POPULAR_LIMIT: usize = 3;

pub const HELP_TEXT: &str = "🤖 Available Commands:
    1. 'top 5 hotel' - Show the 5 best ranked hotels (also 'top 5 restaurant', 'top 5 tourist')
    2. 'rating [place name]' - Get rating and review count for a specific place
    3. 'popular places' - The 3 places with the most reviews
    4. 'help' - Show this message

💡 Anything else goes to the travel assistant, try questions like:
- \"What's the highest rated restaurant?\"
- \"Which attractions have the most reviews?\"
- \"Is there a hotel close to the old town?\"";

/// Outcome of interpreting one utterance
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// A command matched; the text is the complete answer
    Handled(String),
    /// Not a command, the caller decides what to do next
    Unhandled,
}

/// `help` in any case, surrounded by any whitespace
#[must_use]
pub fn is_help(utterance: &str) -> bool {
    utterance.trim().eq_ignore_ascii_case("help")
}

/// Interpret an utterance against the ranked collection
#[must_use]
pub fn interpret(utterance: &str, places: &PlaceCollection) -> CommandResult {
    let command = utterance.trim().to_lowercase();

    if let Some(rest) = command.strip_prefix(TOP_PREFIX) {
        return CommandResult::Handled(top_of_category(rest.trim(), places));
    }

    if let Some(rest) = command.strip_prefix(RATING_PREFIX) {
        return CommandResult::Handled(rating_of(rest.trim(), places));
    }

    if command == POPULAR_COMMAND {
        return CommandResult::Handled(most_popular(places));
    }

    CommandResult::Unhandled
}

fn top_of_category(label: &str, places: &PlaceCollection) -> String {
    let matches: Vec<&PlaceRecord> = match Category::from_label(label) {
        Some(category) => places.of_category(category).take(TOP_LIMIT).collect(),
        None => Vec::new(),
    };

    if matches.is_empty() {
        let known: Vec<_> = Category::ALL
            .iter()
            .map(|c| format!("'top 5 {}'", c.label().to_lowercase()))
            .collect();
        return format!(
            "No places found for '{label}'. Try {}.",
            known.join(", ")
        );
    }

    format_listing(&matches)
}

fn rating_of(fragment: &str, places: &PlaceCollection) -> String {
    match places
        .iter()
        .find(|r| r.name.to_lowercase().contains(fragment))
    {
        Some(place) => format!(
            "Rating for {}: {} ({})",
            place.name,
            place.format_rating(),
            place.format_reviews()
        ),
        None => format!("No place matching '{fragment}' was found."),
    }
}

fn most_popular(places: &PlaceCollection) -> String {
    let mut by_reviews: Vec<&PlaceRecord> = places.iter().collect();
    by_reviews.sort_by(|a, b| popularity_order(a, b));
    by_reviews.truncate(POPULAR_LIMIT);

    if by_reviews.is_empty() {
        return "No places found for this destination.".to_string();
    }
    format_listing(&by_reviews)
}

fn format_listing(records: &[&PlaceRecord]) -> String {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| {
            let mut line = format!(
                "{}. {} ({}) - Rating: {} ({})",
                i + 1,
                r.name,
                r.category.label(),
                r.format_rating(),
                r.format_reviews()
            );
            if !r.address.is_empty() {
                line.push_str(" - ");
                line.push_str(&r.address);
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}
