use std::fmt::Write;

use crate::models::Category;
use crate::ranking::SearchResults;

/// Markdown recommendations page for one category, in upstream order
#[must_use]
pub fn render_listing(results: &SearchResults, category: Category) -> String {
    let mut out = format!(
        "# Here are our recommendations for {} near {}\n",
        category.plural_label(),
        results.destination.name
    );

    let records = results.category(category);
    if records.is_empty() {
        out.push_str("\nNo places found.\n");
        return out;
    }

    for (i, record) in records.iter().enumerate() {
        // Writing to a String cannot fail
        let _ = write!(
            out,
            "\n## {}. {}\nRating: {}\nAddress: {}\nWebsite: {}\nMore information: {}\n",
            i + 1,
            record.name,
            record.format_rating(),
            record.address,
            record.website_url.as_deref().unwrap_or("n/a"),
            record.maps_url.as_deref().unwrap_or("n/a"),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Location, PlaceRecord};

    fn results(dining: Vec<PlaceRecord>) -> SearchResults {
        SearchResults::new(
            Location::new(41.15, -8.61, "Porto".to_string()),
            Vec::new(),
            dining,
            Vec::new(),
        )
    }

    #[test]
    fn test_listing_layout() {
        let mut first = PlaceRecord::empty(Category::Dining);
        first.name = "Cantinho".to_string();
        first.address = "Rua A 1".to_string();
        first.rating = Some(4.6);
        first.website_url = Some("https://cantinho.example".to_string());
        first.maps_url = Some("https://maps.example/1".to_string());
        let mut second = PlaceRecord::empty(Category::Dining);
        second.name = "Tasca".to_string();

        let text = render_listing(&results(vec![first, second]), Category::Dining);

        assert!(text.starts_with("# Here are our recommendations for Restaurants near Porto\n"));
        assert!(text.contains(
            "## 1. Cantinho\nRating: 4.6\nAddress: Rua A 1\nWebsite: https://cantinho.example\nMore information: https://maps.example/1\n"
        ));
        assert!(text.contains("## 2. Tasca\nRating: n/a\n"));
    }

    #[test]
    fn test_empty_category() {
        let text = render_listing(&results(Vec::new()), Category::Lodging);
        assert!(text.contains("Hotels near Porto"));
        assert!(text.ends_with("No places found.\n"));
    }
}
