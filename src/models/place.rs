//! Place records and the three searched categories

use serde::{Deserialize, Serialize};
use std::fmt;

/// The three place types searched per destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Hotel")]
    Lodging,
    #[serde(rename = "Restaurant")]
    Dining,
    #[serde(rename = "Tourist")]
    Attraction,
}

impl Category {
    /// Search and aggregation order
    pub const ALL: [Category; 3] = [Category::Lodging, Category::Dining, Category::Attraction];

    /// Label shown in the `Type` column and matched by `top 5 <category>`
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Category::Lodging => "Hotel",
            Category::Dining => "Restaurant",
            Category::Attraction => "Tourist",
        }
    }

    /// Heading used in listings and in the grounding context
    #[must_use]
    pub fn plural_label(self) -> &'static str {
        match self {
            Category::Lodging => "Hotels",
            Category::Dining => "Restaurants",
            Category::Attraction => "Tourist Spots",
        }
    }

    /// Free-text query sent to the places search API
    #[must_use]
    pub fn text_query(self, destination: &str) -> String {
        match self {
            Category::Lodging => format!("Place to stay near {destination}"),
            Category::Dining => format!("Place to eat near {destination}"),
            Category::Attraction => format!("Tourist attraction near {destination}"),
        }
    }

    #[must_use]
    pub fn marker_color(self) -> &'static str {
        match self {
            Category::Lodging => "blue",
            Category::Dining => "green",
            Category::Attraction => "orange",
        }
    }

    #[must_use]
    pub fn marker_icon(self) -> &'static str {
        match self {
            Category::Lodging => "home",
            Category::Dining => "cutlery",
            Category::Attraction => "star",
        }
    }

    /// Case-insensitive lookup by label
    #[must_use]
    pub fn from_label(label: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| c.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of interest, flattened from the search API response.
///
/// Serialized field names are the fixed column names of the tabular view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaceRecord {
    #[serde(rename = "Type")]
    pub category: Category,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Address")]
    pub address: String,
    /// 0.0 to 5.0, absent for places without reviews
    #[serde(rename = "Rating")]
    pub rating: Option<f64>,
    #[serde(rename = "User Rating Count")]
    pub rating_count: Option<u32>,
    #[serde(rename = "Google Maps URL")]
    pub maps_url: Option<String>,
    #[serde(rename = "Website URL")]
    pub website_url: Option<String>,
    #[serde(rename = "Latitude")]
    pub latitude: Option<f64>,
    #[serde(rename = "Longitude")]
    pub longitude: Option<f64>,
    #[serde(rename = "Language Code")]
    pub language_code: Option<String>,
}

impl PlaceRecord {
    /// A record with only the category set
    #[must_use]
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            name: String::new(),
            address: String::new(),
            rating: None,
            rating_count: None,
            maps_url: None,
            website_url: None,
            latitude: None,
            longitude: None,
            language_code: None,
        }
    }

    /// Coordinates, when the upstream record carried both
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    #[must_use]
    pub fn format_rating(&self) -> String {
        self.rating
            .map_or_else(|| "n/a".to_string(), |r| format!("{r:.1}"))
    }

    #[must_use]
    pub fn format_reviews(&self) -> String {
        match self.rating_count {
            Some(1) => "1 review".to_string(),
            Some(count) => format!("{count} reviews"),
            None => "no reviews".to_string(),
        }
    }
}
