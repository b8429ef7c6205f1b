//! Search query parameters and the `places:searchText` request body

use serde::Serialize;

use crate::models::{Category, Location};
use crate::{Result, VoyageError};

/// Attributes returned by a category search
pub const SEARCH_FIELD_MASK: &str = "places.displayName,places.formattedAddress,places.rating,places.userRatingCount,places.websiteUri,places.location,places.googleMapsUri";

/// Attributes returned when resolving the destination itself
pub const LOCATE_FIELD_MASK: &str = "places.location";

pub const MIN_RATING_RANGE: std::ops::RangeInclusive<f64> = 0.5..=4.5;
pub const RADIUS_RANGE: std::ops::RangeInclusive<u32> = 500..=50_000;

/// What the user asked for: one destination, one rating floor, one radius
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    pub destination: String,
    pub min_rating: f64,
    pub radius_meters: u32,
}

impl SearchQuery {
    /// Validate and build a query
    pub fn new(destination: impl Into<String>, min_rating: f64, radius_meters: u32) -> Result<Self> {
        let destination = destination.into().trim().to_string();

        if destination.is_empty() {
            return Err(VoyageError::validation("Destination cannot be empty"));
        }

        if !MIN_RATING_RANGE.contains(&min_rating) {
            return Err(VoyageError::validation(format!(
                "Minimum rating must be between {} and {}, got: {min_rating}",
                MIN_RATING_RANGE.start(),
                MIN_RATING_RANGE.end()
            )));
        }

        if !RADIUS_RANGE.contains(&radius_meters) {
            return Err(VoyageError::validation(format!(
                "Search radius must be between {} and {} meters, got: {radius_meters}",
                RADIUS_RANGE.start(),
                RADIUS_RANGE.end()
            )));
        }

        Ok(Self {
            destination,
            min_rating,
            radius_meters,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LatLng {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Circle {
    pub center: LatLng,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationBias {
    pub circle: Circle,
}

/// JSON body of a text search
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchTextRequest {
    pub text_query: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_bias: Option<LocationBias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_result_count: Option<u32>,
}

impl SearchTextRequest {
    /// Single best match for the destination, used for its coordinates
    #[must_use]
    pub fn locate(destination: &str) -> Self {
        Self {
            text_query: destination.to_string(),
            min_rating: None,
            location_bias: None,
            max_result_count: Some(1),
        }
    }

    /// Category search biased to a circle around the destination centre
    #[must_use]
    pub fn for_category(query: &SearchQuery, center: &Location, category: Category) -> Self {
        Self {
            text_query: category.text_query(&query.destination),
            min_rating: Some(query.min_rating),
            location_bias: Some(LocationBias {
                circle: Circle {
                    center: LatLng {
                        latitude: center.latitude,
                        longitude: center.longitude,
                    },
                    radius: f64::from(query.radius_meters),
                },
            }),
            max_result_count: None,
        }
    }

    /// Cache key covering everything that changes the response
    #[must_use]
    pub fn cache_key(&self, field_mask: &str) -> String {
        let body = serde_json::to_string(self).unwrap_or_else(|_| self.text_query.clone());
        format!("{field_mask}|{body}")
    }
}
