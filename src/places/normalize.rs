//! Flattening of raw `places:searchText` responses into [`PlaceRecord`]s
//!
//! The upstream payload is loosely typed: any field may be missing, and a
//! field of the wrong JSON type is treated as missing instead of failing the
//! whole response. Records are never dropped here, even without geometry.

use serde::Deserialize;
use serde_json::Value;

use crate::models::{Category, PlaceRecord};

/// Field deserializers that turn type mismatches into `None`
mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_f64().filter(|v| v.is_finite()))
    }

    pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u32>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_u64().and_then(|v| u32::try_from(v).ok()))
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(value.as_str().map(str::to_owned))
    }

    pub fn nested<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).ok())
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DisplayName {
    #[serde(default, deserialize_with = "lenient::text")]
    text: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    language_code: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocation {
    #[serde(default, deserialize_with = "lenient::number")]
    latitude: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    longitude: Option<f64>,
}

/// One element of the `places` array as the API sends it
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPlace {
    #[serde(default, deserialize_with = "lenient::nested")]
    display_name: Option<DisplayName>,
    #[serde(default, deserialize_with = "lenient::text")]
    formatted_address: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    rating: Option<f64>,
    #[serde(default, deserialize_with = "lenient::count")]
    user_rating_count: Option<u32>,
    #[serde(default, deserialize_with = "lenient::text")]
    website_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    google_maps_uri: Option<String>,
    #[serde(default, deserialize_with = "lenient::nested")]
    location: Option<RawLocation>,
}

impl RawPlace {
    /// Anything that is not an object parses as an all-absent place
    fn parse(value: &Value) -> Self {
        RawPlace::deserialize(value).unwrap_or_default()
    }

    fn into_record(self, category: Category) -> PlaceRecord {
        let display_name = self.display_name.unwrap_or_default();
        let location = self.location.unwrap_or_default();

        PlaceRecord {
            category,
            name: display_name.text.unwrap_or_default(),
            address: self.formatted_address.unwrap_or_default(),
            rating: self.rating,
            rating_count: self.user_rating_count,
            maps_url: self.google_maps_uri,
            website_url: self.website_uri,
            latitude: location.latitude,
            longitude: location.longitude,
            language_code: display_name.language_code,
        }
    }
}

/// Normalize one category response. A response without a `places` array is
/// an empty result, not an error.
#[must_use]
pub fn normalize(response: &Value, category: Category) -> Vec<PlaceRecord> {
    let Some(places) = response.get("places").and_then(Value::as_array) else {
        return Vec::new();
    };

    places
        .iter()
        .map(|place| RawPlace::parse(place).into_record(category))
        .collect()
}

/// Coordinates of the first place, used to resolve the destination centre
#[must_use]
pub fn first_location(response: &Value) -> Option<(f64, f64)> {
    let first = response.get("places")?.as_array()?.first()?;
    let location = RawPlace::parse(first).location?;
    location.latitude.zip(location.longitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_place() -> Value {
        json!({
            "displayName": {"text": "Hotel Avenida", "languageCode": "pt"},
            "formattedAddress": "Av. da Liberdade 1, Lisboa",
            "rating": 4.6,
            "userRatingCount": 1520,
            "websiteUri": "https://avenida.example",
            "googleMapsUri": "https://maps.google.com/?cid=1",
            "location": {"latitude": 38.72, "longitude": -9.14}
        })
    }

    #[test]
    fn test_full_record_mapping() {
        let records = normalize(&json!({"places": [full_place()]}), Category::Lodging);
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record.category, Category::Lodging);
        assert_eq!(record.name, "Hotel Avenida");
        assert_eq!(record.address, "Av. da Liberdade 1, Lisboa");
        assert_eq!(record.rating, Some(4.6));
        assert_eq!(record.rating_count, Some(1520));
        assert_eq!(record.website_url.as_deref(), Some("https://avenida.example"));
        assert_eq!(record.maps_url.as_deref(), Some("https://maps.google.com/?cid=1"));
        assert_eq!(record.coordinates(), Some((38.72, -9.14)));
        assert_eq!(record.language_code.as_deref(), Some("pt"));
    }

    #[test]
    fn test_missing_places_is_empty() {
        assert!(normalize(&json!({}), Category::Dining).is_empty());
        assert!(normalize(&json!({"places": null}), Category::Dining).is_empty());
        assert!(normalize(&json!({"places": "oops"}), Category::Dining).is_empty());
        assert!(normalize(&json!([]), Category::Dining).is_empty());
    }

    #[test]
    fn test_unreviewed_place_keeps_absent_numbers() {
        let response = json!({"places": [{"displayName": {"text": "New Cafe"}}]});
        let records = normalize(&response, Category::Dining);
        assert_eq!(records[0].rating, None);
        assert_eq!(records[0].rating_count, None);
    }

    #[test]
    fn test_zero_is_not_absent() {
        let response = json!({"places": [{"rating": 0, "userRatingCount": 0}]});
        let records = normalize(&response, Category::Dining);
        assert_eq!(records[0].rating, Some(0.0));
        assert_eq!(records[0].rating_count, Some(0));
    }

    #[test]
    fn test_malformed_fields_become_absent() {
        let response = json!({"places": [{
            "displayName": "not an object",
            "rating": "four",
            "userRatingCount": -3,
            "location": {"latitude": "north", "longitude": 2.35}
        }]});
        let records = normalize(&response, Category::Attraction);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.name, "");
        assert_eq!(record.rating, None);
        assert_eq!(record.rating_count, None);
        assert_eq!(record.latitude, None);
        assert_eq!(record.longitude, Some(2.35));
        assert_eq!(record.coordinates(), None);
    }

    #[test]
    fn test_places_without_geometry_are_kept() {
        let response = json!({"places": [full_place(), {"displayName": {"text": "Nowhere"}}, 42]});
        let records = normalize(&response, Category::Lodging);
        assert_eq!(records.len(), 3);
        assert_eq!(records[1].name, "Nowhere");
        assert_eq!(records[2], PlaceRecord::empty(Category::Lodging));
    }

    #[test]
    fn test_category_always_matches_tag() {
        let response = json!({"places": [full_place(), {"type": "Restaurant"}, {}]});
        for category in Category::ALL {
            assert!(
                normalize(&response, category)
                    .iter()
                    .all(|r| r.category == category)
            );
        }
    }

    #[test]
    fn test_first_location() {
        let response = json!({"places": [{"location": {"latitude": 1.5, "longitude": 2.5}}]});
        assert_eq!(first_location(&response), Some((1.5, 2.5)));
        assert_eq!(first_location(&json!({"places": []})), None);
        assert_eq!(first_location(&json!({})), None);
    }
}
