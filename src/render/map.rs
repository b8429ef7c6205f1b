//! GeoJSON map of the ranked places
//!
//! Marker styling uses the simplestyle property names understood by most
//! GeoJSON viewers.

use serde_json::{Value, json};

use crate::models::PlaceRecord;
use crate::ranking::SearchResults;

/// FeatureCollection of every record with coordinates
#[must_use]
pub fn render_map(results: &SearchResults) -> Value {
    let features: Vec<Value> = results.collection().iter().filter_map(feature).collect();
    let center = &results.destination;

    json!({
        "type": "FeatureCollection",
        "center": {
            "name": center.name,
            "coordinates": [center.longitude, center.latitude],
        },
        "features": features,
    })
}

fn feature(record: &PlaceRecord) -> Option<Value> {
    let (latitude, longitude) = record.coordinates()?;
    Some(json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [longitude, latitude],
        },
        "properties": {
            "name": record.name,
            "type": record.category.label(),
            "rating": record.rating,
            "address": record.address,
            "website": record.website_url,
            "marker-color": record.category.marker_color(),
            "marker-symbol": record.category.marker_icon(),
        },
    }))
}
