//! Places search API client
//!
//! Resolves the destination, runs one text search per category and turns the
//! responses into [`SearchResults`]. Every call goes through the TTL cache and
//! the bounded retry wrapper.

use std::time::Instant;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::cache::SearchCache;
use super::normalize::{first_location, normalize};
use super::request::{LOCATE_FIELD_MASK, SEARCH_FIELD_MASK, SearchQuery, SearchTextRequest};
use super::retry::{RetrySettings, with_backoff};
use crate::config::{CacheConfig, PlacesConfig};
use crate::models::{Category, Location, PlaceRecord};
use crate::ranking::SearchResults;
use crate::{Result, VoyageError};

const SEARCH_TEXT_PATH: &str = "places:searchText";

/// Places search API client
pub struct PlacesClient {
    /// HTTP client, carries the per-attempt timeout
    client: Client,
    api_key: String,
    base_url: String,
    retry: RetrySettings,
    cache: Option<SearchCache>,
}

impl PlacesClient {
    /// Create a new places client
    pub fn new(places: &PlacesConfig, cache: &CacheConfig) -> Result<Self> {
        let api_key = places
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                VoyageError::config("Google Places API key is missing. Please check your .env file.")
            })?;

        let client = Client::builder()
            .timeout(places.timeout())
            .user_agent(concat!("VoyageAI/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| VoyageError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: places.base_url.trim_end_matches('/').to_string(),
            retry: RetrySettings::from_config(places),
            cache: SearchCache::from_config(cache),
        })
    }

    /// Resolve the destination, then search every category around it
    #[instrument(skip(self), fields(destination = %query.destination))]
    pub async fn search(&mut self, query: &SearchQuery) -> Result<SearchResults> {
        let start_time = Instant::now();
        let center = self.locate(&query.destination).await?;

        let lodging = self.search_category(query, &center, Category::Lodging).await?;
        let dining = self.search_category(query, &center, Category::Dining).await?;
        let attractions = self
            .search_category(query, &center, Category::Attraction)
            .await?;

        let results = SearchResults::new(center, lodging, dining, attractions);
        info!(
            "Found {} places near '{}' in {:.3}s",
            results.collection().len(),
            query.destination,
            start_time.elapsed().as_secs_f64()
        );
        Ok(results)
    }

    /// Coordinates of the best match for the destination text
    #[instrument(skip(self))]
    pub async fn locate(&mut self, destination: &str) -> Result<Location> {
        let request = SearchTextRequest::locate(destination);
        let response = self.search_text(&request, LOCATE_FIELD_MASK).await?;

        let (latitude, longitude) = first_location(&response).ok_or_else(|| {
            warn!("No location found for '{}'", destination);
            VoyageError::not_found(format!(
                "Could not find '{destination}'. Please try a different destination."
            ))
        })?;

        let location = Location::new(latitude, longitude, destination.to_string());
        debug!("Resolved '{}' to {}", destination, location.format_coordinates());
        Ok(location)
    }

    /// One category search, normalized in upstream order
    #[instrument(skip(self, query, center))]
    pub async fn search_category(
        &mut self,
        query: &SearchQuery,
        center: &Location,
        category: Category,
    ) -> Result<Vec<PlaceRecord>> {
        let request = SearchTextRequest::for_category(query, center, category);
        let response = self.search_text(&request, SEARCH_FIELD_MASK).await?;
        let records = normalize(&response, category);

        if records.is_empty() {
            warn!("No {} results near '{}'", category.label(), query.destination);
        } else {
            debug!("{} {} results", records.len(), category.label());
        }
        Ok(records)
    }

    async fn search_text(&mut self, request: &SearchTextRequest, field_mask: &str) -> Result<Value> {
        let key = request.cache_key(field_mask);
        if let Some(cached) = self.cache.as_mut().and_then(|cache| cache.get(&key)) {
            debug!("Serving '{}' from cache", request.text_query);
            return Ok(cached);
        }

        let url = format!("{}/{SEARCH_TEXT_PATH}", self.base_url);
        let client = &self.client;
        let api_key = self.api_key.as_str();
        let url = url.as_str();

        let response = with_backoff(&self.retry, move || {
            send_once(client, url, api_key, field_mask, request)
        })
        .await?;

        if let Some(cache) = self.cache.as_mut() {
            cache.put(&key, response.clone());
        }
        Ok(response)
    }
}

async fn send_once(
    client: &Client,
    url: &str,
    api_key: &str,
    field_mask: &str,
    request: &SearchTextRequest,
) -> Result<Value> {
    let attempt_start = Instant::now();
    let response = client
        .post(url)
        .header("X-Goog-Api-Key", api_key)
        .header("X-Goog-FieldMask", field_mask)
        .json(request)
        .send()
        .await
        .map_err(|e| VoyageError::network(format!("Places request failed: {e}")))?;

    let status = response.status();
    debug!(
        "Places response {} in {:.3}s",
        status,
        attempt_start.elapsed().as_secs_f64()
    );

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        let preview: String = body.chars().take(200).collect();
        return Err(VoyageError::api(
            status.as_u16(),
            format!("Places API returned {status}: {preview}"),
        ));
    }

    response.json::<Value>().await.map_err(|e| {
        if e.is_timeout() {
            VoyageError::network(format!("Places response timed out: {e}"))
        } else {
            VoyageError::invalid_response(format!("Places response is not valid JSON: {e}"))
        }
    })
}
