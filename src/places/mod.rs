//! Places search integration
//!
//! - request: query parameters and `places:searchText` bodies
//! - normalize: raw responses to flat place records
//! - retry: bounded exponential back-off
//! - cache: short-lived response cache
//! - client: the HTTP client tying them together

pub mod cache;
pub mod client;
pub mod normalize;
pub mod request;
pub mod retry;

pub use cache::SearchCache;
pub use client::PlacesClient;
pub use normalize::normalize;
pub use request::{SearchQuery, SearchTextRequest};
pub use retry::{RetrySettings, with_backoff};
