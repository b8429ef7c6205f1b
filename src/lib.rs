//! `VoyageAI` - travel recommendations for a destination
//!
//! This library resolves a destination, searches nearby lodging, dining and
//! attractions, ranks the results and answers questions about them through a
//! small command interpreter backed by a generative model.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod logging;
pub mod models;
pub mod places;
pub mod ranking;
pub mod render;

// Re-export core types for public API
pub use chat::{ChatSession, CommandResult, Transcript, TranscriptEntry};
pub use config::VoyageConfig;
pub use error::VoyageError;
pub use llm::{GeminiClient, GenerativeModel};
pub use models::{Category, Location, PlaceRecord};
pub use places::{PlacesClient, SearchQuery};
pub use ranking::{PlaceCollection, SearchResults};
pub use render::View;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, VoyageError>;
