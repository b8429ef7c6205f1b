//! Data models for the VoyageAI application
//!
//! - Location: the resolved destination centre
//! - Place: categories and flattened place records

pub mod location;
pub mod place;

pub use location::Location;
pub use place::{Category, PlaceRecord};
