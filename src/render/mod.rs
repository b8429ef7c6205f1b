//! Terminal renderings of a search

pub mod listing;
pub mod map;
pub mod table;

use std::path::Path;

use clap::ValueEnum;
use tracing::info;

use crate::Result;
use crate::VoyageError;
use crate::models::Category;
use crate::ranking::SearchResults;

pub use listing::render_listing;
pub use map::render_map;
pub use table::render_table;

/// Output selected by `search --view`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum View {
    #[default]
    List,
    Table,
    Map,
    Json,
}

/// Render a search in the chosen view. `category` only applies to `List`.
pub fn render(results: &SearchResults, view: View, category: Category) -> Result<String> {
    match view {
        View::List => Ok(render_listing(results, category)),
        View::Table => Ok(render_table(results)),
        View::Map => serde_json::to_string_pretty(&render_map(results))
            .map_err(|e| VoyageError::invalid_response(format!("Failed to encode map: {e}"))),
        View::Json => serde_json::to_string_pretty(results.collection().records())
            .map_err(|e| VoyageError::invalid_response(format!("Failed to encode places: {e}"))),
    }
}

/// Write a rendering to `path`, replacing any existing file
pub async fn write_output(path: &Path, rendered: &str) -> Result<()> {
    tokio::fs::write(path, rendered).await?;
    info!("Wrote {} bytes to {}", rendered.len(), path.display());
    Ok(())
}
