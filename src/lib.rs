//! Data layer for a CI benchmark dashboard: an append-only history of
//! benchmark runs plus the docs search index shipped next to it. An external
//! CI step appends runs; an external dashboard page reads the full assets
//! and renders them. Neither store calls the other.

use std::path::Path;

use clap::ValueEnum;

pub mod error;
pub mod history;
pub mod io;
pub mod sample;
pub mod schema;
pub mod search;

pub use error::{ParseError, StoreError, ValidationError};
pub use history::BenchmarkStore;
pub use schema::{BenchmarkData, BenchmarkRun, Category, Measurement, SearchEntry};
pub use search::SearchIndexStore;

/// Persisted asset flavor.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum AssetFormat {
    /// Pick by file extension: `.js` is a script asset, anything else plain JSON.
    #[default]
    Auto,
    /// Plain JSON document.
    Json,
    /// Script assigning the payload to a global, as the dashboard page loads it.
    Js,
}

impl AssetFormat {
    pub fn is_script(self, path: &Path) -> bool {
        match self {
            AssetFormat::Json => false,
            AssetFormat::Js => true,
            AssetFormat::Auto => path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("js")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_format_picks_script_for_js_extension() {
        assert!(AssetFormat::Auto.is_script(Path::new("dev/bench/data.js")));
        assert!(AssetFormat::Auto.is_script(Path::new("DATA.JS")));
        assert!(!AssetFormat::Auto.is_script(Path::new("dev/bench/data.json")));
        assert!(!AssetFormat::Auto.is_script(Path::new("data")));
        assert!(AssetFormat::Js.is_script(Path::new("data.json")));
        assert!(!AssetFormat::Json.is_script(Path::new("data.js")));
    }
}
