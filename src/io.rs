//! Reading and writing the persisted dashboard assets.
//!
//! Each store lives in one text file. Two shapes exist in the wild:
//!
//! ```text
//! Plain JSON (.json):
//!   history:  { "lastUpdate": ..., "repoUrl": ..., "entries": {...} }
//!   index:    [ {...}, ... ]   or   { "docs": [ {...}, ... ] }
//!
//! Script (.js), the form the dashboard page <script>-loads directly:
//!   history:  window.BENCHMARK_DATA = { ... }
//!   index:    var documenterSearchIndex = { "docs": [ ... ] }
//! ```
//!
//! Script loading tolerates a trailing semicolon and surrounding whitespace;
//! anything without an assignment ahead of the payload is malformed. Writes
//! go through a temp file in the destination directory and are persisted over
//! the target, so a crash mid-write never corrupts the asset.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{ParseError, StoreError};
use crate::history::BenchmarkStore;
use crate::schema::{BenchmarkData, SearchEntry};
use crate::search::SearchIndexStore;
use crate::AssetFormat;

/// Global the dashboard page reads the history from.
const HISTORY_GLOBAL: &str = "window.BENCHMARK_DATA";

/// Global the docs search page reads the index from.
const SEARCH_GLOBAL: &str = "var documenterSearchIndex";

/// Extracts the JSON payload from a script asset.
fn script_payload(text: &str) -> Result<&str, ParseError> {
    let eq = text.find('=').ok_or(ParseError::MissingAssignment)?;
    let (prelude, rest) = text.split_at(eq);
    // A brace before the `=` means the `=` sits inside the payload, i.e. the
    // assignment prelude is missing.
    if prelude.contains('{') || prelude.contains('[') {
        return Err(ParseError::MissingAssignment);
    }
    let payload = rest[1..].trim();
    Ok(payload
        .strip_suffix(';')
        .map(str::trim_end)
        .unwrap_or(payload))
}

/// Parses a history document from asset text.
pub fn parse_history(text: &str, script: bool) -> Result<BenchmarkData, ParseError> {
    let payload = if script { script_payload(text)? } else { text };
    Ok(serde_json::from_str(payload)?)
}

/// Renders a history document as asset text (pretty JSON, trailing newline).
pub fn render_history(data: &BenchmarkData, script: bool) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string_pretty(data)?;
    Ok(if script {
        format!("{HISTORY_GLOBAL} = {json}\n")
    } else {
        format!("{json}\n")
    })
}

fn entries_from_value(value: serde_json::Value) -> Result<Vec<SearchEntry>, ParseError> {
    // The docs generator wraps the array in {"docs": [...]}; accept both.
    let value = match value {
        serde_json::Value::Object(mut map) if map.contains_key("docs") => {
            map.remove("docs").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    };
    Ok(serde_json::from_value(value)?)
}

/// Parses a search index from asset text.
pub fn parse_search_index(text: &str, script: bool) -> Result<Vec<SearchEntry>, ParseError> {
    let payload = if script { script_payload(text)? } else { text };
    entries_from_value(serde_json::from_str(payload)?)
}

/// Renders a search index as asset text.
pub fn render_search_index(
    entries: &[SearchEntry],
    script: bool,
) -> Result<String, serde_json::Error> {
    if script {
        let doc = serde_json::json!({ "docs": entries });
        Ok(format!(
            "{SEARCH_GLOBAL} = {}\n",
            serde_json::to_string_pretty(&doc)?
        ))
    } else {
        Ok(format!("{}\n", serde_json::to_string_pretty(entries)?))
    }
}

fn read_asset(path: &Path) -> Result<String, StoreError> {
    fs::read_to_string(path).map_err(|source| StoreError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Writes `contents` to `path` via a temp file in the same directory, so
/// readers only ever see the old asset or the complete new one.
fn write_atomic(path: &Path, contents: &str) -> Result<(), StoreError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents.as_bytes()).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Loads a history asset into a store. Malformed payloads are fatal; a
/// corrupt history must never be silently replaced by an empty one.
pub fn load_history(path: &Path, format: AssetFormat) -> Result<BenchmarkStore, StoreError> {
    let text = read_asset(path)?;
    let data = parse_history(&text, format.is_script(path)).map_err(|source| {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), runs = data.entries.values().map(Vec::len).sum::<usize>(), "loaded history");
    Ok(BenchmarkStore::from_data(data))
}

/// Serializes the history store and atomically replaces the asset at `path`.
pub fn save_history(
    path: &Path,
    store: &BenchmarkStore,
    format: AssetFormat,
) -> Result<(), StoreError> {
    let text =
        render_history(store.data(), format.is_script(path)).map_err(|source| StoreError::Encode {
            path: path.to_path_buf(),
            source,
        })?;
    write_atomic(path, &text)?;
    debug!(path = %path.display(), runs = store.run_count(), "saved history");
    Ok(())
}

/// Loads a search index asset into a store.
pub fn load_search_index(path: &Path, format: AssetFormat) -> Result<SearchIndexStore, StoreError> {
    let text = read_asset(path)?;
    let entries = parse_search_index(&text, format.is_script(path)).map_err(|source| {
        StoreError::Malformed {
            path: path.to_path_buf(),
            source,
        }
    })?;
    debug!(path = %path.display(), entries = entries.len(), "loaded search index");
    Ok(SearchIndexStore::from_entries(entries))
}

/// Serializes the search index and atomically replaces the asset at `path`.
pub fn save_search_index(
    path: &Path,
    store: &SearchIndexStore,
    format: AssetFormat,
) -> Result<(), StoreError> {
    let text = render_search_index(store.entries(), format.is_script(path)).map_err(|source| {
        StoreError::Encode {
            path: path.to_path_buf(),
            source,
        }
    })?;
    write_atomic(path, &text)?;
    debug!(path = %path.display(), entries = store.len(), "saved search index");
    Ok(())
}
