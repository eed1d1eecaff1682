use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Rejection reasons for [`crate::history::BenchmarkStore::append`].
///
/// Unknown-tool lookups are not errors (they yield an empty history), so
/// there is deliberately no not-found variant anywhere in this module.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("run has no measurements")]
    EmptyMeasurements,

    #[error("run timestamp must be positive, got {0}")]
    NonPositiveTimestamp(i64),
}

/// Text-level failures while decoding an asset payload.
#[derive(Debug, Error)]
pub enum ParseError {
    /// A script asset must assign its payload to a global, e.g.
    /// `window.BENCHMARK_DATA = {...}`.
    #[error("no `=` assignment ahead of the payload in script asset")]
    MissingAssignment,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Failures while loading or persisting an asset file. Parse failures are
/// fatal to store initialization; a corrupt history must never be silently
/// replaced by an empty one.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed asset {}", .path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("failed to encode {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
