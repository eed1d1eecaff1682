//! Deterministic synthetic histories and search indexes.
//!
//! Used by the `generate` subcommand, the Criterion suites and tests to get
//! realistic store contents of any size without a live CI pipeline. All
//! output is a pure function of the config: per-run seeds derive from the
//! master seed and run index, so regeneration is reproducible.

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;
use sha2::{Digest, Sha256};

use crate::history::BenchmarkStore;
use crate::schema::{
    BenchmarkData, BenchmarkRun, Category, Commit, CommitAuthor, Measurement, SearchEntry,
};

/// Configuration for synthetic history generation.
#[derive(Debug, Clone)]
pub struct SampleConfig {
    /// Tool tag the runs are filed under.
    pub tool: String,
    /// Repository URL stamped into the generated document.
    pub repo_url: String,
    /// Number of runs to generate.
    pub runs: usize,
    /// Measurements per run.
    pub benches_per_run: usize,
    /// Master seed for deterministic generation.
    pub seed: u64,
    /// Epoch-ms timestamp of the first run.
    pub start: i64,
    /// Nominal spacing between runs; actual timestamps add small jitter.
    pub interval_ms: i64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            tool: "cargo".to_string(),
            repo_url: "https://github.com/example/project".to_string(),
            runs: 50,
            benches_per_run: 4,
            seed: 42,
            start: 1_700_000_000_000,
            interval_ms: 3_600_000,
        }
    }
}

fn per_run_seed(master_seed: u64, index: usize) -> u64 {
    master_seed
        .wrapping_add(index as u64)
        .wrapping_mul(0x517cc1b727220a95)
}

/// 40-hex commit id derived from the seed and run index.
fn commit_id(master_seed: u64, index: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(master_seed.to_le_bytes());
    hasher.update((index as u64).to_le_bytes());
    let digest = hasher.finalize();
    let mut id = String::with_capacity(40);
    for byte in digest.iter().take(20) {
        id.push_str(&format!("{byte:02x}"));
    }
    id
}

fn generate_run(config: &SampleConfig, index: usize) -> BenchmarkRun {
    let mut rng = ChaCha8Rng::seed_from_u64(per_run_seed(config.seed, index));

    // CI occasionally re-runs a commit; mirror that by reusing the previous
    // run's commit id for every fifth run.
    let commit_index = if index % 5 == 4 { index - 1 } else { index };
    let id = commit_id(config.seed, commit_index);

    let jitter = if config.interval_ms > 10 {
        rng.gen_range(0..config.interval_ms / 10)
    } else {
        0
    };

    let benches = (0..config.benches_per_run)
        .map(|b| {
            let base = 20.0 * (b + 1) as f64;
            Measurement {
                name: format!("suite/case_{b}"),
                value: base * (0.9 + 0.2 * rng.gen::<f64>()),
                unit: "ns/iter".to_string(),
                extra: Some(format!("iterations={}", rng.gen_range(100..10_000))),
            }
        })
        .collect();

    BenchmarkRun {
        commit: Commit {
            id: id.clone(),
            message: format!("Commit {} for run {index}", &id[..8]),
            author: CommitAuthor {
                name: "Sample Dev".to_string(),
                email: "sample@example.com".to_string(),
                rest: serde_json::Map::new(),
            },
            rest: serde_json::Map::new(),
        },
        date: config.start + index as i64 * config.interval_ms + jitter,
        tool: config.tool.clone(),
        benches,
    }
}

/// Generates the runs for a synthetic history, in run-index order.
///
/// Generation is parallel over run indices; the indexed collect preserves
/// order, so the result is identical to a sequential pass.
pub fn sample_runs(config: &SampleConfig) -> Vec<BenchmarkRun> {
    (0..config.runs)
        .into_par_iter()
        .map(|i| generate_run(config, i))
        .collect()
}

/// Generates a full synthetic history store.
pub fn sample_history(config: &SampleConfig) -> BenchmarkStore {
    let runs = sample_runs(config);
    let last_update = runs.iter().map(|r| r.date).max().unwrap_or(0);
    let mut entries = BTreeMap::new();
    entries.insert(config.tool.clone(), runs);
    BenchmarkStore::from_data(BenchmarkData {
        last_update,
        repo_url: config.repo_url.clone(),
        entries,
    })
}

/// Generates a deterministic search index of `count` entries.
pub fn sample_index(count: usize, seed: u64) -> Vec<SearchEntry> {
    const CATEGORIES: [Category; 4] = [
        Category::Section,
        Category::Method,
        Category::Function,
        Category::Type,
    ];
    const WORDS: [&str; 8] = [
        "contract", "tensor", "index", "bundle", "permute", "trace", "reshape", "kernel",
    ];

    (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = ChaCha8Rng::seed_from_u64(per_run_seed(seed, i));
            let word = WORDS[rng.gen_range(0..WORDS.len())];
            let other = WORDS[rng.gen_range(0..WORDS.len())];
            SearchEntry {
                location: format!("api/#entry-{i}"),
                page: "API Reference".to_string(),
                title: format!("{word}_{i}"),
                text: format!("Documentation for {word} over {other} arguments."),
                category: CATEGORIES[i % CATEGORIES.len()],
            }
        })
        .collect()
}
