use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use bench_ledger::sample::SampleConfig;
use bench_ledger::{io, AssetFormat, BenchmarkRun, BenchmarkStore, SearchIndexStore};

#[derive(Parser, Debug)]
#[command(name = "bench-ledger")]
#[command(about = "Append-only benchmark history and docs search-index assets")]
struct Cli {
    /// Asset flavor for reads and writes.
    #[arg(long, value_enum, default_value_t = AssetFormat::Auto, global = true)]
    format: AssetFormat,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Append run reports to a history asset.
    Append(AppendArgs),

    /// Print the run history for one tool, oldest-appended first.
    History(HistoryArgs),

    /// Report lastUpdate, repoUrl and per-tool run counts.
    Status(StatusArgs),

    /// Atomically replace a search index asset from an entry file.
    ReplaceIndex(ReplaceIndexArgs),

    /// Case-insensitive substring search over a search index asset.
    Query(QueryArgs),

    /// Write a deterministic synthetic history asset.
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
struct AppendArgs {
    /// History asset to append to; created if absent (requires --repo-url).
    #[arg(long, value_name = "FILE")]
    store: PathBuf,

    /// Run report files, each a single run JSON object.
    #[arg(value_name = "REPORT")]
    reports: Vec<PathBuf>,

    /// Append every .json file under this directory (recursive, sorted).
    #[arg(long, value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Repository URL; seeds a fresh store, overrides an existing one.
    #[arg(long, value_name = "URL")]
    repo_url: Option<String>,
}

#[derive(Args, Debug)]
struct HistoryArgs {
    #[arg(long, value_name = "FILE")]
    store: PathBuf,

    /// Tool tag to list; unknown tools print an empty history.
    #[arg(value_name = "TOOL")]
    tool: String,

    /// Emit the raw run objects instead of the human summary.
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct StatusArgs {
    #[arg(long, value_name = "FILE")]
    store: PathBuf,

    /// Also report search-index entry counts per category.
    #[arg(long, value_name = "FILE")]
    index: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ReplaceIndexArgs {
    /// Search index asset to replace.
    #[arg(long, value_name = "FILE")]
    index: PathBuf,

    /// Entry file: a JSON array or a {"docs": [...]} object.
    #[arg(value_name = "ENTRIES")]
    entries: PathBuf,
}

#[derive(Args, Debug)]
struct QueryArgs {
    #[arg(long, value_name = "FILE")]
    index: PathBuf,

    #[arg(value_name = "TERM")]
    term: String,

    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    /// Where to write the generated history asset.
    #[arg(long, short = 'o', value_name = "FILE")]
    out: PathBuf,

    #[arg(long, default_value = "cargo")]
    tool: String,

    #[arg(long, default_value = "https://github.com/example/project")]
    repo_url: String,

    /// Number of runs to generate.
    #[arg(long, short = 'n', default_value_t = 50)]
    runs: usize,

    /// Measurements per run.
    #[arg(long, default_value_t = 4)]
    benches: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Epoch-ms timestamp of the first run.
    #[arg(long, default_value_t = 1_700_000_000_000)]
    start: i64,

    /// Nominal spacing between runs in milliseconds.
    #[arg(long, default_value_t = 3_600_000)]
    interval_ms: i64,
}

fn main() {
    init_tracing();

    if let Err(err) = run() {
        error!(error = %err, "command failed");
        for cause in err.chain().skip(1) {
            error!(cause = %cause, "caused by");
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let format = cli.format;

    match cli.cmd {
        Command::Append(args) => cmd_append(format, args),
        Command::History(args) => cmd_history(format, args),
        Command::Status(args) => cmd_status(format, args),
        Command::ReplaceIndex(args) => cmd_replace_index(format, args),
        Command::Query(args) => cmd_query(format, args),
        Command::Generate(args) => cmd_generate(format, args),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Every .json file under `root`, sorted for a deterministic append order.
fn collect_reports(root: &Path) -> Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(root).follow_links(false) {
        let entry =
            entry.with_context(|| format!("failed to walk report dir {}", root.display()))?;
        let path = entry.path();
        if entry.file_type().is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
        {
            out.push(path.to_path_buf());
        }
    }
    out.sort();
    Ok(out)
}

fn cmd_append(format: AssetFormat, args: AppendArgs) -> Result<()> {
    let mut reports = args.reports;
    if let Some(dir) = &args.dir {
        reports.extend(collect_reports(dir)?);
    }
    if reports.is_empty() {
        bail!("no run reports given (pass report files or --dir)");
    }

    let mut store = if args.store.exists() {
        io::load_history(&args.store, format)?
    } else {
        let repo_url = args.repo_url.clone().with_context(|| {
            format!(
                "--repo-url is required to seed a new history at {}",
                args.store.display()
            )
        })?;
        BenchmarkStore::new(repo_url)
    };
    if let Some(repo_url) = args.repo_url {
        store.set_repo_url(repo_url);
    }

    // All appends happen in memory; a rejected run aborts before the asset
    // on disk is touched.
    for report in &reports {
        let text = fs::read_to_string(report)
            .with_context(|| format!("failed to read run report {}", report.display()))?;
        let run: BenchmarkRun = serde_json::from_str(&text)
            .with_context(|| format!("malformed run report {}", report.display()))?;
        store
            .append(run)
            .with_context(|| format!("rejected run report {}", report.display()))?;
    }

    io::save_history(&args.store, &store, format)?;
    info!(
        appended = reports.len(),
        total = store.run_count(),
        store = %args.store.display(),
        "appended runs"
    );
    Ok(())
}

fn cmd_history(format: AssetFormat, args: HistoryArgs) -> Result<()> {
    let store = io::load_history(&args.store, format)?;
    let runs = store.history(&args.tool);

    if args.json {
        println!("{}", serde_json::to_string_pretty(runs)?);
        return Ok(());
    }

    for run in runs {
        let commit = run.commit.id.get(..8).unwrap_or(&run.commit.id);
        match run.benches.first() {
            Some(first) => println!(
                "{commit}  {}  {} benches  {} = {} {}",
                run.date,
                run.benches.len(),
                first.name,
                first.value,
                first.unit
            ),
            None => println!("{commit}  {}  0 benches", run.date),
        }
    }
    Ok(())
}

fn cmd_status(format: AssetFormat, args: StatusArgs) -> Result<()> {
    let store = io::load_history(&args.store, format)?;
    info!(
        last_update = store.last_update(),
        repo_url = store.repo_url(),
        tools = store.tools().count(),
        runs = store.run_count(),
        "history status"
    );
    for tool in store.tools() {
        info!(tool, runs = store.history(tool).len(), "tool history");
    }

    if let Some(index_path) = &args.index {
        let index = io::load_search_index(index_path, format)?;
        info!(entries = index.len(), "search index status");
        let mut per_category = std::collections::BTreeMap::new();
        for entry in index.entries() {
            *per_category.entry(entry.category.as_str()).or_insert(0usize) += 1;
        }
        for (category, count) in per_category {
            info!(category, count, "index category");
        }
    }
    Ok(())
}

fn cmd_replace_index(format: AssetFormat, args: ReplaceIndexArgs) -> Result<()> {
    let text = fs::read_to_string(&args.entries)
        .with_context(|| format!("failed to read entry file {}", args.entries.display()))?;
    // The entry file is plain JSON regardless of the asset format.
    let entries = io::parse_search_index(&text, false)
        .with_context(|| format!("malformed entry file {}", args.entries.display()))?;

    let mut index = if args.index.exists() {
        io::load_search_index(&args.index, format)?
    } else {
        SearchIndexStore::new()
    };
    index.replace(entries);

    io::save_search_index(&args.index, &index, format)?;
    info!(
        entries = index.len(),
        index = %args.index.display(),
        "replaced search index"
    );
    Ok(())
}

fn cmd_query(format: AssetFormat, args: QueryArgs) -> Result<()> {
    let index = io::load_search_index(&args.index, format)?;
    let hits = index.query(&args.term);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    for entry in hits {
        println!(
            "{}: {} [{}]",
            entry.location,
            entry.title,
            entry.category.as_str()
        );
    }
    Ok(())
}

fn cmd_generate(format: AssetFormat, args: GenerateArgs) -> Result<()> {
    let config = SampleConfig {
        tool: args.tool,
        repo_url: args.repo_url,
        runs: args.runs,
        benches_per_run: args.benches,
        seed: args.seed,
        start: args.start,
        interval_ms: args.interval_ms,
    };
    let store = bench_ledger::sample::sample_history(&config);
    io::save_history(&args.out, &store, format)?;
    info!(
        runs = store.run_count(),
        tool = config.tool,
        seed = config.seed,
        out = %args.out.display(),
        "generated history"
    );
    Ok(())
}
