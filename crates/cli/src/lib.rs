use anyhow::{bail, Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokdiff_tokenizer::{NormalizingTokenizer, TokenizerConfig};

use batch::{BatchOptions, PairSpec};
use flags::TokenizerPreset;
use manifest::Manifest;
use report::{BatchReport, PairOutcome};

mod batch;
mod flags;
mod limits;
mod manifest;
mod report;

#[derive(Parser)]
#[command(name = "tokdiff")]
#[command(
    about = "Reorder-tolerant token diff of generated text against ground truth",
    long_about = None
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Align one expected document against one actual document
    Compare(CompareArgs),

    /// Align many document pairs from a manifest or two directories
    Batch(BatchArgs),
}

impl Commands {
    fn json(&self) -> bool {
        match self {
            Commands::Compare(args) => args.output.json,
            Commands::Batch(args) => args.output.json,
        }
    }
}

#[derive(Args)]
struct TokenizerArgs {
    /// Tokenizer preset
    #[arg(long, value_enum, default_value_t = TokenizerPreset::Standard)]
    tokenizer: TokenizerPreset,

    /// TOML file with tokenizer settings (overrides the preset and any manifest section)
    #[arg(long)]
    tokenizer_config: Option<PathBuf>,
}

#[derive(Args)]
struct OutputArgs {
    /// Output JSON format
    #[arg(long)]
    json: bool,

    /// Print the residual tokens under each row
    #[arg(long)]
    show_residuals: bool,
}

#[derive(Args)]
struct CompareArgs {
    /// Ground-truth document
    expected: PathBuf,

    /// Generated document
    actual: PathBuf,

    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args)]
struct BatchArgs {
    /// TOML manifest listing the pairs
    #[arg(long, conflicts_with_all = ["expected_dir", "actual_dir", "names"])]
    manifest: Option<PathBuf>,

    /// Directory of ground-truth documents
    #[arg(long, requires = "actual_dir")]
    expected_dir: Option<PathBuf>,

    /// Directory of generated documents, matched to expected ones by file name
    #[arg(long, requires = "expected_dir")]
    actual_dir: Option<PathBuf>,

    /// File names to compare (defaults to every file in --expected-dir)
    names: Vec<String>,

    /// Pairs aligned concurrently (defaults to TOKDIFF_JOBS, then the CPU count)
    #[arg(long, short = 'j')]
    jobs: Option<usize>,

    /// Report a pair as timed out after this many seconds
    #[arg(long)]
    pair_timeout_secs: Option<u64>,

    #[command(flatten)]
    tokenizer: TokenizerArgs,

    #[command(flatten)]
    output: OutputArgs,
}

pub async fn main_entry() -> Result<()> {
    let mut cli = Cli::parse();

    // Keep stdout clean for JSON parsing
    if cli.command.json() {
        cli.quiet = true;
    }

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    match cli.command {
        Commands::Compare(args) => run_compare(args).await,
        Commands::Batch(args) => run_batch(args).await,
    }
}

async fn run_compare(args: CompareArgs) -> Result<()> {
    let tokenizer = build_tokenizer(&args.tokenizer, None)?;
    let pair = PairSpec {
        name: args
            .actual
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| args.actual.display().to_string()),
        expected: args.expected,
        actual: args.actual,
    };

    let options = BatchOptions {
        jobs: 1,
        pair_timeout: None,
    };
    let reports = batch::run_pairs(vec![pair], tokenizer, options).await;
    let report = BatchReport::new(reports);

    if args.output.json {
        let single = report.pairs.first().context("compare produced no report")?;
        println!("{}", serde_json::to_string_pretty(single)?);
    } else {
        print!("{}", report::render_text(&report, args.output.show_residuals));
    }

    finish(&report)
}

async fn run_batch(args: BatchArgs) -> Result<()> {
    let (pairs, manifest_tokenizer) = match (&args.manifest, &args.expected_dir, &args.actual_dir)
    {
        (Some(path), _, _) => {
            let manifest = Manifest::load(path)?;
            let base = path.parent().unwrap_or(Path::new("."));
            (manifest.resolve(base)?, manifest.tokenizer)
        }
        (None, Some(expected_dir), Some(actual_dir)) => (
            manifest::pairs_from_dirs(expected_dir, actual_dir, &args.names)?,
            None,
        ),
        _ => bail!("batch needs --manifest or both --expected-dir and --actual-dir"),
    };

    let tokenizer = build_tokenizer(&args.tokenizer, manifest_tokenizer)?;
    let options = BatchOptions {
        jobs: limits::resolve_jobs(args.jobs),
        pair_timeout: args.pair_timeout_secs.map(Duration::from_secs),
    };

    let reports = batch::run_pairs(pairs, tokenizer, options).await;
    let report = BatchReport::new(reports);

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report::render_text(&report, args.output.show_residuals));
    }

    finish(&report)
}

/// Residuals are results; only pairs that could not be aligned fail the run.
fn finish(report: &BatchReport) -> Result<()> {
    let summary = &report.summary;
    log::info!(
        "{} pair(s): {} aligned ({} clean), {} failed, {} timed out; residual tokens {}/{}",
        summary.pairs,
        summary.aligned,
        summary.clean,
        summary.failed,
        summary.timed_out,
        summary.residual_expected_total,
        summary.residual_actual_total
    );

    if summary.unprocessed() > 0 {
        let names: Vec<&str> = report
            .pairs
            .iter()
            .filter(|pair| !matches!(pair.outcome, PairOutcome::Aligned(_)))
            .map(|pair| pair.name.as_str())
            .collect();
        bail!(
            "{} of {} pair(s) could not be aligned: {}",
            summary.unprocessed(),
            summary.pairs,
            names.join(", ")
        );
    }
    Ok(())
}

fn build_tokenizer(
    args: &TokenizerArgs,
    from_manifest: Option<TokenizerConfig>,
) -> Result<Arc<NormalizingTokenizer>> {
    let config = match &args.tokenizer_config {
        Some(path) => load_tokenizer_config(path)?,
        None => match from_manifest {
            Some(config) if args.tokenizer == TokenizerPreset::Standard => config,
            _ => args.tokenizer.as_domain(),
        },
    };
    log::debug!("Tokenizer config: {config:?}");

    let tokenizer = NormalizingTokenizer::new(config).context("Invalid tokenizer configuration")?;
    Ok(Arc::new(tokenizer))
}

fn load_tokenizer_config(path: &Path) -> Result<TokenizerConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tokenizer config {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("Invalid tokenizer config {}", path.display()))
}
