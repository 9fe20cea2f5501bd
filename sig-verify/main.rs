use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use log::{debug, error, info};
use sig_verify::{Verifier, VerifierConfig, VerifyError, save_matches};
use thiserror::Error;

#[derive(Debug, Parser)]
#[command(name = "sigverify", version, about = "Compare a test signature against a reference signature")]
struct CliArgs {
    /// Trusted reference signature image.
    #[arg(value_name = "REFERENCE")]
    reference: PathBuf,
    /// Signature image to verify.
    #[arg(value_name = "TEST")]
    test: PathBuf,
    /// Verifier configuration file (.toml or .json).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Grayscale binarization threshold (0-255).
    #[arg(long, value_name = "N")]
    threshold: Option<u8>,
    /// Match ratio that must be exceeded to accept the signature.
    #[arg(long, value_name = "RATIO")]
    cutoff: Option<f64>,
    /// Keep one-sided nearest neighbours instead of mutual ones.
    #[arg(long)]
    no_cross_check: bool,
    /// Maximum keypoints per image.
    #[arg(long, value_name = "N")]
    max_features: Option<usize>,
    /// Worker threads for feature extraction.
    #[arg(long, value_name = "N")]
    threads: Option<usize>,
    /// Report format.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write a side-by-side match visualization to this image file.
    #[arg(long, value_name = "FILE")]
    matches_out: Option<PathBuf>,
    /// Log verbosity level (overrides RUST_LOG).
    #[arg(long, value_enum)]
    log_level: Option<LogLevel>,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Markdown,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Verify(#[from] VerifyError),
    #[error("Failed to render report: {0}")]
    Render(#[from] serde_json::Error),
    #[error("Failed to write match visualization to {path}: {source}")]
    SaveMatches {
        path: PathBuf,
        source: image::ImageError,
    },
}

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    init_logger(&resolve_log_level(&cli));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::from(1)
        }
    }
}

fn run(cli: &CliArgs) -> Result<(), CliError> {
    let mut config = match &cli.config {
        Some(path) => VerifierConfig::load(path).map_err(VerifyError::from)?,
        None => VerifierConfig::default(),
    };
    for entry in apply_overrides(&mut config, cli) {
        debug!("CLI override: {}", entry);
    }
    info!("{}", config.summary());

    let reference = read(&cli.reference)?;
    let test = read(&cli.test)?;

    let verifier = Verifier::new(config)?;
    let verification = verifier.verify_detailed(&reference, &test)?;

    if let Some(path) = &cli.matches_out {
        save_matches(&verification, path).map_err(|source| CliError::SaveMatches {
            path: path.clone(),
            source,
        })?;
        info!("Wrote match visualization to {}", path.display());
    }

    let report = &verification.report;
    match cli.format {
        OutputFormat::Text => println!("{}", report),
        OutputFormat::Markdown => print!("{}", report.analysis()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn read(path: &Path) -> Result<Vec<u8>, CliError> {
    fs::read(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_overrides(config: &mut VerifierConfig, cli: &CliArgs) -> Vec<String> {
    let mut overrides = Vec::new();
    if let Some(threshold) = cli.threshold {
        config.binarize_threshold = threshold;
        overrides.push(format!("binarize_threshold={}", threshold));
    }
    if let Some(cutoff) = cli.cutoff {
        config.match_ratio_cutoff = cutoff;
        overrides.push(format!("match_ratio_cutoff={}", cutoff));
    }
    if cli.no_cross_check {
        config.cross_check = false;
        overrides.push("cross_check=false".to_string());
    }
    if let Some(max_features) = cli.max_features {
        config.features.max_features = max_features;
        overrides.push(format!("max_features={}", max_features));
    }
    if let Some(threads) = cli.threads {
        config.features.n_threads = threads;
        overrides.push(format!("n_threads={}", threads));
    }
    overrides
}

fn resolve_log_level(cli: &CliArgs) -> String {
    if let Some(level) = cli.log_level {
        return level.as_str().to_string();
    }
    if let Ok(level) = std::env::var("RUST_LOG") {
        if !level.trim().is_empty() {
            return level;
        }
    }
    "warn".to_string()
}

fn init_logger(level: &str) {
    let mut builder = env_logger::Builder::new();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(log::LevelFilter::Warn);
    builder.parse_filters(level);
    if let Err(err) = builder.try_init() {
        eprintln!("Failed to initialize logger: {}", err);
    }
}
