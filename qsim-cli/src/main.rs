//! qsim - SWAP-test similarity
//! Command-line interface comparing two vectors or two texts with a simulated quantum SWAP test

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use qsim_core::prelude::*;
use qsim_core::{parse_vector_arg, SimilarityConfig, SimilarityReport, DEFAULT_SHOTS};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "qsim")]
#[command(author = "Silvano Neto")]
#[command(version = "2026.1.16")]
#[command(about = "Quantum superposition SWAP-test similarity (vectors & text)", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every comparison
#[derive(clap::Args, Debug, Clone)]
struct RunArgs {
    /// Simulation shots [default: 8192, env QSIM_SHOTS]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    shots: Option<u64>,

    /// Seed for measurement sampling [env QSIM_SEED]
    #[arg(long)]
    seed: Option<u64>,

    /// Use expected counts instead of sampling
    #[arg(long)]
    exact: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two numeric vectors
    Vectors {
        /// Vector A: JSON, CSV, or path to JSON file
        #[arg(value_name = "VECTOR1", allow_hyphen_values = true)]
        vector1: String,

        /// Vector B: JSON, CSV, or path to JSON file
        #[arg(value_name = "VECTOR2", allow_hyphen_values = true)]
        vector2: String,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Compare two texts (bag-of-words over shared vocab)
    Text {
        /// Text A (inline)
        #[arg(long, conflicts_with = "text1_file", required_unless_present = "text1_file")]
        text1: Option<String>,

        /// Path to text A file
        #[arg(long, value_name = "FILE")]
        text1_file: Option<PathBuf>,

        /// Text B (inline)
        #[arg(long, conflicts_with = "text2_file", required_unless_present = "text2_file")]
        text2: Option<String>,

        /// Path to text B file
        #[arg(long, value_name = "FILE")]
        text2_file: Option<PathBuf>,

        /// Bag-of-words weighting: tf (term frequency) or bin (binary presence) [default: tf]
        #[arg(long, value_parser = parse_feature_mode)]
        feature_mode: Option<FeatureMode>,

        /// Max vocabulary size (padded to power-of-two for encoding) [default: 1024]
        #[arg(long, value_parser = parse_max_features)]
        max_features: Option<usize>,

        #[command(flatten)]
        run: RunArgs,
    },

    /// Show defaults and backend information
    Info,
}

fn parse_feature_mode(s: &str) -> Result<FeatureMode, String> {
    s.parse::<FeatureMode>().map_err(|e| e.to_string())
}

fn parse_max_features(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = SimilarityConfig::from_env();

    let outcome = match cli.command {
        Commands::Vectors { vector1, vector2, run } => {
            vectors_command(&vector1, &vector2, &run, &config)
        }

        Commands::Text {
            text1,
            text1_file,
            text2,
            text2_file,
            feature_mode,
            max_features,
            run,
        } => read_text(text1, text1_file.as_deref())
            .and_then(|t1| Ok((t1, read_text(text2, text2_file.as_deref())?)))
            .and_then(|(t1, t2)| text_command(&t1, &t2, feature_mode, max_features, &run, &config)),

        Commands::Info => {
            print_info(&config);
            Ok(())
        }
    };

    if let Err(e) = outcome {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(2);
    }
}

fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("qsim=warn")),
        1 => EnvFilter::new("qsim=debug"),
        _ => EnvFilter::new("qsim=trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

// ============================================================================
// Comparison commands
// ============================================================================

/// Resolve backend from flags and environment
fn make_backend(run: &RunArgs, config: &SimilarityConfig) -> Box<dyn Backend> {
    if run.exact {
        return Box::new(ExactBackend::new().with_max_qubits(config.max_qubits));
    }

    let mut simulator = StatevectorSimulator::new().with_max_qubits(config.max_qubits);
    if let Some(seed) = run.seed.or(config.seed) {
        simulator = simulator.with_seed(seed);
    }
    Box::new(simulator)
}

fn compare(a: &[f64], b: &[f64], run: &RunArgs, config: &SimilarityConfig) -> Result<(usize, u64, SimilarityResult)> {
    let shots = run.shots.unwrap_or(config.shots);
    let (state_a, state_b) = encode_pair(a, b).context("encoding failed")?;

    let backend = make_backend(run, config);
    tracing::info!(
        backend = backend.name(),
        shots,
        qubits_per_register = state_a.num_qubits(),
        "running swap test"
    );

    let result = SwapTest::new(backend)
        .with_shots(shots)
        .estimate(&state_a, &state_b)?;
    Ok((state_a.num_qubits(), shots, result))
}

fn vectors_command(vector1: &str, vector2: &str, run: &RunArgs, config: &SimilarityConfig) -> Result<()> {
    let v1 = parse_vector_arg(vector1).context("vector A")?;
    let v2 = parse_vector_arg(vector2).context("vector B")?;

    let (n_qubits, shots, result) = compare(&v1, &v2, run, config)?;
    print_report(&SimilarityReport::vectors(n_qubits, shots, result))
}

fn read_text(inline: Option<String>, file: Option<&Path>) -> Result<String> {
    match (inline, file) {
        (_, Some(path)) => {
            fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
        }
        (Some(text), None) => Ok(text),
        (None, None) => anyhow::bail!("missing text input"),
    }
}

fn text_command(
    t1: &str,
    t2: &str,
    feature_mode: Option<FeatureMode>,
    max_features: Option<usize>,
    run: &RunArgs,
    config: &SimilarityConfig,
) -> Result<()> {
    let mode = feature_mode.unwrap_or(config.feature_mode);
    let max_features = max_features.unwrap_or(config.max_features);

    let (v1, v2) = text_to_vectors(t1, t2, mode, max_features);
    tracing::debug!(vocab = v1.len(), %mode, "vectorized texts");

    let (n_qubits, shots, result) = compare(&v1, &v2, run, config)?;
    print_report(&SimilarityReport::text(mode, max_features, n_qubits, shots, result))
}

fn print_report(report: &SimilarityReport) -> Result<()> {
    println!("{}", report.to_json_pretty()?);
    Ok(())
}

fn print_info(config: &SimilarityConfig) {
    println!("{}", "qsim - SWAP-test similarity".bold());
    println!();
    println!("{}", "Circuit:".green().bold());
    println!("  q0 ancilla, q1..qn register A, qn+1..q2n register B, 1 classical bit");
    println!("  H(q0) · CSWAP(q0, A[i], B[i]) · H(q0) · measure(q0)");
    println!("  fidelity = clamp(2·p0 − 1, 0, 1), overlap = sqrt(fidelity)");
    println!();
    println!("{}", "Defaults:".green().bold());
    println!("  {:<14} {} (built-in {})", "shots".cyan(), config.shots, DEFAULT_SHOTS);
    println!("  {:<14} {}", "feature mode".cyan(), config.feature_mode);
    println!("  {:<14} {}", "max features".cyan(), config.max_features);
    println!("  {:<14} {}", "max qubits".cyan(), config.max_qubits);
    match config.seed {
        Some(seed) => println!("  {:<14} {}", "seed".cyan(), seed),
        None => println!("  {:<14} entropy", "seed".cyan()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    fn run_args() -> RunArgs {
        RunArgs {
            shots: Some(1024),
            seed: None,
            exact: true,
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_vectors() {
        let cli = Cli::try_parse_from(["qsim", "vectors", "[1,0]", "0,1", "--shots", "256"]).unwrap();
        match cli.command {
            Commands::Vectors { vector1, vector2, run } => {
                assert_eq!(vector1, "[1,0]");
                assert_eq!(vector2, "0,1");
                assert_eq!(run.shots, Some(256));
                assert!(!run.exact);
            }
            _ => panic!("expected vectors command"),
        }
    }

    #[test]
    fn test_negative_csv_vector_accepted() {
        let cli = Cli::try_parse_from(["qsim", "vectors", "-1,2", "3,-4"]).unwrap();
        assert!(matches!(cli.command, Commands::Vectors { .. }));
    }

    #[test]
    fn test_zero_shots_rejected() {
        assert!(Cli::try_parse_from(["qsim", "vectors", "1", "1", "--shots", "0"]).is_err());
    }

    #[test]
    fn test_parse_text_modes() {
        let cli = Cli::try_parse_from([
            "qsim", "text", "--text1", "a b", "--text2", "b c", "--feature-mode", "bin", "--max-features", "8",
        ])
        .unwrap();
        match cli.command {
            Commands::Text { feature_mode, max_features, .. } => {
                assert_eq!(feature_mode, Some(FeatureMode::Bin));
                assert_eq!(max_features, Some(8));
            }
            _ => panic!("expected text command"),
        }

        assert!(Cli::try_parse_from(["qsim", "text", "--text1", "a", "--text2", "b", "--feature-mode", "tfidf"]).is_err());
    }

    #[test]
    fn test_text_inputs_are_exclusive_and_required() {
        assert!(Cli::try_parse_from(["qsim", "text", "--text1", "a", "--text1-file", "x", "--text2", "b"]).is_err());
        assert!(Cli::try_parse_from(["qsim", "text", "--text1", "a"]).is_err());
    }

    #[test]
    fn test_read_text_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Hello, hello WORLD").unwrap();
        assert_eq!(read_text(None, Some(file.path())).unwrap(), "Hello, hello WORLD");
        assert_eq!(read_text(Some("inline".into()), None).unwrap(), "inline");
    }

    #[test]
    fn test_compare_identical_vectors() {
        let config = SimilarityConfig::default();
        let (n, shots, result) = compare(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &run_args(), &config).unwrap();
        assert_eq!(n, 2);
        assert_eq!(shots, 1024);
        assert!((result.fidelity - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_compare_mismatched_vectors_fails() {
        let config = SimilarityConfig::default();
        let err = compare(&[1.0, 0.0], &[1.0, 0.0, 0.0], &run_args(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("Shape mismatch"));
    }

    #[test]
    fn test_compare_zero_vector_names_operand() {
        let config = SimilarityConfig::default();
        let err = compare(&[1.0], &[0.0], &run_args(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("vector B"));
    }
}
