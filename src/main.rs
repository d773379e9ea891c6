use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use plagcheck::analysis::{AnalysisResult, Analyzer, CancellationFlag, Document, ProgressSink};
use plagcheck::config::{Config, ExportFormat};
use plagcheck::loader::DocumentLoader;
use plagcheck::output::{export, terminal};
use plagcheck::similarity::{parse_selection, AlgorithmKind};

/// plagcheck: find textual overlap between documents.
///
/// Every pair of documents is scored by up to three independent
/// similarity algorithms; pairs at or above the threshold are flagged.
#[derive(Parser)]
#[command(name = "plagcheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare every pair of documents in a directory
    Analyze {
        /// Directory with .txt, .md and .pdf files (default: PLAGCHECK_INPUT_DIR or sample-data)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Algorithms to run, comma separated, or "all"
        #[arg(short, long, value_delimiter = ',')]
        algorithms: Vec<String>,

        /// Where to save results (default: results_<timestamp>.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Flag pairs at or above this similarity, 0 to 1 (default: PLAGCHECK_THRESHOLD or 0.3)
        #[arg(short, long)]
        threshold: Option<f64>,

        /// Skip the similarity matrix
        #[arg(long)]
        no_matrix: bool,

        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,

        /// Score pairs on all CPU cores
        #[arg(long)]
        parallel: bool,

        /// Words per n-gram for the NGram algorithm
        #[arg(long)]
        ngram_size: Option<usize>,
    },

    /// Score two files against each other
    Compare {
        file_a: PathBuf,
        file_b: PathBuf,

        /// Algorithms to run, comma separated, or "all"
        #[arg(short, long, value_delimiter = ',')]
        algorithms: Vec<String>,

        /// Flag the pair at or above this similarity, 0 to 1
        #[arg(short, long)]
        threshold: Option<f64>,
    },

    /// List the available similarity algorithms
    Algorithms,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("plagcheck=info")),
        )
        .init();

    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Commands::Analyze {
            input,
            algorithms,
            output,
            format,
            threshold,
            no_matrix,
            no_progress,
            parallel,
            ngram_size,
        } => {
            // Unknown names fail here, before anything is loaded
            let kinds = parse_selection(&algorithms)?;
            if let Some(n) = ngram_size {
                config.ngram_size = n;
            }
            let threshold = resolve_threshold(threshold, &config);
            let input = input.unwrap_or_else(|| config.input_dir.clone());

            let loader = DocumentLoader::new(
                plagcheck::loader::extractors::default_extractors(),
                config.concurrency,
            );
            let documents = loader.load_directory(&input).await?;
            if documents.len() < 2 {
                println!(
                    "Need at least two documents to compare, found {} in {}",
                    documents.len(),
                    input.display()
                );
                return Ok(());
            }

            info!(
                documents = documents.len(),
                algorithms = ?kinds,
                parallel,
                "Analyzing"
            );

            let analyzer = Analyzer::new(config.algorithm_factory());
            let result = run_analysis(analyzer, documents, kinds, parallel, !no_progress).await?;

            terminal::display_summary(&result, threshold);
            if !no_matrix {
                terminal::display_matrix(&result, threshold, config.matrix_max_documents);
            }

            let path = output.unwrap_or_else(|| default_output_path(format));
            match format {
                ExportFormat::Json => export::write_json(&result, &path)?,
                ExportFormat::Csv => export::write_csv(&result, &path, threshold)?,
            }
            println!("\nResults saved to {}", path.display().to_string().bold());
        }

        Commands::Compare {
            file_a,
            file_b,
            algorithms,
            threshold,
        } => {
            let kinds = parse_selection(&algorithms)?;
            let threshold = resolve_threshold(threshold, &config);

            let loader = DocumentLoader::default();
            let a = load_one(&loader, &file_a).await?;
            let b = load_one(&loader, &file_b).await?;

            let analyzer = Analyzer::new(config.algorithm_factory());
            let result = analyzer.analyze(&[a, b], &kinds, None)?;

            match result.pair_summaries().first() {
                Some(pair) => terminal::display_pair_detail(pair, threshold),
                None => println!("{}", "No algorithm produced a score for this pair".yellow()),
            }
        }

        Commands::Algorithms => {
            terminal::display_algorithms();
        }
    }

    Ok(())
}

/// Run the analysis off the async workers, with an optional progress bar.
///
/// Ctrl-C cancels the run between pairs.
async fn run_analysis(
    analyzer: Analyzer,
    documents: Vec<Document>,
    kinds: Vec<AlgorithmKind>,
    parallel: bool,
    show_progress: bool,
) -> Result<AnalysisResult> {
    let pb = if show_progress {
        let pb = ProgressBar::new(100);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("  Comparing [{bar:30}] {pos}% ({eta})")?,
        );
        Some(pb)
    } else {
        None
    };

    let progress: Option<Box<dyn ProgressSink>> = pb.clone().map(|bar| {
        let sink = move |fraction: f64| bar.set_position((fraction * 100.0).round() as u64);
        Box::new(sink) as Box<dyn ProgressSink>
    });

    let cancel = CancellationFlag::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling analysis");
            ctrl_c.cancel();
        }
    });

    let result = if parallel {
        tokio::task::spawn_blocking(move || {
            analyzer.analyze_parallel(&documents, &kinds, progress.as_deref(), Some(&cancel))
        })
        .await
        .context("analysis task panicked")?
    } else {
        analyzer
            .analyze_async(documents, kinds, progress, cancel)
            .await
    };

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    Ok(result?)
}

async fn load_one(loader: &DocumentLoader, path: &Path) -> Result<Document> {
    loader
        .load_file(path)
        .await
        .with_context(|| format!("Could not load {}", path.display()))
}

fn resolve_threshold(flag: Option<f64>, config: &Config) -> f64 {
    flag.map_or(config.threshold, |t| t.clamp(0.0, 1.0))
}

fn default_output_path(format: ExportFormat) -> PathBuf {
    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    PathBuf::from(format!("results_{stamp}.{}", format.extension()))
}
