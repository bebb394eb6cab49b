//! Accessibility Scanner CLI

use a11y_core::{
    check_for_serif_fonts,
    serif::serif_fonts,
    report::{self, ReportFormat},
    FailurePolicy, JsonDirSink, MemoryStore, ScanConfig, ScanOutcome, Scanner,
};
use a11y_tools::{
    wcag_zoo_registry, FetchConfig, PageFetcher, PageSource, ToolConfig, ZooValidator,
    ZOO_VALIDATORS,
};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "a11y-scan")]
#[command(about = "WCAG accessibility checks for a single URL")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Python interpreter with wcag_zoo installed
    #[arg(long, global = true, default_value = "python3")]
    python: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a URL and run every validator over it
    Scan {
        /// URL to check
        #[arg(short, long)]
        url: String,

        /// Output format (json, text)
        #[arg(short, long, default_value = "text")]
        output: ReportFormat,

        /// Output file (defaults to stdout)
        #[arg(short = 'O', long)]
        output_file: Option<PathBuf>,

        /// Keep going when a validator fails or returns malformed output
        #[arg(long)]
        skip_failing_validators: bool,

        /// Timeout for each validator run (seconds)
        #[arg(long, default_value = "120")]
        timeout: u64,

        /// Timeout for the page fetch (seconds)
        #[arg(long, default_value = "30")]
        fetch_timeout: u64,

        /// Write each validator's raw output under this directory
        #[arg(long)]
        diagnostics_dir: Option<PathBuf>,
    },

    /// Run only the serif font check over a local file (--verbose lists the families)
    Serif {
        /// Path to an HTML or CSS file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the validators and whether they can run here
    Validators,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set subscriber");

    let tools = ToolConfig {
        python: cli.python,
        ..Default::default()
    };

    match cli.command {
        Commands::Scan {
            url,
            output,
            output_file,
            skip_failing_validators,
            timeout,
            fetch_timeout,
            diagnostics_dir,
        } => {
            let tools = ToolConfig {
                timeout_secs: timeout,
                ..tools
            };
            let fetch = FetchConfig {
                timeout_secs: fetch_timeout,
                ..Default::default()
            };
            let policy = if skip_failing_validators {
                FailurePolicy::SkipValidator
            } else {
                FailurePolicy::Abort
            };
            cmd_scan(url, output, output_file, tools, fetch, policy, diagnostics_dir).await;
        }
        Commands::Serif { file } => {
            cmd_serif(file, cli.verbose);
        }
        Commands::Validators => {
            cmd_validators(tools).await;
        }
    }
}

async fn cmd_scan(
    url: String,
    format: ReportFormat,
    output_file: Option<PathBuf>,
    tools: ToolConfig,
    fetch: FetchConfig,
    failure_policy: FailurePolicy,
    diagnostics_dir: Option<PathBuf>,
) {
    info!("Checking: {}", url);

    let fetcher = match PageFetcher::new(&fetch) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            error!("Could not set up HTTP client: {}", e);
            std::process::exit(1);
        }
    };

    let mut scanner = Scanner::with_config(wcag_zoo_registry(&tools), ScanConfig { failure_policy });
    if let Some(dir) = diagnostics_dir {
        scanner = scanner.with_sink(Box::new(JsonDirSink::new(dir)));
    }

    // Results only live for this run
    let store = MemoryStore::new();

    let outcome = match fetcher.fetch(&url).await {
        Ok(page) => match scanner.scan_page(&page, &store).await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Scan failed: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => ScanOutcome::fetch_failed(e),
    };

    if let Some(bundle) = outcome.bundle() {
        info!("Scan completed: {} findings", bundle.total_findings());
    }

    let content = match report::generate_report(&outcome, format) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to generate report: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(out_path) = output_file {
        if let Err(e) = std::fs::write(&out_path, &content) {
            error!("Failed to write {}: {}", out_path.display(), e);
            std::process::exit(1);
        }
        info!("Report written to: {}", out_path.display());
    } else {
        println!("{}", content);
    }

    if outcome.is_error() {
        std::process::exit(2);
    }
}

fn cmd_serif(file: PathBuf, verbose: bool) {
    match std::fs::read_to_string(&file) {
        Ok(markup) => {
            for line in serif_lines(&markup, verbose) {
                println!("{}", line);
            }
        }
        Err(e) => {
            error!("Failed to read {}: {}", file.display(), e);
            std::process::exit(1);
        }
    }
}

/// Verdict, followed by each matched family when verbose
fn serif_lines(markup: &str, verbose: bool) -> Vec<String> {
    let mut lines = vec![check_for_serif_fonts(markup).to_string()];
    if verbose {
        lines.extend(serif_fonts(markup).into_iter().map(|family| format!("  {}", family)));
    }
    lines
}

async fn cmd_validators(tools: ToolConfig) {
    println!("wcag_zoo validators (run in this order):");
    println!();

    for (module, class) in ZOO_VALIDATORS {
        let validator = ZooValidator::new(tools.clone(), module, class);
        let status = if validator.is_available().await {
            "available"
        } else {
            "unavailable"
        };
        println!("  {:<10} wcag_zoo.validators.{:<10} {}", class, module, status);
    }
}
