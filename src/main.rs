//! Sitemap Audit main entry point
//!
//! This is the command-line interface for the sitemap SEO auditor.

use clap::{Parser, Subcommand};
use sitemap_audit::categorize::MAIN_CATEGORY;
use sitemap_audit::config::{load_config_with_hash, Config};
use sitemap_audit::output::{print_statistics, write_markdown_summary};
use sitemap_audit::{server, Auditor};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitemap Audit: on-page SEO checks for every page a sitemap lists
///
/// Resolves a sitemap (or sitemap index), fetches every listed page,
/// extracts title, description, H1, canonical and robots signals, and writes
/// a per-category spreadsheet report.
#[derive(Parser, Debug)]
#[command(name = "sitemap-audit")]
#[command(version)]
#[command(about = "On-page SEO auditor driven by XML sitemaps", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Audit a sitemap and write the report to the output directory
    Analyze {
        /// URL of the sitemap or sitemap index
        #[arg(value_name = "SITEMAP_URL")]
        sitemap_url: String,

        /// Directory to write the report into (overrides the config)
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Also write a markdown summary to this path
        #[arg(long, value_name = "PATH")]
        summary: Option<PathBuf>,
    },

    /// Serve the JSON API
    Serve {
        /// Socket address to listen on (overrides the config)
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },

    /// Print the category table in match order
    Categories,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match load_configuration(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    let result = match cli.command {
        Command::Analyze {
            sitemap_url,
            output,
            summary,
        } => handle_analyze(config, &sitemap_url, output, summary).await,
        Command::Serve { bind } => handle_serve(config, bind).await,
        Command::Categories => handle_categories(&config),
    };

    if let Err(e) = &result {
        tracing::error!("{}", e);
    }
    result
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitemap_audit=info,warn"),
            1 => EnvFilter::new("sitemap_audit=debug,info"),
            2 => EnvFilter::new("sitemap_audit=trace,tower_http=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&PathBuf>) -> Result<Config, Box<dyn std::error::Error>> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Ok(Config::default())
        }
    }
}

/// Handles `analyze`: runs one audit and writes the report to disk
async fn handle_analyze(
    mut config: Config,
    sitemap_url: &str,
    output: Option<PathBuf>,
    summary: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(dir) = output {
        config.output.directory = dir.to_string_lossy().into_owned();
    }
    let output_dir = PathBuf::from(&config.output.directory);

    let auditor = Auditor::new(config)?;
    let outcome = auditor.analyze(sitemap_url).await?;

    std::fs::create_dir_all(&output_dir)?;
    let report_path = output_dir.join(&outcome.filename);
    std::fs::write(&report_path, &outcome.report_bytes)?;
    tracing::info!("Report written to {}", report_path.display());

    if let Some(summary_path) = summary {
        write_markdown_summary(&outcome.summary(), &summary_path)?;
        tracing::info!("Summary written to {}", summary_path.display());
    }

    print_statistics(&outcome.stats, &outcome.category_counts);
    println!(
        "\nAudited {} URLs in {:.1} seconds",
        outcome.total_urls,
        outcome.elapsed.as_secs_f64()
    );
    println!("Report: {}", report_path.display());

    Ok(())
}

/// Handles `serve`: runs the JSON API until interrupted
async fn handle_serve(
    mut config: Config,
    bind: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(bind) = bind {
        config.server.bind_address = bind;
    }

    let auditor = Auditor::new(config)?;
    server::serve(auditor).await?;
    Ok(())
}

/// Handles `categories`: prints the effective category table
fn handle_categories(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    let auditor = Auditor::new(config.clone())?;
    let table = auditor.categories();

    println!("=== Categories (match order) ===\n");
    for entry in table.match_order() {
        println!("  {:<20} {}", entry.name, entry.pattern);
    }
    println!("  {:<20} (anything else)", MAIN_CATEGORY);

    println!("\nSheet order:");
    for name in table.bucket_names() {
        println!("  - {}", name);
    }

    Ok(())
}
