//! scrapedf main entry point
//!
//! This is the command-line interface for crawling a site into a ZIP of PDFs.

use anyhow::Context;
use clap::{Parser, Subcommand};
use scrapedf::config::load_or_default;
use scrapedf::output::print_report;
use scrapedf::scrape::archive_path;
use scrapedf::{ScrapeOptions, Scraper};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// scrapedf: archive a website as PDFs
///
/// scrapedf crawls every page of a single host, renders each page into a
/// PDF and packages the PDFs into one ZIP file named after the host.
#[derive(Parser, Debug)]
#[command(name = "scrapedf")]
#[command(version)]
#[command(about = "Crawl a website and save every page as a PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a website and save its pages as PDFs in a ZIP file
    Scrape(ScrapeArgs),
}

#[derive(clap::Args, Debug)]
struct ScrapeArgs {
    /// URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Output directory for the ZIP file
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output: PathBuf,

    /// Strip HTML tags and keep only the text content
    #[arg(long)]
    strip: bool,

    /// Remove lines with two or fewer words
    #[arg(long, requires = "strip")]
    clean: bool,

    /// Overwrite an existing ZIP file without asking
    #[arg(short, long)]
    force: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Do not open the output directory when done
    #[arg(long)]
    no_open: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Command::Scrape(args) => handle_scrape(args, cli.quiet).await,
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("scrapedf=info,warn"),
            1 => EnvFilter::new("scrapedf=debug,info"),
            2 => EnvFilter::new("scrapedf=trace,debug"),
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

/// Handles the scrape subcommand
async fn handle_scrape(args: ScrapeArgs, quiet: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = match load_or_default(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    let output_path = archive_path(&args.output, &args.url)?;

    if output_path.exists() && !args.force {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        let replace = confirm_overwrite(&output_path, &mut stdin.lock(), &mut stdout.lock())?;
        if !replace {
            println!("Operation cancelled");
            return Ok(());
        }
    }

    println!("Scraping {} ...", args.url);

    let scraper = Scraper::new(config, ScrapeOptions::new(args.strip, args.clean));
    let report = match scraper.scrape_and_save(&args.url, &output_path).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!("Scrape failed: {}", e);
            return Err(e.into());
        }
    };

    if !quiet {
        print_report(&report);
    }
    println!("✓ Saved {}", output_path.display());

    if !args.no_open {
        if let Err(e) = open_directory(&args.output) {
            println!("Note: could not open output directory: {:#}", e);
        }
    }

    Ok(())
}

/// Asks whether an existing archive should be replaced
///
/// Only `y` or `yes` (any case) counts as consent; end of input declines.
fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> anyhow::Result<bool> {
    writeln!(output, "File {} already exists.", path.display())?;
    write!(output, "Do you want to replace it? [y/N] ")?;
    output.flush()?;

    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read answer")?;

    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

/// Opens `dir` in the platform file manager
fn open_directory(dir: &Path) -> anyhow::Result<()> {
    let program = if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    };

    std::process::Command::new(program)
        .arg(dir)
        .spawn()
        .with_context(|| format!("failed to run {}", program))?;
    Ok(())
}
