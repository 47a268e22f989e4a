use clap::Parser;
use colored::Colorize;
use miette::Result;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};

use swiftsweep::analysis::UsageAnalyzer;
use swiftsweep::config::Config;
use swiftsweep::declaration::Declaration;
use swiftsweep::discovery::{FileFinder, FileStats, SourceFile};
use swiftsweep::ignore::{IgnoreList, RuleUsage};
use swiftsweep::parser::SwiftParser;
use swiftsweep::report::{ReportFormat, Reporter};

/// swiftsweep - Fast unused-declaration detection for Swift projects
#[derive(Parser, Debug)]
#[command(name = "swiftsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the project directory to analyze
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Target directories to analyze (can be specified multiple times)
    #[arg(short, long)]
    target: Vec<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Path to the ignore-specification file
    /// (default: .unusedignore in the project root)
    #[arg(long, value_name = "FILE")]
    ignore_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Enable parallel processing for faster analysis
    #[arg(long)]
    parallel: bool,

    /// Skip the interface-file (xib/storyboard/nib) pass
    #[arg(long)]
    no_interface_scan: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,
}

#[derive(clap::ValueEnum, Clone, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    info!("swiftsweep v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = load_config(&cli)?;

    // Run analysis once; findings drive the exit status
    let unused_count = run_analysis(&config, &cli)?;
    if unused_count > 0 {
        std::process::exit(1);
    }

    Ok(())
}

fn run_analysis(config: &Config, cli: &Cli) -> Result<usize> {
    use indicatif::{ProgressBar, ProgressStyle};

    let start_time = Instant::now();

    // Step 1: Discover files
    info!("Discovering files...");
    let finder = FileFinder::new(config);
    let files = finder.find_files(&cli.path)?;
    let stats = FileStats::from_files(&files);
    info!(
        "Found {} Swift files and {} interface files",
        stats.swift_files,
        stats.interface_files()
    );

    let (sources, interfaces): (Vec<SourceFile>, Vec<SourceFile>) =
        files.into_iter().partition(|f| f.file_type.is_source());

    if sources.is_empty() {
        if !cli.quiet {
            println!("{}", "No Swift files found.".yellow());
        }
        return Ok(0);
    }

    // Step 2: Load the ignore specification
    let ignore_path = cli
        .ignore_file
        .clone()
        .unwrap_or_else(|| cli.path.join(&config.ignore_file));
    let ignore = IgnoreList::load(&ignore_path);
    let mut rule_usage = RuleUsage::new(&ignore);

    // Step 3: Extract declarations
    let parser = SwiftParser::new();
    let mut declarations: Vec<Declaration> = Vec::new();

    if cli.parallel {
        use rayon::prelude::*;

        let extractions: Vec<_> = sources
            .par_iter()
            .filter_map(|file| match file.read_contents() {
                Ok(contents) => Some(parser.extract(&contents, &file.path_str(), &ignore)),
                Err(error) => {
                    warn!("Failed to read {}: {error}", file.path.display());
                    None
                }
            })
            .collect();

        for extraction in extractions {
            rule_usage.merge_indices(&extraction.fired_rules);
            declarations.extend(extraction.declarations);
        }
    } else {
        let pb = ProgressBar::new(sources.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("#>-"),
        );

        for file in &sources {
            pb.inc(1);
            match file.read_contents() {
                Ok(contents) => {
                    let extraction = parser.extract(&contents, &file.path_str(), &ignore);
                    rule_usage.merge_indices(&extraction.fired_rules);
                    declarations.extend(extraction.declarations);
                }
                Err(error) => {
                    warn!("Failed to read {}: {error}", file.path.display());
                }
            }
        }
        pb.finish_and_clear();
    }

    info!("Extracted {} declarations", declarations.len());

    // Step 4: Count usages and classify
    let interfaces = if cli.no_interface_scan || !config.interface.scan {
        Vec::new()
    } else {
        interfaces
    };

    let analyzer = UsageAnalyzer::new().with_parallel(cli.parallel);
    let unused = analyzer.find_unused(&declarations, &sources, &interfaces);

    // Step 5: Report results and ignore-file hygiene
    let stale_rules = rule_usage.stale(&ignore);
    let reporter = Reporter::new(cli.format.clone().into(), cli.output.clone());
    reporter.report(&unused, &stale_rules)?;

    // Print timing
    let elapsed = start_time.elapsed();
    if !cli.quiet {
        println!(
            "{}",
            format!(
                "Analyzed {} files in {:.2}s",
                sources.len() + interfaces.len(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }

    Ok(unused.len())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        // Try to load from default locations
        Config::from_default_locations(&cli.path)?
    };

    // Override with CLI arguments
    if !cli.target.is_empty() {
        config.targets = cli.target.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }

    Ok(config)
}
