use anyhow::{Context, Result};
use clap::Parser;
use scholar_badges::config::{find_config_file, load_config};
use scholar_badges::Pipeline;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Scholar Badges - Render Google Scholar, ORCID and ResearchGate metrics as README badges
#[derive(Parser, Debug)]
#[command(name = "scholar-badges")]
#[command(version = scholar_badges::VERSION)]
#[command(about = "Render researcher metrics as README badges and JSON snapshots", long_about = None)]
struct Cli {
    /// Enable verbose logging (-v for debug, -vv for trace)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short)]
    quiet: bool,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for the README and JSON snapshots (overrides the config file)
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only write the JSON snapshots
    #[arg(long)]
    no_readme: bool,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("scholar_badges={}", level)),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = load_config(config_path.as_deref()).context("Invalid configuration")?;

    if let Some(dir) = cli.output_dir {
        config.output.directory = dir;
    }
    if cli.no_readme {
        config.output.write_readme = false;
    }

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    // Initialize tracing based on verbosity
    let level = if cli.quiet {
        "error".to_string()
    } else {
        match cli.verbose {
            0 => config.logging.level.clone(),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    };
    init_tracing(&level, config.logging.format.as_deref() == Some("json"));

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }

    let pipeline = Pipeline::from_config(config)?;
    let report = pipeline.run().await?;

    tracing::info!(
        "Wrote {} files ({} of {} metrics failed)",
        report.written.len(),
        report.failures(),
        report.outcomes.len()
    );

    Ok(())
}
