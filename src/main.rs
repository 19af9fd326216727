mod analyzer;
mod error;
mod extractor;
mod models;
mod report;
mod roster;
mod tracker;

use analyzer::BadgeClassifier;
use anyhow::{Context, Result};
use clap::{Arg, ArgAction, Command};
use extractor::ProfileScraper;
use models::{BadgeCatalog, Config};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;
use tracker::RunOptions;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let start = Instant::now();

    let matches = Command::new("arcade-badge-report")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Groups participants by arcade badge completion from their public profiles")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file path")
                .default_value("config.toml"),
        )
        .arg(
            Arg::new("init-config")
                .long("init-config")
                .action(ArgAction::SetTrue)
                .help("Write the default configuration to the config path and exit"),
        )
        .arg(
            Arg::new("roster")
                .short('r')
                .long("roster")
                .value_name("FILE")
                .help("Participant roster CSV (overrides roster_path)"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .help("Report CSV to write (overrides output_path)"),
        )
        .get_matches();

    let config_file = matches
        .get_one::<String>("config")
        .map(String::as_str)
        .unwrap_or("config.toml");

    if matches.get_flag("init-config") {
        println!("📝 Creating default configuration file: {}", config_file);
        Config::default()
            .save_to_file(config_file)
            .with_context(|| format!("Failed to write default configuration to {}", config_file))?;
        return Ok(());
    }

    if Path::new(config_file).exists() {
        println!("📋 Loading configuration from: {}", config_file);
    } else {
        println!("📋 No configuration at {}, using defaults", config_file);
    }
    let mut config = Config::load_or_default(config_file)
        .with_context(|| format!("Failed to load configuration from {}", config_file))?;

    if let Some(roster) = matches.get_one::<String>("roster") {
        config.roster_path = roster.clone();
    }
    if let Some(output) = matches.get_one::<String>("output") {
        config.output_path = output.clone();
    }
    config.validate()?;

    let roster = roster::load_roster(&config.roster_path)?;
    println!("📂 Loaded {} participants from: {}", roster.len(), config.roster_path);

    let catalog = BadgeCatalog::arcade();
    let classifier = BadgeClassifier::new(&catalog);
    let scraper = ProfileScraper::new(
        &config.selectors,
        Duration::from_secs(config.request_timeout_secs),
    )?;
    let options = RunOptions {
        prefer_scraped_name: config.prefer_scraped_name,
        request_delay: Duration::from_millis(config.request_delay_ms),
    };

    let outcome = tracker::run(&roster, &scraper, &classifier, &options).await;
    tracing::info!(checked = outcome.checked, skipped = outcome.skipped, "run complete");

    report::print_summary(&outcome.groups);
    if outcome.skipped > 0 {
        println!("⚠️  Skipped {} profiles that could not be fetched", outcome.skipped);
    }

    if config.output_mode.echoes_members() {
        report::print_members(&outcome.groups);
    }

    if config.output_mode.writes_file() {
        report::write_report_file(&config.output_path, &outcome.groups)?;
        println!("📄 Results written to: {}", config.output_path);
    }

    println!("\nProgram finished in {}s", start.elapsed().as_secs_f64().round());
    Ok(())
}
