mod cli;
mod config;
mod db;
mod logger;

use anyhow::Result;
use clap::Parser;

use crate::{cli::Cli, config::Config};

fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(&cli) {
        eprintln!("Error: {:?}", err);
        // A stderr sink would print the same failure twice.
        if logger::logs_to_file() {
            logger::error(&format!("seed failed: {:#}", err));
        }
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref(), cli.database.as_deref())?;
    init_logging(&config)?;
    logger::debug(&format!("resolved config: {:?}", config));

    let report = db::seed(&config.database_path)?;
    logger::info(&format!(
        "inserted {} rows into {}",
        report.inserted,
        db::PEOPLE_TABLE
    ));

    match db::count_people(&report.database) {
        Ok(total) => logger::debug(&format!("{} now holds {} rows", db::PEOPLE_TABLE, total)),
        Err(err) => logger::warn(&format!("cannot count {}: {:#}", db::PEOPLE_TABLE, err)),
    }

    println!("Seeded SQLite at {}", report.database.display());
    Ok(())
}

/// Install the configured sink, falling back to stderr when the log file
/// cannot be opened.
fn init_logging(config: &Config) -> Result<()> {
    let level = config.log_level.as_deref();
    if let Err(err) = logger::init(level, config.log_file.as_deref()) {
        logger::init(level, None)?;
        logger::warn(&format!("cannot open log file: {}", err));
    }
    Ok(())
}
