mod cli;

use anyhow::Context;
use chrono::Local;
use clap::Parser;
use cli::commands::Cli;
use cli::progress::CliReporter;
use colored::*;
use dotenv::dotenv;
use sound_duper::{CatalogEngine, ProgressReporter, SilentReporter};
use tracing::info;

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // A missing master root exits here with usage text, before any work starts.
    let args = Cli::parse();

    let _guard = cli::logging::init_logger();

    let mut config =
        sound_duper::config::load_configuration().context("Error loading configuration")?;
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.to_string_lossy().into_owned();
    }

    let engine = CatalogEngine::new(
        config,
        &args.master,
        args.library.as_deref(),
        args.archive.as_deref(),
    );

    let cli_reporter = CliReporter::new();
    let reporter: &dyn ProgressReporter = if args.quiet {
        &SilentReporter
    } else {
        &cli_reporter
    };

    let run = engine.analyze(reporter);
    let paths = engine
        .write_reports(&run, Local::now(), reporter)
        .context("Error writing reports")?;

    println!();
    info!(
        "Scan: {}, Hash: {}, Total: {}",
        format!("{:.2}s", run.scan_duration.as_secs_f64()).green(),
        format!("{:.2}s", run.hash_duration.as_secs_f64()).green(),
        format!("{:.1}s", run.elapsed.as_secs_f64()).green(),
    );
    info!(
        "{} audio files found, {} analyzed: {} already in master, {} new",
        format!("{}", run.files_scanned).cyan(),
        format!("{}", run.entries.len()).cyan(),
        format!("{}", run.in_master_count()).green(),
        format!("{}", run.new_count()).yellow(),
    );
    if run.error_count() > 0 {
        info!(
            "{} errors ({} scan, {} hash)",
            format!("{}", run.error_count()).red(),
            run.scan_errors.len(),
            run.hash_errors.len(),
        );
    }
    if run.master_duplicates > 0 {
        info!(
            "{} master files share content with another master file",
            format!("{}", run.master_duplicates).yellow(),
        );
    }
    for path in paths.iter() {
        info!("Report: {}", path.display().to_string().bold());
    }

    Ok(())
}
