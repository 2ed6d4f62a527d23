/*!
 * Command-line interface for pathcheck
 */

use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Local;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, info, Level};

use pathcheck::config::{Args, Config};
use pathcheck::report::{Reporter, RunReport};
use pathcheck::scanner::Scanner;
use pathcheck::writer::ReportWriter;
use pathcheck::Result;

fn main() -> ExitCode {
    // Parse command line arguments
    let args = Args::parse();

    // Create configuration
    let config = Config::from_args(args);

    tracing_subscriber::fmt()
        .with_max_level(if config.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("{}", e);
        return ExitCode::from(2);
    }

    match run(config) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            error!("Path check did not complete successfully");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Walk, write the report and print the console summary.
/// Returns whether the walk finished without traversal errors.
fn run(config: Config) -> Result<bool> {
    let started_at = Local::now();
    info!("Illegal character check started");

    let progress = if config.show_progress {
        let progress = ProgressBar::new_spinner();
        progress.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {prefix:.bold.cyan} {pos} entries {wide_msg:.dim.white} ⏱️  {elapsed_precise}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        progress.enable_steady_tick(Duration::from_millis(100));
        progress.set_prefix("🔎 Checking");
        progress
    } else {
        ProgressBar::hidden()
    };

    let mut writer = ReportWriter::create(config.clone(), started_at)?;
    info!("Writing report to {}", writer.path().display());

    let scanner = Scanner::new(config.clone(), Arc::new(progress.clone()))?;

    let start_time = Instant::now();
    let outcome = scanner.classify(&mut writer)?;
    let duration = start_time.elapsed();

    progress.finish_and_clear();

    writer.finish(&outcome, Local::now())?;

    let run_report = RunReport {
        report_file: writer.path().display().to_string(),
        duration,
        outcome,
        whitespace_checked: config.whitespace,
    };
    Reporter::new().print_report(&run_report);

    let success = run_report.outcome.is_success();
    if success {
        info!("Illegal character check complete");
    }
    Ok(success)
}
