//! Command-line interface entry point for `GradeTracker`

mod args;
mod commands;

use args::{Cli, Command};
use clap::Parser;
use grade_tracker::config::Config;
use grade_tracker::info;
use grade_tracker::logger::{enable_debug, enable_verbose, init_file_logging, set_level, Level};
use std::path::PathBuf;

fn main() {
    let args = Cli::parse();

    // Overrides apply to this run only
    let mut config = Config::load();
    let defaults = Config::from_defaults();
    config.apply_overrides(&args.to_config_overrides());

    // --log-level, then logging.level, then warn
    let mut level = args
        .log_level
        .map(Level::from)
        .or_else(|| config.logging.level.parse::<Level>().ok())
        .unwrap_or(Level::Warn);

    if args.debug_flag || level == Level::Debug {
        level = Level::Debug;
        enable_debug();
    }

    let verbose = args.verbose || config.logging.verbose;
    if verbose {
        enable_verbose();
    }
    set_level(level);

    let log_path = args.log_file.clone().or_else(|| {
        (!config.logging.file.is_empty()).then(|| PathBuf::from(&config.logging.file))
    });

    if let Some(log_path) = log_path {
        let display_path = log_path.to_string_lossy();
        if init_file_logging(&log_path) {
            if verbose {
                eprintln!("✓ File logging initialized at: {display_path}");
            } else {
                info!("File logging initialized at: {display_path}");
            }
        } else {
            eprintln!("✗ Failed to initialize file logging at: {display_path}");
        }
    }

    let ok = match args.command {
        Command::Config { subcommand } => commands::config::run(subcommand, &mut config, &defaults),
        Command::Summary { gradebook, student } => {
            commands::summary::run(gradebook.file.as_deref(), &student, &config)
        }
        Command::Due {
            gradebook,
            student,
            filter,
            course,
        } => commands::due::run(
            gradebook.file.as_deref(),
            &student,
            &filter,
            course.as_deref(),
            &config,
        ),
        Command::Calendar { gradebook, month } => {
            commands::calendar::run(gradebook.file.as_deref(), month.as_deref(), &config)
        }
    };

    if !ok {
        std::process::exit(1);
    }
}
