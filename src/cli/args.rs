//! CLI argument definitions for `GradeTracker`

use clap::{builder::BoolishValueParser, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use grade_tracker::config::ConfigOverrides;
use grade_tracker::logger::Level;

/// Log level accepted by `--log-level` and `--config-level`
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Adds progress messages
    Info,
    /// Everything
    Debug,
}

impl LogLevelArg {
    /// Lowercase name, as stored in the config file
    pub const fn name(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Print one value, or the whole configuration when KEY is omitted.
    Get {
        /// Key such as `level`, `gradebook` or `date_format`
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Store a value in the user config file.
    Set {
        /// Key to change
        #[arg(value_name = "KEY")]
        key: String,
        /// New value
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Put one key back to its built-in default.
    Unset {
        /// Key to restore
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Delete the user config file after asking for confirmation.
    Reset,
}

/// Gradebook file selection shared by the read-only commands
#[derive(Debug, Clone, Args)]
pub struct GradebookArg {
    /// Gradebook TOML file (defaults to config `gradebook`)
    #[arg(short, long, value_name = "PATH")]
    pub file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Inspect or edit the configuration (prints everything by default).
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Show a student's course averages, letter grades and GPA.
    Summary {
        #[command(flatten)]
        gradebook: GradebookArg,

        /// Seven-digit student id
        #[arg(short, long, value_name = "ID")]
        student: String,
    },
    /// List a student's due dates.
    ///
    /// Filters: All, Upcoming, "Due Soon", Overdue, Completed,
    /// "High Priority", "Medium Priority", "Low Priority".
    Due {
        #[command(flatten)]
        gradebook: GradebookArg,

        /// Seven-digit student id
        #[arg(short, long, value_name = "ID")]
        student: String,

        /// Filter tag
        #[arg(long, value_name = "TAG", default_value = "All")]
        filter: String,

        /// Only show this course
        #[arg(short, long, value_name = "COURSE_ID")]
        course: Option<String>,
    },
    /// Show the due dates of one month as a calendar.
    Calendar {
        #[command(flatten)]
        gradebook: GradebookArg,

        /// Month to show, as YYYY-MM (defaults to the current month)
        #[arg(short, long, value_name = "YYYY-MM")]
        month: Option<String>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "gradetracker",
    about = "GradeTracker command-line interface",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Log level for this run; the configured level is used when omitted
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Print extra detail such as per-module averages
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Shorthand for `--log-level debug`
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Use this `logging.level` instead of the stored one
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Use this `logging.file` instead of the stored one
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Use this `logging.verbose` (true/false) instead of the stored one
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config default gradebook file
    #[arg(long = "gradebook", value_name = "PATH")]
    pub gradebook: Option<PathBuf>,

    /// What to do
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Collect the `--config-*` and `--gradebook` flags; unset flags stay `None`
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.name().to_owned()),
            file: self
                .config_log_file
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            verbose: self.config_verbose,
            gradebook: self
                .gradebook
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("gradetracker").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_log_level_names() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Warn), Level::Warn);
        assert_eq!(Level::from(LogLevelArg::Info), Level::Info);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = cli(&["config"]).to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.gradebook.is_none());
    }

    #[test]
    fn test_to_config_overrides_with_values() {
        let overrides = cli(&[
            "--config-level",
            "debug",
            "--config-log-file",
            "/tmp/test.log",
            "--config-verbose",
            "yes",
            "--gradebook",
            "/tmp/book.toml",
            "config",
        ])
        .to_config_overrides();

        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.file, Some("/tmp/test.log".to_string()));
        assert_eq!(overrides.verbose, Some(true));
        assert_eq!(overrides.gradebook, Some("/tmp/book.toml".to_string()));
    }

    #[test]
    fn test_due_defaults_to_all() {
        match cli(&["due", "--student", "1234567"]).command {
            Command::Due {
                gradebook,
                student,
                filter,
                course,
            } => {
                assert!(gradebook.file.is_none());
                assert_eq!(student, "1234567");
                assert_eq!(filter, "All");
                assert!(course.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_summary_requires_student() {
        assert!(Cli::try_parse_from(["gradetracker", "summary"]).is_err());
    }
}
