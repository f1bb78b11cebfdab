//! CLI command handlers for `GradeTracker`.
//!
//! Each command is implemented in its own submodule. The gradebook commands
//! only read records; nothing is written back.

pub mod calendar;
pub mod config;
pub mod due;
pub mod summary;

use grade_tracker::config::Config;
use grade_tracker::core::models::due_date::DEFAULT_DATE_FORMAT;
use grade_tracker::core::Gradebook;
use grade_tracker::error;
use std::path::{Path, PathBuf};

/// Load the gradebook named on the command line, or the configured default
///
/// Prints the failure and returns `None` if the file cannot be imported.
pub fn load_gradebook(file: Option<&Path>, config: &Config) -> Option<Gradebook> {
    let path = file.map_or_else(|| PathBuf::from(&config.paths.gradebook), Path::to_path_buf);
    if path.as_os_str().is_empty() {
        eprintln!("✗ No gradebook file given and none configured (see `config set gradebook`)");
        return None;
    }

    match Gradebook::load(&path) {
        Ok(book) => Some(book),
        Err(e) => {
            error!("Failed to load gradebook {}: {e}", path.display());
            eprintln!("✗ Failed to load {}: {e}", path.display());
            None
        }
    }
}

/// Date format from config, falling back to month/day/year
pub fn date_format(config: &Config) -> &str {
    if config.display.date_format.is_empty() {
        DEFAULT_DATE_FORMAT
    } else {
        &config.display.date_format
    }
}
