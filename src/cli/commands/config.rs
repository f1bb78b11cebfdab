//! `config` command: show, change and restore settings

use crate::args::ConfigSubcommand;
use grade_tracker::config::Config;
use grade_tracker::{info, warn};
use std::io::{self, BufRead, Write};

/// Keys accepted by `config get/set/unset`
const KEYS: [&str; 5] = ["level", "file", "verbose", "gradebook", "date_format"];

/// Run a config subcommand, returning `false` on failure
pub fn run(subcommand: Option<ConfigSubcommand>, config: &mut Config, defaults: &Config) -> bool {
    match subcommand {
        None | Some(ConfigSubcommand::Get { key: None }) => {
            println!("\n=== Configuration ===\n");
            print!("{config}");
            true
        }
        Some(ConfigSubcommand::Get { key: Some(key) }) => show(config, &key),
        Some(ConfigSubcommand::Set { key, value }) => {
            let changed = config.set(&key, &value);
            persist(config, changed, &format!("{key} = {value}"))
        }
        Some(ConfigSubcommand::Unset { key }) => {
            let changed = config.unset(&key, defaults);
            persist(config, changed, &format!("{key} restored to default"))
        }
        Some(ConfigSubcommand::Reset) => reset(&mut io::stdin().lock()),
    }
}

fn show(config: &Config, key: &str) -> bool {
    config.get(key).map_or_else(
        || {
            eprintln!("✗ Unknown config key '{key}' (expected one of: {})", KEYS.join(", "));
            false
        },
        |value| {
            println!("{value}");
            true
        },
    )
}

/// Save after a successful in-memory change
fn persist(config: &Config, changed: Result<(), String>, done: &str) -> bool {
    if let Err(e) = changed {
        warn!("Config change rejected: {e}");
        eprintln!("✗ {e}");
        return false;
    }

    let path = Config::get_config_file_path();
    match config.save() {
        Ok(()) => {
            info!("Saved configuration to {}", path.display());
            println!("✓ {done}");
            true
        }
        Err(e) => {
            eprintln!("✗ Could not write {}: {e}", path.display());
            false
        }
    }
}

/// Ask before deleting the config file
fn reset(input: &mut impl BufRead) -> bool {
    if !Config::get_config_file_path().exists() {
        println!("✓ Nothing to reset, no config file has been written");
        return true;
    }

    print!("Delete the config file and return to defaults? (y/n): ");
    io::stdout().flush().ok();

    let mut answer = String::new();
    input.read_line(&mut answer).ok();
    if !confirmed(&answer) {
        println!("✗ Reset cancelled");
        return true;
    }

    match Config::reset() {
        Ok(()) => {
            println!("✓ Config reset to defaults");
            true
        }
        Err(e) => {
            eprintln!("✗ Could not remove config file: {e}");
            false
        }
    }
}

fn confirmed(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_answers() {
        assert!(confirmed("y\n"));
        assert!(confirmed(" YES "));
        assert!(!confirmed("n"));
        assert!(!confirmed(""));
    }

    #[test]
    fn test_rejected_set_is_not_saved() {
        let config = Config::default();
        assert!(!persist(&config, Err("Unknown config key: 'x'".into()), "x"));
    }
}
