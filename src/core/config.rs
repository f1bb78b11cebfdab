//! Configuration module for `GradeTracker`

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Default CLI configuration loaded based on build profile.
/// Uses release defaults in release mode, debug defaults in debug mode.
#[cfg(not(debug_assertions))]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigRelease.toml");

#[cfg(debug_assertions)]
const CONFIG_DEFAULTS: &str = include_str!("../../assets/DefaultCLIConfigDebug.toml");

#[cfg(not(debug_assertions))]
const CONFIG_FILE_NAME: &str = "config.toml";

#[cfg(debug_assertions)]
const CONFIG_FILE_NAME: &str = "dconfig.toml";

/// Placeholder expanded to the configuration directory
const DIR_VARIABLE: &str = "$GRADE_TRACKER";

/// Logging configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug)
    #[serde(default)]
    pub level: String,
    /// Log file path
    #[serde(default)]
    pub file: String,
    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,
}

/// Paths configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Gradebook file read when a command is not given `--file`
    #[serde(default)]
    pub gradebook: String,
}

/// Display configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// chrono format string for due dates
    #[serde(default)]
    pub date_format: String,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Logging settings
    pub logging: LoggingConfig,
    /// Path settings
    #[serde(default)]
    pub paths: PathsConfig,
    /// Display settings
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Optional CLI overrides for configuration values
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Override logging level
    pub level: Option<String>,
    /// Override log file path
    pub file: Option<String>,
    /// Override verbose flag
    pub verbose: Option<bool>,
    /// Override the default gradebook file
    pub gradebook: Option<String>,
}

impl Config {
    /// Get the `$GRADE_TRACKER` directory path
    ///
    /// Returns:
    /// - Linux: `~/.config/gradetracker`
    /// - macOS: `~/Library/Application Support/gradetracker`
    /// - Windows: `%APPDATA%\gradetracker`
    #[must_use]
    pub fn get_gradetracker_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gradetracker")
    }

    /// Fill empty settings from `defaults`, leaving user values alone
    ///
    /// Lets an older config file pick up settings added in a newer release.
    /// Returns `true` if anything was filled in.
    pub fn merge_defaults(&mut self, defaults: &Self) -> bool {
        fn fill(slot: &mut String, default: &str) -> bool {
            if slot.is_empty() && !default.is_empty() {
                default.clone_into(slot);
                true
            } else {
                false
            }
        }

        [
            fill(&mut self.logging.level, &defaults.logging.level),
            fill(&mut self.logging.file, &defaults.logging.file),
            fill(&mut self.paths.gradebook, &defaults.paths.gradebook),
            fill(&mut self.display.date_format, &defaults.display.date_format),
        ]
        .contains(&true)
    }

    /// Replace settings with the `Some` values of `overrides` for this run
    ///
    /// Nothing is written back to disk.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(level) = &overrides.level {
            self.logging.level.clone_from(level);
        }
        if let Some(file) = &overrides.file {
            self.logging.file.clone_from(file);
        }
        if let Some(verbose) = overrides.verbose {
            self.logging.verbose = verbose;
        }
        if let Some(gradebook) = &overrides.gradebook {
            self.paths.gradebook.clone_from(gradebook);
        }
    }

    /// Path of the user config file inside [`get_gradetracker_dir`]
    ///
    /// Debug builds use `dconfig.toml` so they never touch the release `config.toml`.
    ///
    /// [`get_gradetracker_dir`]: Self::get_gradetracker_dir
    #[must_use]
    pub fn get_config_file_path() -> PathBuf {
        Self::get_gradetracker_dir().join(CONFIG_FILE_NAME)
    }

    /// Expand `$GRADE_TRACKER` in a string to the configuration directory
    #[must_use]
    fn expand_variables(value: &str) -> String {
        if value.contains(DIR_VARIABLE) {
            let dir = Self::get_gradetracker_dir();
            value.replace(DIR_VARIABLE, &dir.to_string_lossy())
        } else {
            value.to_string()
        }
    }

    /// Parse a configuration and expand `$GRADE_TRACKER` in path settings
    ///
    /// Absent sections and keys are left empty.
    ///
    /// # Errors
    ///
    /// Returns the TOML error if the text is malformed or has wrongly typed values
    ///
    /// # Examples
    ///
    /// ```ignore
    /// let config = Config::from_toml(r#"
    /// [logging]
    /// level = "info"
    /// file = "$GRADE_TRACKER/app.log"
    /// "#)?;
    /// ```
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        let mut config: Self = toml::from_str(toml_str)?;

        config.logging.file = Self::expand_variables(&config.logging.file);
        config.paths.gradebook = Self::expand_variables(&config.paths.gradebook);

        Ok(config)
    }

    /// Built-in defaults from `assets/` (debug and release builds differ)
    ///
    /// An empty configuration is returned if the embedded file does not parse.
    #[must_use]
    pub fn from_defaults() -> Self {
        Self::from_toml(CONFIG_DEFAULTS).unwrap_or_default()
    }

    /// The user's configuration, created from defaults on first run
    ///
    /// Settings missing from an existing file are filled in and saved back.
    /// An unreadable file yields the defaults without overwriting it.
    #[must_use]
    pub fn load() -> Self {
        let path = Self::get_config_file_path();
        let defaults = Self::from_defaults();

        if !path.exists() {
            if let Err(e) = defaults.save() {
                crate::warn!("Could not write default config to {}: {e}", path.display());
            }
            return defaults;
        }

        match Self::load_from(&path) {
            Ok(mut config) => {
                if config.merge_defaults(&defaults) && config.save().is_err() {
                    crate::warn!("Could not update config at {}", path.display());
                }
                config
            }
            Err(e) => {
                crate::warn!("Ignoring unreadable config {}: {e}", path.display());
                defaults
            }
        }
    }

    /// Read and parse a configuration file without merging defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not valid configuration TOML
    pub fn load_from(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_toml(&content)?)
    }

    /// Write to [`get_config_file_path`](Self::get_config_file_path)
    ///
    /// ```toml
    /// [logging]
    /// level = "warn"
    /// file = ""
    /// verbose = false
    ///
    /// [paths]
    /// gradebook = "/home/user/.config/gradetracker/gradebook.toml"
    ///
    /// [display]
    /// date_format = "%m/%d/%Y"
    /// ```
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be created or the file
    /// cannot be written
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.save_to(&Self::get_config_file_path())
    }

    /// Save configuration to an explicit path, creating parent directories
    ///
    /// # Errors
    /// Returns an error if serialization, directory creation or the write fails
    pub fn save_to(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(self)?;
        fs::write(path, toml_str)?;
        Ok(())
    }

    /// Look up a setting by its short key
    ///
    /// Keys are `level`, `file`, `verbose`, `gradebook` and `date_format`
    /// (`date-format` is also accepted). Unknown keys give `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "level" => Some(self.logging.level.clone()),
            "file" => Some(self.logging.file.clone()),
            "verbose" => Some(self.logging.verbose.to_string()),
            "gradebook" => Some(self.paths.gradebook.clone()),
            "date_format" | "date-format" => Some(self.display.date_format.clone()),
            _ => None,
        }
    }

    /// Change a setting in memory; [`save()`](Config::save) persists it
    ///
    /// # Errors
    /// Returns a message for an unknown key, a level that is not a log level,
    /// or a `verbose` value other than `true`/`false`
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "level" => {
                value.parse::<crate::logger::Level>()?;
                self.logging.level = value.to_string();
            }
            "file" => self.logging.file = value.to_string(),
            "verbose" => {
                self.logging.verbose = value
                    .parse::<bool>()
                    .map_err(|_| format!("Invalid boolean value for 'verbose': '{value}'"))?;
            }
            "gradebook" => self.paths.gradebook = value.to_string(),
            "date_format" | "date-format" => self.display.date_format = value.to_string(),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Copy one setting back from `defaults`
    ///
    /// # Errors
    /// Returns a message if the key is unknown
    pub fn unset(&mut self, key: &str, defaults: &Self) -> Result<(), String> {
        match key {
            "level" => self.logging.level.clone_from(&defaults.logging.level),
            "file" => self.logging.file.clone_from(&defaults.logging.file),
            "verbose" => self.logging.verbose = defaults.logging.verbose,
            "gradebook" => self.paths.gradebook.clone_from(&defaults.paths.gradebook),
            "date_format" | "date-format" => self
                .display
                .date_format
                .clone_from(&defaults.display.date_format),
            _ => return Err(format!("Unknown config key: '{key}'")),
        }
        Ok(())
    }

    /// Delete the user config file; the next [`load()`](Config::load) recreates it
    ///
    /// # Errors
    /// Returns the I/O error if an existing file cannot be removed
    pub fn reset() -> Result<(), std::io::Error> {
        let config_file = Self::get_config_file_path();
        if config_file.exists() {
            fs::remove_file(config_file)?;
        }
        Ok(())
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "[logging]")?;
        writeln!(f, "  level = \"{}\"", self.logging.level)?;
        writeln!(f, "  file = \"{}\"", self.logging.file)?;
        writeln!(f, "  verbose = {}", self.logging.verbose)?;

        writeln!(f, "\n[paths]")?;
        writeln!(f, "  gradebook = \"{}\"", self.paths.gradebook)?;

        writeln!(f, "\n[display]")?;
        writeln!(f, "  date_format = \"{}\"", self.display.date_format)?;

        Ok(())
    }
}
