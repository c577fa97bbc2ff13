//! Tool configuration.
//!
//! Every setting has a built-in default, so the tools run without any config
//! file. Settings are read, lowest priority first, from
//! `~/.config/demodata/config.toml` and `./demodata.toml`, or from a single
//! explicitly given file.

use std::path::{Path, PathBuf};

use config::{Config, File};
use serde::Deserialize;

use crate::constants::{
    DEFAULT_DUPLICATE_BACKUP_FILE, DEFAULT_DUPLICATE_CATEGORY, DEFAULT_DUPLICATE_DAYS,
    DEFAULT_DUPLICATE_FROM, DEFAULT_DUPLICATE_TO, DEFAULT_EVENTS_FILE, DEFAULT_SHIFT_BACKUP_FILE,
    DEFAULT_SHIFT_DAYS,
};
use crate::error::{DemoDataError, DemoDataResult};

/// Project-local config file, looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "demodata.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DemoDataConfig {
    pub events_file: PathBuf,
    pub shift: ShiftConfig,
    pub duplicate: DuplicateConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShiftConfig {
    pub backup_file: PathBuf,
    pub days: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DuplicateConfig {
    pub backup_file: PathBuf,
    pub category: String,
    pub from: String,
    pub to: String,
    pub days: i64,
}

impl Default for DemoDataConfig {
    fn default() -> Self {
        DemoDataConfig {
            events_file: PathBuf::from(DEFAULT_EVENTS_FILE),
            shift: ShiftConfig::default(),
            duplicate: DuplicateConfig::default(),
        }
    }
}

impl Default for ShiftConfig {
    fn default() -> Self {
        ShiftConfig {
            backup_file: PathBuf::from(DEFAULT_SHIFT_BACKUP_FILE),
            days: DEFAULT_SHIFT_DAYS,
        }
    }
}

impl Default for DuplicateConfig {
    fn default() -> Self {
        DuplicateConfig {
            backup_file: PathBuf::from(DEFAULT_DUPLICATE_BACKUP_FILE),
            category: DEFAULT_DUPLICATE_CATEGORY.to_string(),
            from: DEFAULT_DUPLICATE_FROM.to_string(),
            to: DEFAULT_DUPLICATE_TO.to_string(),
            days: DEFAULT_DUPLICATE_DAYS,
        }
    }
}

impl DemoDataConfig {
    /// ~/.config/demodata/config.toml
    pub fn global_config_path() -> DemoDataResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| DemoDataError::Config("Could not determine config directory".into()))?
            .join("demodata");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration. An explicit path must exist; the default
    /// locations are optional.
    pub fn load(explicit: Option<&Path>) -> DemoDataResult<Self> {
        let mut builder = Config::builder();

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(DemoDataError::Config(format!(
                        "Config file not found at {}",
                        path.display()
                    )));
                }
                builder = builder.add_source(File::from(path.to_path_buf()).required(true));
            }
            None => {
                if let Ok(global) = Self::global_config_path() {
                    builder = builder.add_source(File::from(global).required(false));
                }
                builder = builder.add_source(File::from(PathBuf::from(LOCAL_CONFIG_FILE)).required(false));
            }
        }

        let config: DemoDataConfig = builder.build()?.try_deserialize()?;
        log::debug!("Configuration: {:?}", config);
        Ok(config.expanded())
    }

    /// Expand `~` in every configured path.
    fn expanded(mut self) -> Self {
        self.events_file = expand_path(&self.events_file);
        self.shift.backup_file = expand_path(&self.shift.backup_file);
        self.duplicate.backup_file = expand_path(&self.duplicate.backup_file);
        self
    }
}

/// Expand a leading `~` to the home directory.
pub fn expand_path(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}
