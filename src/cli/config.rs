//! Rollback configuration
//!
//! Settings come from an optional JSON file, then command line flags override
//! them one field at a time.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::engine::{EngineSettings, DEFAULT_ENGINE_COMMAND};
use crate::rollback::{ContextFilter, RollbackRequest, COUNT_NOT_SET};

use super::args::RollbackArgs;
use super::errors::{CliError, CliResult};

/// Config file read when `--config` is not given.
pub const DEFAULT_CONFIG_PATH: &str = "./migrate-rollback.json";

/// Configuration file structure
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Migration engine executable (default "liquibase")
    #[serde(default = "default_engine_command")]
    pub engine_command: String,

    /// Arguments placed before all others on the engine command line
    #[serde(default)]
    pub engine_args: Vec<String>,

    #[serde(default)]
    pub changelog_file: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,

    #[serde(default)]
    pub contexts: Option<String>,

    #[serde(default)]
    pub labels: Option<String>,

    #[serde(default)]
    pub rollback_script: Option<PathBuf>,

    #[serde(default)]
    pub rollback_tag: Option<String>,

    /// -1 means not set
    #[serde(default = "default_rollback_count")]
    pub rollback_count: i32,

    #[serde(default)]
    pub rollback_date: Option<String>,
}

fn default_engine_command() -> String {
    DEFAULT_ENGINE_COMMAND.to_string()
}
fn default_rollback_count() -> i32 {
    COUNT_NOT_SET
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("engine_command", &self.engine_command)
            .field("engine_args", &self.engine_args)
            .field("changelog_file", &self.changelog_file)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("contexts", &self.contexts)
            .field("labels", &self.labels)
            .field("rollback_script", &self.rollback_script)
            .field("rollback_tag", &self.rollback_tag)
            .field("rollback_count", &self.rollback_count)
            .field("rollback_date", &self.rollback_date)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            engine_command: default_engine_command(),
            engine_args: Vec::new(),
            changelog_file: None,
            url: None,
            username: None,
            password: None,
            contexts: None,
            labels: None,
            rollback_script: None,
            rollback_tag: None,
            rollback_count: COUNT_NOT_SET,
            rollback_date: None,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Load the explicit config file, or the default one if it exists.
    ///
    /// Returns the path that was actually read.
    pub fn load_optional(path: Option<&Path>) -> CliResult<(Self, Option<PathBuf>)> {
        match path {
            Some(path) => Ok((Self::load(path)?, Some(path.to_path_buf()))),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                if default.exists() {
                    Ok((Self::load(default)?, Some(default.to_path_buf())))
                } else {
                    Ok((Self::default(), None))
                }
            }
        }
    }

    fn validate(&self) -> CliResult<()> {
        if self.engine_command.trim().is_empty() {
            return Err(CliError::config_error("engine_command must not be empty"));
        }
        Ok(())
    }

    /// Overlay command line flags on top of the file values.
    pub fn merge_args(mut self, args: &RollbackArgs) -> CliResult<Self> {
        fn overlay<T: Clone>(slot: &mut Option<T>, flag: &Option<T>) {
            if flag.is_some() {
                slot.clone_from(flag);
            }
        }

        if let Some(command) = &args.engine_command {
            self.engine_command = command.clone();
        }
        overlay(&mut self.changelog_file, &args.changelog_file);
        overlay(&mut self.url, &args.url);
        overlay(&mut self.username, &args.username);
        overlay(&mut self.password, &args.password);
        overlay(&mut self.contexts, &args.contexts);
        overlay(&mut self.labels, &args.labels);
        overlay(&mut self.rollback_script, &args.rollback_script);
        overlay(&mut self.rollback_tag, &args.rollback_tag);
        overlay(&mut self.rollback_date, &args.rollback_date);
        if let Some(count) = args.rollback_count {
            self.rollback_count = count;
        }

        self.validate()?;
        Ok(self)
    }

    /// Raw selectors for the resolver
    pub fn rollback_request(&self) -> RollbackRequest {
        RollbackRequest {
            count: self.rollback_count,
            date: self.rollback_date.clone(),
            tag: self.rollback_tag.clone(),
        }
    }

    pub fn context_filter(&self) -> ContextFilter {
        ContextFilter::new(self.contexts.clone(), self.labels.clone())
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            command: self.engine_command.clone(),
            extra_args: self.engine_args.clone(),
            changelog_file: self.changelog_file.clone(),
            url: self.url.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }

    /// Effective settings for the settings report. The password is never
    /// included.
    pub fn settings_fields(&self) -> Vec<(&'static str, String)> {
        fn show<T: ToString>(value: &Option<T>) -> String {
            value
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_else(|| "null".to_string())
        }

        vec![
            ("changelog_file", show(&self.changelog_file)),
            ("url", show(&self.url)),
            ("contexts", show(&self.contexts)),
            ("labels", show(&self.labels)),
            ("rollback_count", self.rollback_count.to_string()),
            ("rollback_date", show(&self.rollback_date)),
            ("rollback_tag", show(&self.rollback_tag)),
            (
                "rollback_script",
                show(&self.rollback_script.as_ref().map(|p| p.display().to_string())),
            ),
        ]
    }
}
