//! Child-process migration engine
//!
//! Runs the migration engine's command line tool once per rollback and waits
//! for it to exit. Engine stdout streams straight to our stderr so that stdout
//! stays reserved for the command result. The password travels in the child's
//! environment, never on its command line.

use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Output, Stdio};

use chrono::NaiveDateTime;

use super::{EngineError, EngineResult, MigrationEngine};
use crate::observability::Logger;
use crate::rollback::{format_for_engine, ContextFilter};

/// Executable used when none is configured.
pub const DEFAULT_ENGINE_COMMAND: &str = "liquibase";

/// Environment variable the engine reads its database password from.
pub const PASSWORD_ENV: &str = "LIQUIBASE_COMMAND_PASSWORD";

/// Connection settings handed to every engine invocation.
#[derive(Clone, PartialEq, Eq)]
pub struct EngineSettings {
    pub command: String,
    /// Arguments placed before everything else, e.g. `--defaults-file=...`
    pub extra_args: Vec<String>,
    pub changelog_file: Option<String>,
    pub url: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            command: DEFAULT_ENGINE_COMMAND.to_string(),
            extra_args: Vec::new(),
            changelog_file: None,
            url: None,
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for EngineSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineSettings")
            .field("command", &self.command)
            .field("extra_args", &self.extra_args)
            .field("changelog_file", &self.changelog_file)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// `MigrationEngine` backed by an external executable.
#[derive(Debug, Clone)]
pub struct ProcessEngine {
    settings: EngineSettings,
}

impl ProcessEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Full argument list for one engine invocation. Excludes the password.
    pub fn build_args(
        &self,
        operation: &str,
        operation_args: &[(&str, String)],
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> Vec<String> {
        let mut args = self.settings.extra_args.clone();

        let global = [
            ("changelog-file", &self.settings.changelog_file),
            ("url", &self.settings.url),
            ("username", &self.settings.username),
        ];
        for (name, value) in global {
            if let Some(value) = value {
                args.push(format!("--{}={}", name, value));
            }
        }

        args.push(operation.to_string());

        for (name, value) in operation_args {
            args.push(format!("--{}={}", name, value));
        }
        if let Some(script) = script {
            args.push(format!("--rollback-script={}", script.display()));
        }
        if let Some(contexts) = &filter.contexts {
            args.push(format!("--contexts={}", contexts));
        }
        if let Some(labels) = &filter.labels {
            args.push(format!("--labels={}", labels));
        }

        args
    }

    fn run(
        &self,
        operation: &str,
        operation_args: &[(&str, String)],
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()> {
        let args = self.build_args(operation, operation_args, script, filter);

        Logger::trace(
            "ENGINE_INVOKE",
            &[("command", self.settings.command.as_str()), ("operation", operation)],
        );

        let mut command = Command::new(&self.settings.command);
        command
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::from(io::stderr()))
            .stderr(Stdio::piped());
        if let Some(password) = &self.settings.password {
            command.env(PASSWORD_ENV, password);
        }

        let output = command.output().map_err(|source| EngineError::Launch {
            command: self.settings.command.clone(),
            source,
        })?;

        if output.status.success() {
            if let Err(e) = io::stderr().write_all(&output.stderr) {
                let reason = e.to_string();
                Logger::warn("ENGINE_STDERR_LOST", &[("reason", reason.as_str())]);
            }
            Ok(())
        } else {
            Err(EngineError::Failed(failure_message(&output)))
        }
    }
}

/// The engine's own error text, or its exit status when it printed nothing.
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if !stderr.is_empty() {
        return stderr.to_string();
    }
    match output.status.code() {
        Some(code) => format!("migration engine exited with status {}", code),
        None => "migration engine terminated by signal".to_string(),
    }
}

impl MigrationEngine for ProcessEngine {
    fn rollback_count(
        &mut self,
        count: u32,
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()> {
        self.run("rollback-count", &[("count", count.to_string())], script, filter)
    }

    fn rollback_to_date(
        &mut self,
        date: &NaiveDateTime,
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()> {
        self.run("rollback-to-date", &[("date", format_for_engine(date))], script, filter)
    }

    fn rollback_to_tag(
        &mut self,
        tag: &str,
        script: Option<&Path>,
        filter: &ContextFilter,
    ) -> EngineResult<()> {
        self.run("rollback", &[("tag", tag.to_string())], script, filter)
    }
}
