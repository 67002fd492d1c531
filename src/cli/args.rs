//! CLI argument definitions using clap
//!
//! Commands:
//! - migrate-rollback rollback --rollback-count <n>
//! - migrate-rollback rollback --rollback-date <date>
//! - migrate-rollback rollback --rollback-tag <tag>

use clap::{Args, Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;

/// Roll back database changes through an external migration engine
#[derive(Parser, Debug)]
#[command(name = "migrate-rollback")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Roll the database back by count, to a date, or to a tag
    Rollback(RollbackArgs),
}

/// Flags of the rollback command. Each one overrides the config file.
#[derive(Args, Clone, Default, PartialEq, Eq)]
pub struct RollbackArgs {
    /// Path to configuration file (default ./migrate-rollback.json, optional)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tag to roll the database back to
    #[arg(long)]
    pub rollback_tag: Option<String>,

    /// Number of change sets to roll back (-1 means not set)
    #[arg(long, allow_negative_numbers = true)]
    pub rollback_count: Option<i32>,

    /// Date to roll back to: yyyy-MM-dd, yyyy-MM-dd'T'HH:mm:ss or yyyy-MM-dd'T'HH:mm:ss.SSS
    #[arg(long)]
    pub rollback_date: Option<String>,

    /// Script overriding the rollback logic in the changelog
    #[arg(long)]
    pub rollback_script: Option<PathBuf>,

    /// Context expression forwarded to the engine
    #[arg(long)]
    pub contexts: Option<String>,

    /// Label expression forwarded to the engine
    #[arg(long)]
    pub labels: Option<String>,

    /// Changelog file passed to the engine
    #[arg(long)]
    pub changelog_file: Option<String>,

    /// Database URL passed to the engine
    #[arg(long)]
    pub url: Option<String>,

    /// Database user passed to the engine
    #[arg(long)]
    pub username: Option<String>,

    /// Database password passed to the engine
    #[arg(long, env = "MIGRATE_ROLLBACK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Migration engine executable
    #[arg(long)]
    pub engine_command: Option<String>,

    /// Validate and report the rollback without calling the engine
    #[arg(long)]
    pub dry_run: bool,
}

impl fmt::Debug for RollbackArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RollbackArgs")
            .field("config", &self.config)
            .field("rollback_tag", &self.rollback_tag)
            .field("rollback_count", &self.rollback_count)
            .field("rollback_date", &self.rollback_date)
            .field("rollback_script", &self.rollback_script)
            .field("contexts", &self.contexts)
            .field("labels", &self.labels)
            .field("changelog_file", &self.changelog_file)
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("engine_command", &self.engine_command)
            .field("dry_run", &self.dry_run)
            .finish()
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> RollbackArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Command::Rollback(args) => args,
        }
    }

    #[test]
    fn test_parse_count() {
        let args = parse(&["migrate-rollback", "rollback", "--rollback-count", "5"]);
        assert_eq!(args.rollback_count, Some(5));
        assert!(!args.dry_run);
    }

    #[test]
    fn test_parse_negative_count() {
        let args = parse(&["migrate-rollback", "rollback", "--rollback-count", "-3"]);
        assert_eq!(args.rollback_count, Some(-3));
    }

    #[test]
    fn test_parse_tag_with_filters() {
        let args = parse(&[
            "migrate-rollback",
            "rollback",
            "--rollback-tag",
            "release-1.0",
            "--contexts",
            "prod",
            "--labels",
            "core",
            "--dry-run",
        ]);
        assert_eq!(args.rollback_tag.as_deref(), Some("release-1.0"));
        assert_eq!(args.contexts.as_deref(), Some("prod"));
        assert_eq!(args.labels.as_deref(), Some("core"));
        assert!(args.dry_run);
    }

    #[test]
    fn test_rejects_non_numeric_count() {
        assert!(Cli::try_parse_from(["migrate-rollback", "rollback", "--rollback-count", "five"]).is_err());
    }

    #[test]
    fn test_debug_redacts_password() {
        let args = parse(&["migrate-rollback", "rollback", "--rollback-count", "1", "--password", "hunter2"]);
        assert_eq!(args.password.as_deref(), Some("hunter2"));
        assert!(!format!("{:?}", args).contains("hunter2"));
    }
}
