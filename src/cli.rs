//! CLI argument parsing module for telescope

use crate::atlas::{AtlasConfig, DEFAULT_CONCURRENCY};
use crate::domain::OutdatedScope;
use crate::error::ConfigError;
use crate::manifest::DependencyInclusion;
use crate::matcher::{CriticalPatterns, PatternSet};
use crate::output::ReportOptions;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::time::Duration;

/// Parse the report threshold: MAJOR, MINOR or PATCH in any case
fn parse_scope(s: &str) -> Result<OutdatedScope, String> {
    OutdatedScope::parse_reportable(s.trim()).map_err(|e| e.to_string())
}

/// Parse a timeout in whole seconds
fn parse_timeout(s: &str) -> Result<Duration, String> {
    let secs: u64 = s
        .trim()
        .parse()
        .map_err(|_| format!("invalid number of seconds: {}", s))?;
    if secs == 0 {
        return Err("timeout must be at least 1 second".to_string());
    }
    Ok(Duration::from_secs(secs))
}

/// Outdated dependency auditor for go.mod, poetry.lock and Pipfile.lock
#[derive(Parser, Debug, Clone)]
#[command(
    name = "telescope",
    version,
    about = "Outdated dependency auditor for go.mod, poetry.lock and Pipfile.lock"
)]
pub struct CliArgs {
    /// Dependency manifest to audit
    #[arg(short = 'f', long = "file", default_value = "go.mod")]
    pub file: PathBuf,

    /// Least severe scope to report (major, minor or patch)
    #[arg(short = 's', long, default_value = "major", value_parser = parse_scope)]
    pub scope: OutdatedScope,

    /// Do not print dependencies whose status could not be determined
    #[arg(long)]
    pub skip_unknown: bool,

    /// Reject versions that are not strict semantic versions
    #[arg(long)]
    pub strict_semver: bool,

    // Package filters
    /// Ignore dependencies matching this regex (can be specified multiple times)
    #[arg(short = 'i', long, action = ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Flag dependencies matching [SCOPE:]regex as critical (can be specified multiple times)
    #[arg(short = 'c', long, action = ArgAction::Append)]
    pub critical: Vec<String>,

    /// Which lock-file dependencies to audit
    #[arg(long, value_enum, default_value_t = DependencyInclusion::Default)]
    pub dependencies: DependencyInclusion,

    // Registry options
    /// Per-request timeout in seconds
    #[arg(long, value_parser = parse_timeout, default_value = "30")]
    pub timeout: Duration,

    /// Base URL of the package registry (defaults to the public proxy or index)
    #[arg(long, value_name = "URL")]
    pub registry_url: Option<String>,

    /// Maximum number of registry requests in flight
    #[arg(long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    // Output options
    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable quiet mode - no progress bar
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable verbose output (debug logs on stderr)
    #[arg(long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Compile the filters and build the atlas settings
    pub fn atlas_config(&self) -> Result<AtlasConfig, ConfigError> {
        Ok(AtlasConfig {
            strict_semver: self.strict_semver,
            ignore: PatternSet::compile(&self.ignore)?,
            critical: CriticalPatterns::from_expressions(&self.critical)?,
            inclusion: self.dependencies,
            concurrency: self.concurrency.max(1),
        })
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            threshold: self.scope,
            skip_unknown: self.skip_unknown,
            color: !self.no_color,
            ..ReportOptions::default()
        }
    }
}
