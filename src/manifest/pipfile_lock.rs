//! Pipfile.lock parser for Python projects
//!
//! Reads the `default` and `develop` sections. Locked versions carry the
//! comparison operator (`"==2.31.0"`), which is stripped.

use crate::domain::ManifestKind;
use crate::error::ManifestError;
use crate::manifest::{DependencyInclusion, ManifestEntry, ManifestParser, ParsedManifest};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing::debug;

/// Characters of a version-specifier operator
const OPERATOR_CHARS: [char; 5] = ['=', '<', '>', '~', '!'];

/// Parser for Pipfile.lock files
pub struct PipfileLockParser {
    inclusion: DependencyInclusion,
}

#[derive(Debug, Deserialize)]
struct PipfileLock {
    #[serde(default)]
    default: BTreeMap<String, PipfileLockPackage>,
    #[serde(default)]
    develop: BTreeMap<String, PipfileLockPackage>,
}

#[derive(Debug, Deserialize)]
struct PipfileLockPackage {
    /// Absent for VCS and path installs
    #[serde(default)]
    version: Option<String>,
}

impl PipfileLockParser {
    pub fn new(inclusion: DependencyInclusion) -> Self {
        Self { inclusion }
    }

    fn includes_develop(&self) -> bool {
        !matches!(self.inclusion, DependencyInclusion::Production)
    }
}

impl ManifestParser for PipfileLockParser {
    fn parse(&self, content: &str) -> Result<ParsedManifest, ManifestError> {
        let lock: PipfileLock = serde_json::from_str(content).map_err(|e| {
            ManifestError::json_parse_error(PathBuf::from("Pipfile.lock"), e.to_string())
        })?;

        let mut sections = vec![lock.default];
        if self.includes_develop() {
            sections.push(lock.develop);
        }

        let mut entries = Vec::new();
        for (name, package) in sections.into_iter().flatten() {
            match package.version {
                Some(version) => entries.push(ManifestEntry::new(name, strip_operator(&version))),
                None => debug!("{}: no locked version, skipping", name),
            }
        }

        Ok(ParsedManifest {
            root_name: None,
            entries,
        })
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PipfileLock
    }
}

/// `==2.31.0` -> `2.31.0`
fn strip_operator(version: &str) -> &str {
    version.trim().trim_start_matches(OPERATOR_CHARS).trim_start()
}
