//! poetry.lock parser for Python projects
//!
//! Reads the `[[package]]` array. Older lock files tag each package with a
//! `category` (`main` or `dev`); newer ones omit it and every package is `main`.

use crate::domain::ManifestKind;
use crate::error::ManifestError;
use crate::manifest::{DependencyInclusion, ManifestEntry, ManifestParser, ParsedManifest};
use serde::Deserialize;
use std::path::PathBuf;

/// Category name of production packages
const MAIN_CATEGORY: &str = "main";

/// Parser for poetry.lock files
pub struct PoetryLockParser {
    inclusion: DependencyInclusion,
}

#[derive(Debug, Deserialize)]
struct PoetryLock {
    #[serde(default)]
    package: Vec<PoetryLockPackage>,
}

#[derive(Debug, Deserialize)]
struct PoetryLockPackage {
    name: String,
    version: String,
    #[serde(default)]
    category: Option<String>,
}

impl PoetryLockParser {
    pub fn new(inclusion: DependencyInclusion) -> Self {
        Self { inclusion }
    }

    fn includes(&self, package: &PoetryLockPackage) -> bool {
        match self.inclusion {
            DependencyInclusion::All => true,
            DependencyInclusion::Default | DependencyInclusion::Production => package
                .category
                .as_deref()
                .is_none_or(|category| category == MAIN_CATEGORY),
        }
    }
}

impl ManifestParser for PoetryLockParser {
    fn parse(&self, content: &str) -> Result<ParsedManifest, ManifestError> {
        let lock: PoetryLock = toml::from_str(content).map_err(|e| {
            ManifestError::toml_parse_error(PathBuf::from("poetry.lock"), e.to_string())
        })?;

        let entries = lock
            .package
            .into_iter()
            .filter(|package| self.includes(package))
            .map(|package| ManifestEntry::new(package.name, package.version))
            .collect();

        Ok(ParsedManifest {
            root_name: None,
            entries,
        })
    }

    fn kind(&self) -> ManifestKind {
        ManifestKind::PoetryLock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCK: &str = r#"
[[package]]
name = "requests"
version = "2.31.0"
description = "Python HTTP for Humans."
category = "main"
optional = false
python-versions = ">=3.7"

[[package]]
name = "pytest"
version = "7.4.3"
category = "dev"
optional = false

[[package]]
name = "attrs"
version = "23.1.0"

[metadata]
lock-version = "2.0"
python-versions = "^3.11"
"#;

    fn names(manifest: &ParsedManifest) -> Vec<&str> {
        manifest.entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_default_keeps_main_and_uncategorised() {
        let manifest = PoetryLockParser::new(DependencyInclusion::Default)
            .parse(LOCK)
            .unwrap();
        assert_eq!(names(&manifest), vec!["requests", "attrs"]);
        assert_eq!(manifest.entries[0].version, "2.31.0");
        assert!(manifest.root_name.is_none());
    }

    #[test]
    fn test_production_matches_default() {
        let manifest = PoetryLockParser::new(DependencyInclusion::Production)
            .parse(LOCK)
            .unwrap();
        assert_eq!(names(&manifest), vec!["requests", "attrs"]);
    }

    #[test]
    fn test_all_keeps_dev() {
        let manifest = PoetryLockParser::new(DependencyInclusion::All)
            .parse(LOCK)
            .unwrap();
        assert_eq!(names(&manifest), vec!["requests", "pytest", "attrs"]);
    }

    #[test]
    fn test_no_packages() {
        let manifest = PoetryLockParser::new(DependencyInclusion::Default)
            .parse("[metadata]\nlock-version = \"2.0\"\n")
            .unwrap();
        assert!(manifest.entries.is_empty());
    }

    #[test]
    fn test_malformed_toml() {
        let err = PoetryLockParser::new(DependencyInclusion::Default)
            .parse("[[package]\nname = ")
            .unwrap_err();
        assert!(matches!(err, ManifestError::TomlParseError { .. }));
    }

    #[test]
    fn test_package_without_version_is_error() {
        let err = PoetryLockParser::new(DependencyInclusion::Default)
            .parse("[[package]]\nname = \"requests\"\n")
            .unwrap_err();
        assert!(matches!(err, ManifestError::TomlParseError { .. }));
    }
}
