//! Manifest reading and parsing
//!
//! This module provides:
//! - Manifest kind resolution from the file name
//! - One parser per supported format (go.mod, poetry.lock, Pipfile.lock)
//! - The lock-file inclusion policy for development dependencies

mod go_mod;
mod pipfile_lock;
mod poetry_lock;

pub use go_mod::GoModParser;
pub use pipfile_lock::PipfileLockParser;
pub use poetry_lock::PoetryLockParser;

use crate::domain::ManifestKind;
use crate::error::ManifestError;
use std::path::Path;

/// A declared dependency as read from the manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub name: String,
    pub version: String,
}

impl ManifestEntry {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Result of parsing a manifest
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedManifest {
    /// Name of the project itself, when the format records it (go.mod `module`)
    pub root_name: Option<String>,
    /// Entries in file order
    pub entries: Vec<ManifestEntry>,
}

/// Which lock-file entries count as dependencies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum DependencyInclusion {
    /// Per-format default: poetry.lock keeps `main` only, Pipfile.lock keeps both sections
    #[default]
    Default,
    /// Production dependencies only
    Production,
    /// Every locked package, development ones included
    All,
}

/// Trait for parsing manifest files
pub trait ManifestParser {
    /// Parse the declared dependencies out of the manifest content
    fn parse(&self, content: &str) -> Result<ParsedManifest, ManifestError>;

    /// Returns the manifest kind this parser handles
    fn kind(&self) -> ManifestKind;
}

/// Get a manifest parser for the specified manifest kind
pub fn get_parser(kind: ManifestKind, inclusion: DependencyInclusion) -> Box<dyn ManifestParser> {
    match kind {
        ManifestKind::GoMod => Box::new(GoModParser),
        ManifestKind::PoetryLock => Box::new(PoetryLockParser::new(inclusion)),
        ManifestKind::PipfileLock => Box::new(PipfileLockParser::new(inclusion)),
    }
}

/// Resolve the manifest kind of `path` and read its content
pub fn read_manifest(path: &Path) -> Result<(ManifestKind, String), ManifestError> {
    let kind = ManifestKind::from_path(path).ok_or_else(|| ManifestError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;
    let content =
        std::fs::read_to_string(path).map_err(|e| ManifestError::read_error(path, e))?;
    Ok((kind, content))
}

/// Parse the manifest at `path`, reporting syntax errors against that path
pub fn parse_manifest(
    path: &Path,
    inclusion: DependencyInclusion,
) -> Result<(ManifestKind, ParsedManifest), ManifestError> {
    let (kind, content) = read_manifest(path)?;
    let parsed = get_parser(kind, inclusion)
        .parse(&content)
        .map_err(|e| e.at_path(path))?;
    Ok((kind, parsed))
}

impl ManifestError {
    /// Re-point a parse error at the file it came from
    pub fn at_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            ManifestError::JsonParseError { message, .. } => {
                ManifestError::JsonParseError { path, message }
            }
            ManifestError::TomlParseError { message, .. } => {
                ManifestError::TomlParseError { path, message }
            }
            ManifestError::GoModParseError { line, message, .. } => {
                ManifestError::GoModParseError {
                    path,
                    line,
                    message,
                }
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_get_parser_kinds() {
        for kind in ManifestKind::all() {
            let parser = get_parser(*kind, DependencyInclusion::Default);
            assert_eq!(parser.kind(), *kind);
        }
    }

    #[test]
    fn test_read_manifest_unknown_name() {
        let err = read_manifest(Path::new("/tmp/requirements.txt")).unwrap_err();
        assert!(matches!(err, ManifestError::UnsupportedFormat { .. }));
        assert!(err.to_string().contains("requirements.txt"));
    }

    #[test]
    fn test_read_manifest_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_manifest(&dir.path().join("go.mod")).unwrap_err();
        assert!(matches!(err, ManifestError::ReadError { .. }));
    }

    #[test]
    fn test_parse_manifest_go_mod() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("go.mod");
        fs::write(
            &path,
            "module example.com/app\n\ngo 1.21\n\nrequire example.com/mod v1.0.0\n",
        )
        .unwrap();

        let (kind, parsed) = parse_manifest(&path, DependencyInclusion::Default).unwrap();
        assert_eq!(kind, ManifestKind::GoMod);
        assert_eq!(parsed.root_name.as_deref(), Some("example.com/app"));
        assert_eq!(parsed.entries, vec![ManifestEntry::new("example.com/mod", "v1.0.0")]);
    }

    #[test]
    fn test_parse_manifest_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Pipfile.lock");
        fs::write(&path, "{ not json").unwrap();

        let err = parse_manifest(&path, DependencyInclusion::Default).unwrap_err();
        match err {
            ManifestError::JsonParseError { path: reported, .. } => assert_eq!(reported, path),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_default_inclusion() {
        assert_eq!(DependencyInclusion::default(), DependencyInclusion::Default);
    }
}
