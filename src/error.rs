//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: the manifest cannot be read, identified or parsed (fatal)
//! - ConfigError: invalid user-supplied patterns or scopes (fatal)
//! - RegistryError: a single registry query failed (local to one dependency)
//! - VersionError: a single version literal failed to parse (local to one dependency)

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File name does not match any supported manifest
    #[error("unknown dependencies file: {path}")]
    UnsupportedFormat { path: PathBuf },

    /// JSON parsing error (for Pipfile.lock)
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// TOML parsing error (for poetry.lock)
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// go.mod parsing error
    #[error("failed to parse {path}: line {line}: {message}")]
    GoModParseError {
        path: PathBuf,
        line: usize,
        message: String,
    },
}

/// Errors related to user configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A regular expression failed to compile
    #[error("invalid expression '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Unknown scope name
    #[error("unknown scope '{value}': expected 'major', 'minor' or 'patch'")]
    InvalidScope { value: String },

    /// A critical expression whose scope prefix is not a scope
    #[error("invalid critical expression '{value}': expected [SCOPE:]pattern")]
    InvalidCriticalExpression { value: String },
}

/// Errors related to package registry communication
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Package not found in registry
    #[error("package '{package}' not found in {registry} registry")]
    PackageNotFound { package: String, registry: String },

    /// Registry answered with a non-success status
    #[error("{registry} returned HTTP {status} for '{package}'")]
    UnexpectedStatus {
        package: String,
        registry: String,
        status: u16,
    },

    /// Network request failed
    #[error("failed to fetch package '{package}' from {registry}: {message}")]
    NetworkError {
        package: String,
        registry: String,
        message: String,
    },

    /// Invalid response from registry
    #[error("invalid response from {registry} for '{package}': {message}")]
    InvalidResponse {
        package: String,
        registry: String,
        message: String,
    },

    /// Timeout
    #[error("timeout while fetching '{package}' from {registry}")]
    Timeout { package: String, registry: String },

    /// No release in the response could be parsed
    #[error("no usable release of '{package}' found in {registry}")]
    NoVersions { package: String, registry: String },
}

/// A version literal that is not a semantic version
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid version '{literal}': {message}")]
pub struct VersionError {
    pub literal: String,
    pub message: String,
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates a new GoModParseError
    pub fn go_mod_parse_error(
        path: impl Into<PathBuf>,
        line: usize,
        message: impl Into<String>,
    ) -> Self {
        ManifestError::GoModParseError {
            path: path.into(),
            line,
            message: message.into(),
        }
    }
}

impl ConfigError {
    /// Creates a new InvalidPattern error
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new PackageNotFound error
    pub fn package_not_found(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::PackageNotFound {
            package: package.into(),
            registry: registry.into(),
        }
    }

    /// Creates a new NetworkError
    pub fn network_error(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::NetworkError {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(
        package: impl Into<String>,
        registry: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        RegistryError::InvalidResponse {
            package: package.into(),
            registry: registry.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(package: impl Into<String>, registry: impl Into<String>) -> Self {
        RegistryError::Timeout {
            package: package.into(),
            registry: registry.into(),
        }
    }
}

impl VersionError {
    pub fn new(literal: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            message: message.into(),
        }
    }
}
