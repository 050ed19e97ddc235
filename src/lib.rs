//! telescope - Outdated dependency auditor library
//!
//! This library reads a dependency manifest, asks the package registry for
//! the newest release of every dependency and groups them by how far behind
//! they are:
//! - Go (go.mod, via the Go module proxy)
//! - Python (poetry.lock and Pipfile.lock, via PyPI)

pub mod atlas;
pub mod cli;
pub mod domain;
pub mod error;
pub mod manifest;
pub mod matcher;
pub mod output;
pub mod progress;
pub mod registry;
pub mod version;
