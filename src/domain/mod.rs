//! Core domain models for telescope
//!
//! - Ecosystems and the manifest kinds that select them
//! - Outdated scopes (severity buckets)
//! - Dependencies and their classification

mod dependency;
mod ecosystem;
mod scope;

pub use dependency::Dependency;
pub use ecosystem::{Ecosystem, ManifestKind};
pub use scope::OutdatedScope;
