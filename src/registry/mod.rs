//! Registry adapters for listing published releases
//!
//! This module provides:
//! - HTTP client shared foundation
//! - Go Module Proxy adapter
//! - PyPI JSON API adapter

mod client;
mod go_proxy;
mod pypi;

pub use client::{HttpClient, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use go_proxy::{GoProxyAdapter, GO_PROXY_URL};
pub use pypi::{PyPIAdapter, PYPI_API_URL};

use crate::domain::Ecosystem;
use crate::error::RegistryError;
use async_trait::async_trait;
use std::sync::Arc;

/// Trait for registry adapters
///
/// Adding an ecosystem means one more implementation and one more arm in
/// [`create_adapter`].
#[async_trait]
pub trait RegistryAdapter: Send + Sync {
    /// Get the registry name
    fn registry_name(&self) -> &'static str;

    /// List every published version literal of a package
    async fn fetch_versions(&self, package: &str) -> Result<Vec<String>, RegistryError>;
}

/// Create the registry adapter for the given ecosystem
///
/// `base_url` replaces the public proxy or index, e.g. for a private mirror.
pub fn create_adapter(
    ecosystem: Ecosystem,
    client: HttpClient,
    base_url: Option<&str>,
) -> Arc<dyn RegistryAdapter> {
    match (ecosystem, base_url) {
        (Ecosystem::Go, Some(url)) => Arc::new(GoProxyAdapter::with_base_url(client, url)),
        (Ecosystem::Go, None) => Arc::new(GoProxyAdapter::new(client)),
        (Ecosystem::Python, Some(url)) => Arc::new(PyPIAdapter::with_base_url(client, url)),
        (Ecosystem::Python, None) => Arc::new(PyPIAdapter::new(client)),
    }
}
