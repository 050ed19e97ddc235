//! Go Module Proxy adapter
//!
//! Lists module versions from the Go Module Proxy.
//! API endpoint: https://proxy.golang.org/{escaped module}/@v/list

use crate::error::RegistryError;
use crate::registry::{HttpClient, RegistryAdapter};
use async_trait::async_trait;

/// Go Module Proxy base URL
pub const GO_PROXY_URL: &str = "https://proxy.golang.org";

/// Go Module Proxy adapter
pub struct GoProxyAdapter {
    client: HttpClient,
    base_url: String,
}

impl GoProxyAdapter {
    /// Create a new Go Proxy adapter
    pub fn new(client: HttpClient) -> Self {
        Self::with_base_url(client, GO_PROXY_URL)
    }

    /// Create an adapter talking to another proxy (or a mock server)
    pub fn with_base_url(client: HttpClient, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Build the URL for listing versions
    fn build_list_url(&self, module: &str) -> String {
        format!("{}/{}/@v/list", self.base_url, escape_module_path(module))
    }
}

/// Escape a module path for the proxy: upper-case letters become `!lower`
fn escape_module_path(module: &str) -> String {
    let mut escaped = String::with_capacity(module.len());
    for ch in module.chars() {
        if ch.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(ch.to_ascii_lowercase());
        } else {
            escaped.push(ch);
        }
    }
    escaped
}

/// Split a `@v/list` body into version literals
fn parse_version_list(body: &str) -> Vec<String> {
    body.replace("\r\n", "\n")
        .trim()
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl RegistryAdapter for GoProxyAdapter {
    fn registry_name(&self) -> &'static str {
        "Go Proxy"
    }

    async fn fetch_versions(&self, module: &str) -> Result<Vec<String>, RegistryError> {
        let url = self.build_list_url(module);
        let body = self
            .client
            .get_text(&url, module, self.registry_name())
            .await?;
        Ok(parse_version_list(&body))
    }
}
