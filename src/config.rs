//! Client configuration.
//!
//! Host overrides are resolved from an explicit [`ClientConfig`] passed to
//! the client at construction time, not from ambient environment reads at
//! call time. [`ClientConfig::from_env`] snapshots the environment once
//! for callers who want the variable-driven behavior.

use std::collections::HashMap;

use url::Url;

use crate::operation::OperationSet;

/// Environment variable naming the default API host.
pub const HOST_ENV_VAR: &str = "ACL_CLIENT_HOST";

/// Default API host when no override is configured.
pub const DEFAULT_HOST: &str = "api.npmjs.com";

/// Host configuration for a client.
///
/// Both the base host and per-operation overrides accept either a bare
/// hostname (`customer.com`, keeps the current protocol) or a full URL
/// (`http://acl-host.com:1234`, replaces protocol and host).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_host: String,
    host_overrides: HashMap<String, String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_host: DEFAULT_HOST.to_string(),
            host_overrides: HashMap::new(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshots host configuration from the process environment.
    ///
    /// Reads [`HOST_ENV_VAR`] for the base host and, for each operation
    /// declaring a host variable, that variable into the override map.
    /// Later environment changes have no effect on an existing config.
    pub fn from_env(operations: &OperationSet) -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var(HOST_ENV_VAR) {
            if !host.is_empty() {
                config.base_host = host;
            }
        }
        for operation in operations.iter() {
            if let Some(var) = operation.host_var() {
                if let Ok(host) = std::env::var(var) {
                    if !host.is_empty() {
                        config
                            .host_overrides
                            .insert(operation.name().to_string(), host);
                    }
                }
            }
        }
        config
    }

    /// Sets the base host (bare hostname or full URL).
    pub fn base_host(mut self, host: impl Into<String>) -> Self {
        self.base_host = host.into();
        self
    }

    /// Adds a host override for one operation (bare hostname or full URL).
    pub fn host_override(
        mut self,
        operation: impl Into<String>,
        host: impl Into<String>,
    ) -> Self {
        self.host_overrides.insert(operation.into(), host.into());
        self
    }

    pub(crate) fn base(&self) -> &str {
        &self.base_host
    }

    pub(crate) fn override_for(&self, operation: &str) -> Option<&str> {
        self.host_overrides.get(operation).map(String::as_str)
    }
}

/// Splits a full `http(s)` URL into its protocol and host (with port).
///
/// Returns `None` for bare hostnames, which keep the caller's current
/// protocol.
pub(crate) fn split_full_url(value: &str) -> Option<(String, String)> {
    if !value.starts_with("http://") && !value.starts_with("https://") {
        return None;
    }
    let url = Url::parse(value).ok()?;
    let host = url.host_str()?;
    let host = match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    };
    Some((url.scheme().to_string(), host))
}
