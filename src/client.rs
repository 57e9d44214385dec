//! The client registry: operations bound to a transport and an optional
//! cache.
//!
//! A [`Client`] owns the loaded [`OperationSet`], the host
//! [`ClientConfig`], the [`Transport`], and an optional [`CacheStore`].
//! Calls go through [`Client::call`] / [`Client::drop_cache`] by dotted
//! operation name, or through an [`OperationHandle`] — a small record
//! bundling one descriptor with the bound client.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::CacheStore;
use crate::config::ClientConfig;
use crate::distill::distill;
use crate::error::ApiError;
use crate::execute::Executor;
use crate::operation::{Operation, OperationSet};
use crate::options::CallArg;
use crate::transport::{HttpTransport, Transport};

/// Builder for configuring a [`Client`].
#[derive(Default)]
pub struct ClientBuilder {
    operations: Option<OperationSet>,
    config: Option<ClientConfig>,
    transport: Option<Arc<dyn Transport>>,
    cache: Option<Arc<dyn CacheStore>>,
}

impl ClientBuilder {
    /// Uses a custom operation set instead of the builtin schema.
    pub fn operations(mut self, operations: OperationSet) -> Self {
        self.operations = Some(operations);
        self
    }

    /// Sets the host configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Substitutes the HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Wires a cache store, enabling cache-aside reads and invalidation.
    pub fn cache(mut self, cache: Arc<dyn CacheStore>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Builds the [`Client`].
    ///
    /// ## Errors
    ///
    /// Returns an error if the builtin schema fails to load or the
    /// default HTTP transport cannot be constructed.
    pub fn build(self) -> Result<Client, ApiError> {
        let operations = match self.operations {
            Some(operations) => operations,
            None => OperationSet::builtin()?,
        };
        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new()?),
        };
        Ok(Client {
            operations,
            config: self.config.unwrap_or_default(),
            executor: Executor::new(transport, self.cache),
        })
    }
}

/// Schema-driven API client with an optional cache-aside layer.
///
/// ## Examples
///
/// ```rust,ignore
/// use registry_acl::{CallOptions, Client};
///
/// let client = Client::builder().build()?;
/// let package = client
///     .call(
///         "packages.get",
///         vec!["browserify".into(), CallOptions::new().ttl("3 seconds").into()],
///     )
///     .await?;
/// ```
pub struct Client {
    operations: OperationSet,
    config: ClientConfig,
    executor: Executor,
}

impl Client {
    /// Creates a new builder.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Builds a client from the builtin schema and a host configuration
    /// snapshotted from the environment. No cache is wired; add one with
    /// [`ClientBuilder::cache`] when caching is wanted.
    pub fn from_env() -> Result<Self, ApiError> {
        let operations = OperationSet::builtin()?;
        let config = ClientConfig::from_env(&operations);
        Self::builder().operations(operations).config(config).build()
    }

    /// The loaded operation set.
    pub fn operations(&self) -> &OperationSet {
        &self.operations
    }

    /// Returns a handle for one operation.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::UnknownOperation`] if no operation with the
    /// given dotted name exists.
    pub fn operation(&self, name: &str) -> Result<OperationHandle<'_>, ApiError> {
        let operation = self.lookup(name)?;
        Ok(OperationHandle {
            client: self,
            operation,
        })
    }

    /// Calls an operation by dotted name.
    ///
    /// The argument list is `(<requiredPathParams...>, [body-or-query],
    /// [options])`; see [`crate::options::CallArg`].
    pub async fn call(&self, name: &str, args: Vec<CallArg>) -> Result<Value, ApiError> {
        let operation = self.lookup(name)?;
        self.run(operation, args).await
    }

    /// Invalidates the cache entry a call with these arguments would hit.
    pub async fn drop_cache(&self, name: &str, args: Vec<CallArg>) -> Result<(), ApiError> {
        let operation = self.lookup(name)?;
        self.invalidate(operation, args).await
    }

    /// Whether a cache store is wired.
    pub fn has_cache(&self) -> bool {
        self.executor.cache().is_some()
    }

    fn lookup(&self, name: &str) -> Result<&Operation, ApiError> {
        self.operations
            .get(name)
            .ok_or_else(|| ApiError::UnknownOperation(name.to_string()))
    }

    async fn run(&self, operation: &Operation, args: Vec<CallArg>) -> Result<Value, ApiError> {
        let distilled = distill(operation, args, &self.config)?;
        self.executor.execute(operation.name(), distilled).await
    }

    async fn invalidate(&self, operation: &Operation, args: Vec<CallArg>) -> Result<(), ApiError> {
        let distilled = distill(operation, args, &self.config)?;
        self.executor.drop_cache(operation.name(), distilled).await
    }
}

/// One operation bound to its client: descriptor plus callable plus
/// invalidation, as a record rather than attributes on a function value.
#[derive(Clone, Copy)]
pub struct OperationHandle<'a> {
    client: &'a Client,
    operation: &'a Operation,
}

impl<'a> OperationHandle<'a> {
    /// The operation's descriptor.
    pub fn descriptor(&self) -> &'a Operation {
        self.operation
    }

    /// The human-readable call signature.
    pub fn signature(&self) -> &'a str {
        self.operation.signature()
    }

    /// Calls the operation.
    pub async fn call(&self, args: Vec<CallArg>) -> Result<Value, ApiError> {
        self.client.run(self.operation, args).await
    }

    /// Invalidates the cache entry a call with these arguments would hit.
    pub async fn drop_cache(&self, args: Vec<CallArg>) -> Result<(), ApiError> {
        self.client.invalidate(self.operation, args).await
    }
}
