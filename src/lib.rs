//! Schema-driven client for the npm registry ACL API, with cache-aside
//! request caching.
//!
//! A declarative YAML schema of operations (dotted name, HTTP method,
//! path template) is loaded into an operation registry; each call
//! resolves positional path arguments, an optional data object (request
//! body for PUT/POST, query string for GET), and per-call options
//! (bearer token, logger override, cache ttl) into a fully specified
//! request, then executes it. When a cache store is wired and a call
//! carries a ttl, GET responses are served and stored through the cache,
//! keyed by a deterministic fingerprint of the request.
//!
//! ## Core Types
//!
//! - [`Client`] - Operations bound to a transport and an optional cache
//! - [`OperationHandle`] - One operation's descriptor, callable, and invalidation
//! - [`CallOptions`] / [`CallArg`] - Per-call options and arguments
//! - [`ClientConfig`] - Base host and per-operation host overrides
//!
//! ## Collaborator Interfaces
//!
//! - [`Transport`] - One asynchronous send per call ([`HttpTransport`] over reqwest)
//! - [`CacheStore`] - get/setex/del key-value store ([`MemoryCache`] in-process)
//! - [`Logger`] - Four severity sinks, overridable per call
//!
//! ## Examples
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use registry_acl::{CallOptions, Client, MemoryCache};
//!
//! let client = Client::builder().cache(Arc::new(MemoryCache::new())).build()?;
//!
//! // First call hits the network and caches for 3 seconds; an identical
//! // call within the ttl is served from the cache.
//! let package = client
//!     .call(
//!         "packages.get",
//!         vec!["browserify".into(), CallOptions::new().ttl("3 seconds").into()],
//!     )
//!     .await?;
//!
//! // Drop the entry with the same arguments.
//! client.drop_cache("packages.get", vec!["browserify".into()]).await?;
//! ```

mod cache;
mod client;
mod config;
mod distill;
mod error;
mod execute;
mod fingerprint;
mod logger;
mod method;
mod operation;
mod options;
mod transport;

pub use cache::{CacheStore, MemoryCache};
pub use client::{Client, ClientBuilder, OperationHandle};
pub use config::{ClientConfig, DEFAULT_HOST, HOST_ENV_VAR};
pub use distill::{distill, Distilled, RequestSpec};
pub use error::{
    ApiError, CacheError, DistillError, ExecuteError, SchemaError, TransportError,
};
pub use fingerprint::fingerprint;
pub use logger::{DefaultLogger, Logger, SilentLogger, TracingLogger};
pub use method::RestMethod;
pub use operation::{Operation, OperationSet};
pub use options::{
    CallArg, CallOptions, LoggerOption, RequestContext, Ttl, ALLOWED_OPTION_KEYS,
};
pub use transport::{HttpTransport, Transport, TransportResponse};
