//! The request distiller: pure resolution of call arguments into a fully
//! specified request plus cache metadata.
//!
//! [`distill`] maps `(operation, arguments, config)` to a
//! [`Distilled`] tuple — request spec, normalized ttl, resolved logger,
//! and cache fingerprint — performing no I/O. It fails only by returning
//! a [`DistillError`]; there is no partial output.
//!
//! Argument shapes are resolved back-to-front: a final options argument
//! (typed, or a JSON object passing the closed allow-list test) is popped
//! first, then a trailing data value (object or array body for POST/PUT,
//! object query source for GET), and everything left fills `{param}`
//! placeholders left-to-right.

use std::collections::BTreeMap;
use std::sync::Arc;

use regex::NoExpand;
use serde::Serialize;
use serde_json::{Map, Value};
use url::Url;

use crate::config::{split_full_url, ClientConfig};
use crate::error::DistillError;
use crate::fingerprint::fingerprint;
use crate::logger::{DefaultLogger, Logger, SilentLogger};
use crate::method::RestMethod;
use crate::operation::{Operation, PLACEHOLDER};
use crate::options::{CallArg, CallOptions, LoggerOption, Ttl};

/// Header carrying the bearer identity, as the registry expects it.
const BEARER_HEADER: &str = "bearer";

/// A fully resolved request: method, final URL, headers, optional body.
///
/// The URL contains no unresolved placeholders — resolution failure is a
/// [`DistillError`], never a partial spec. `json` asks the transport to
/// treat response bodies as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RequestSpec {
    pub method: RestMethod,
    pub url: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<Value>,
    pub json: bool,
}

/// Output of [`distill`]: everything the executor needs for one call.
pub struct Distilled {
    pub request: RequestSpec,
    pub ttl: Option<u64>,
    pub logger: Arc<dyn Logger>,
    pub fingerprint: String,
}

impl std::fmt::Debug for Distilled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Distilled")
            .field("request", &self.request)
            .field("ttl", &self.ttl)
            .field("fingerprint", &self.fingerprint)
            .finish_non_exhaustive()
    }
}

/// Resolves call arguments into a [`Distilled`] request.
///
/// ## Errors
///
/// - [`DistillError::MissingArguments`] when positional arguments do not
///   fill every `{param}` placeholder,
/// - [`DistillError::MisplacedOptions`] when an options argument is not
///   last,
/// - [`DistillError::InvalidTtl`] for unparseable ttl strings,
/// - [`DistillError::InvalidUrl`] when the configured host does not form
///   a valid URL.
pub fn distill(
    operation: &Operation,
    args: Vec<CallArg>,
    config: &ClientConfig,
) -> Result<Distilled, DistillError> {
    let mut args = args;
    let method = operation.method();
    let mut headers = BTreeMap::new();

    // Host resolution: default protocol/host, then a full-URL base host,
    // then the per-operation override.
    let mut protocol = "https".to_string();
    let mut host = config.base().to_string();
    if let Some((scheme, base)) = split_full_url(config.base()) {
        protocol = scheme;
        host = base;
    }
    if let Some(override_host) = config.override_for(operation.name()) {
        match split_full_url(override_host) {
            Some((scheme, value)) => {
                protocol = scheme;
                host = value;
            }
            None => host = override_host.to_string(),
        }
    }

    // Options extraction: the last argument, when typed options or an
    // options-shaped JSON object.
    let options = match args.last() {
        Some(CallArg::Options(_)) => match args.pop() {
            Some(CallArg::Options(options)) => options,
            _ => unreachable!("last argument was just matched as options"),
        },
        Some(CallArg::Value(Value::Object(object))) => match CallOptions::from_object(object) {
            Some(options) => {
                args.pop();
                options
            }
            None => CallOptions::new(),
        },
        _ => CallOptions::new(),
    };

    // Bearer: explicit option wins over the context's auth identity.
    let context_bearer = options.context.as_ref().and_then(|c| c.bearer.clone());
    if let Some(bearer) = options.bearer.clone().or(context_bearer) {
        headers.insert(BEARER_HEADER.to_string(), bearer);
    }

    // Logger: explicit logger, then the context's logger, then explicit
    // silence, then the default.
    let context_logger = options.context.as_ref().and_then(|c| c.logger.clone());
    let logger: Arc<dyn Logger> = match (&options.logger, context_logger) {
        (Some(LoggerOption::Custom(logger)), _) => Arc::clone(logger),
        (_, Some(logger)) => logger,
        (Some(LoggerOption::Silent), None) => Arc::new(SilentLogger),
        (None, None) => Arc::new(DefaultLogger),
    };

    // Body/query extraction: a trailing object or array is the body for
    // POST/PUT; a trailing object is the query source for GET. DELETE
    // consumes no data object.
    let mut body: Option<Value> = None;
    let mut query: Option<Map<String, Value>> = None;
    let trailing_shape = match args.last() {
        Some(CallArg::Value(value)) => (value.is_object(), value.is_array()),
        _ => (false, false),
    };
    match (method, trailing_shape) {
        (RestMethod::Put | RestMethod::Post, (true, _) | (_, true)) => {
            if let Some(CallArg::Value(value)) = args.pop() {
                body = Some(value);
            }
        }
        (RestMethod::Get, (true, _)) => {
            if let Some(CallArg::Value(Value::Object(object))) = args.pop() {
                query = Some(object);
            }
        }
        _ => {}
    }

    // An empty body says nothing; drop it.
    if body.as_ref().and_then(Value::as_object).is_some_and(Map::is_empty) {
        body = None;
    }

    // Positional substitution: each remaining argument fills the next
    // unresolved placeholder; surplus arguments are ignored.
    let mut pathname = operation.path().to_string();
    for arg in args {
        let rendered = match arg {
            CallArg::Value(value) => render_scalar(&value),
            CallArg::Options(_) => {
                return Err(DistillError::MisplacedOptions {
                    operation: operation.name().to_string(),
                })
            }
        };
        pathname = PLACEHOLDER
            .replace(&pathname, NoExpand(&rendered))
            .into_owned();
    }

    let missing: Vec<&str> = PLACEHOLDER
        .captures_iter(&pathname)
        .map(|captures| captures.get(1).map_or("", |m| m.as_str()))
        .collect();
    if !missing.is_empty() {
        return Err(DistillError::MissingArguments {
            operation: operation.name().to_string(),
            missing: missing.join(", "),
        });
    }

    // Finalize the URL from protocol/host/path/query.
    let mut url = Url::parse(&format!("{protocol}://{host}"))?;
    url.set_path(&pathname);
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &query {
            pairs.append_pair(key, &render_scalar(value));
        }
    }

    let request = RequestSpec {
        method,
        url: url.to_string(),
        headers,
        body,
        json: true,
    };

    let ttl = match &options.ttl {
        Some(ttl) => Some(ttl.normalize().map_err(|reason| DistillError::InvalidTtl {
            value: match ttl {
                Ttl::Seconds(secs) => secs.to_string(),
                Ttl::Human(human) => human.clone(),
            },
            reason,
        })?),
        None => None,
    };

    let fingerprint = fingerprint(&request);

    Ok(Distilled {
        request,
        ttl,
        logger,
        fingerprint,
    })
}

/// Renders a path-segment or query value; strings stay bare, everything
/// else is compact JSON (`11`, `true`).
fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
