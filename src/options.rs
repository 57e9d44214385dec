//! Call arguments and per-call options.
//!
//! A call supplies an ordered, heterogeneous argument list: positional
//! path values, an optional trailing data object (body or query), and an
//! optional final [`CallOptions`]. Options can be passed two ways:
//!
//! - typed, as [`CallArg::Options`] built with the [`CallOptions`]
//!   setters, or
//! - dynamically, as a trailing JSON object whose keys are all drawn from
//!   the closed allow-list `{bearer, logger, ttl, context}`.
//!
//! The dynamic form exists for callers forwarding loosely-typed input. An
//! object is classified as options only when *every* key is allow-listed;
//! by convention, data objects never use those key names. The two key
//! sets are assumed disjoint, and an object failing the subset test is
//! always treated as data, never merged.

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::logger::Logger;

/// Recognized option keys for the dynamic (JSON object) options form.
pub const ALLOWED_OPTION_KEYS: [&str; 4] = ["bearer", "logger", "ttl", "context"];

/// One element of a call's argument list.
#[derive(Clone)]
pub enum CallArg {
    /// A positional path value, or the trailing data object.
    Value(Value),
    /// Typed per-call options; only valid in the final position.
    Options(CallOptions),
}

impl fmt::Debug for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Options(options) => f.debug_tuple("Options").field(options).finish(),
        }
    }
}

impl From<&str> for CallArg {
    fn from(value: &str) -> Self {
        Self::Value(Value::String(value.to_string()))
    }
}

impl From<String> for CallArg {
    fn from(value: String) -> Self {
        Self::Value(Value::String(value))
    }
}

impl From<Value> for CallArg {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<CallOptions> for CallArg {
    fn from(options: CallOptions) -> Self {
        Self::Options(options)
    }
}

/// Cache time-to-live, either whole seconds or a human-friendly string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ttl {
    Seconds(u64),
    Human(String),
}

impl Ttl {
    /// Normalizes to whole seconds.
    ///
    /// Human strings are whitespace-insensitive: `"3 seconds"`, `"3s"`,
    /// and `"3"` all normalize to `3`. Supported units are seconds
    /// (default), minutes, hours, and days, in short or long form.
    ///
    /// ## Errors
    ///
    /// Returns a reason string if the value cannot be parsed.
    pub fn normalize(&self) -> Result<u64, String> {
        match self {
            Self::Seconds(secs) => Ok(*secs),
            Self::Human(value) => parse_ttl(value),
        }
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self::Seconds(secs)
    }
}

impl From<&str> for Ttl {
    fn from(value: &str) -> Self {
        Self::Human(value.to_string())
    }
}

impl From<String> for Ttl {
    fn from(value: String) -> Self {
        Self::Human(value)
    }
}

/// Parses a ttl string like `"3 seconds"` or `"2h"` into whole seconds.
fn parse_ttl(value: &str) -> Result<u64, String> {
    let normalized = value.trim().to_lowercase().replace(' ', "");

    if normalized.is_empty() {
        return Err("ttl cannot be empty".to_string());
    }

    let split_index = normalized
        .find(|ch: char| !ch.is_ascii_digit())
        .unwrap_or(normalized.len());
    let (digits, unit) = normalized.split_at(split_index);

    let amount: u64 = digits
        .parse()
        .map_err(|_| "expected a ttl like \"3 seconds\" or \"2h\"".to_string())?;

    let per_unit: u64 = match unit {
        "" | "s" | "sec" | "secs" | "second" | "seconds" => 1,
        "m" | "min" | "mins" | "minute" | "minutes" => 60,
        "h" | "hr" | "hrs" | "hour" | "hours" => 3_600,
        "d" | "day" | "days" => 86_400,
        other => return Err(format!("unknown ttl unit {other:?}")),
    };

    amount
        .checked_mul(per_unit)
        .ok_or_else(|| "ttl overflows the supported range".to_string())
}

/// The per-call logger option.
#[derive(Clone)]
pub enum LoggerOption {
    /// Explicitly silence all logging for this call.
    Silent,
    /// Use the given logger for this call.
    Custom(Arc<dyn Logger>),
}

impl fmt::Debug for LoggerOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Silent => write!(f, "Silent"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

/// Opaque caller-supplied context (e.g. an inbound request) from which a
/// bearer identity and a logger may be extracted when the options do not
/// carry them directly.
#[derive(Clone, Default)]
pub struct RequestContext {
    /// Auth-credentials identity, used as the bearer when no explicit
    /// `bearer` option is given.
    pub bearer: Option<String>,
    /// Logger carried by the context.
    pub logger: Option<Arc<dyn Logger>>,
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("bearer", &self.bearer)
            .field("logger", &self.logger.as_ref().map(|_| ".."))
            .finish()
    }
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bearer(mut self, bearer: impl Into<String>) -> Self {
        self.bearer = Some(bearer.into());
        self
    }

    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Extracts a context from a JSON object: the bearer identity is read
    /// from `auth.credentials.name`. A JSON value cannot carry a live
    /// logger, so `logger` is left unset.
    fn from_value(value: &Value) -> Self {
        let bearer = value
            .pointer("/auth/credentials/name")
            .and_then(Value::as_str)
            .map(str::to_string);
        Self {
            bearer,
            logger: None,
        }
    }
}

/// Per-call options: bearer token, logger override, cache ttl, and a
/// request-context passthrough.
#[derive(Debug, Clone, Default)]
pub struct CallOptions {
    pub bearer: Option<String>,
    pub logger: Option<LoggerOption>,
    pub ttl: Option<Ttl>,
    pub context: Option<RequestContext>,
}

impl CallOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the bearer token, placed on the request as the `bearer` header.
    pub fn bearer(mut self, bearer: impl Into<String>) -> Self {
        self.bearer = Some(bearer.into());
        self
    }

    /// Sets a logger for this call.
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(LoggerOption::Custom(logger));
        self
    }

    /// Silences all logging for this call.
    pub fn silent(mut self) -> Self {
        self.logger = Some(LoggerOption::Silent);
        self
    }

    /// Sets the cache time-to-live. Accepts seconds or a human-friendly
    /// string (`"3 seconds"`).
    pub fn ttl(mut self, ttl: impl Into<Ttl>) -> Self {
        self.ttl = Some(ttl.into());
        self
    }

    /// Attaches a request-context passthrough.
    pub fn context(mut self, context: RequestContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Classifies a JSON object as options.
    ///
    /// Returns `None` unless every key is on [`ALLOWED_OPTION_KEYS`] —
    /// an object with any unrecognized key is a data object, never a
    /// partial options object. Within a recognized object: a falsy
    /// `logger` means explicit silence, any other JSON `logger` value is
    /// ignored (JSON cannot carry a live logger), and a `context` object
    /// contributes its `auth.credentials.name` as the bearer identity.
    pub(crate) fn from_object(object: &Map<String, Value>) -> Option<Self> {
        if !object.keys().all(|key| ALLOWED_OPTION_KEYS.contains(&key.as_str())) {
            return None;
        }

        let mut options = Self::new();

        if let Some(bearer) = object.get("bearer").and_then(Value::as_str) {
            options.bearer = Some(bearer.to_string());
        }

        if let Some(logger) = object.get("logger") {
            if is_falsy(logger) {
                options.logger = Some(LoggerOption::Silent);
            }
        }

        match object.get("ttl") {
            Some(Value::Number(number)) => {
                if let Some(secs) = number.as_u64() {
                    options.ttl = Some(Ttl::Seconds(secs));
                }
            }
            Some(Value::String(human)) => {
                options.ttl = Some(Ttl::Human(human.clone()));
            }
            _ => {}
        }

        if let Some(context) = object.get("context") {
            if context.is_object() {
                options.context = Some(RequestContext::from_value(context));
            }
        }

        Some(options)
    }
}

fn is_falsy(value: &Value) -> bool {
    matches!(value, Value::Null | Value::Bool(false))
}
