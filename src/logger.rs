//! Per-call logger override.
//!
//! Every call resolves a [`Logger`] during distillation: an explicit
//! logger in the options wins, then a logger carried by the request
//! context, then an explicitly falsy `logger` option installs
//! [`SilentLogger`], and otherwise [`DefaultLogger`] is used. The default
//! stays quiet except for errors, which are forwarded to `tracing`.

/// Four severity-leveled log sinks.
///
/// Implementors receive pre-rendered message strings; structured values
/// (like the resolved request spec) are serialized before logging.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// The default per-call logger: debug/info/warn are silent, errors go to
/// the `tracing` error level.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultLogger;

impl Logger for DefaultLogger {
    fn debug(&self, _message: &str) {}

    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, message: &str) {
        tracing::error!(target: "registry_acl", "{message}");
    }
}

/// A fully-silent logger, installed when a caller passes an explicitly
/// falsy `logger` option.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn debug(&self, _message: &str) {}

    fn info(&self, _message: &str) {}

    fn warn(&self, _message: &str) {}

    fn error(&self, _message: &str) {}
}

/// Forwards all four severities to the matching `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn debug(&self, message: &str) {
        tracing::debug!(target: "registry_acl", "{message}");
    }

    fn info(&self, message: &str) {
        tracing::info!(target: "registry_acl", "{message}");
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "registry_acl", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "registry_acl", "{message}");
    }
}
