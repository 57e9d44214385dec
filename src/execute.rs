//! The executor: cache-aside reads, direct execution, and invalidation.
//!
//! One logical attempt per call. Cacheable reads (cache configured, ttl
//! present, method GET) follow lookup → miss → fetch → populate; cache
//! failures on that path are logged and degrade to a network call, never
//! failing a response the network can still serve. All other calls go
//! straight to the transport.
//!
//! Status handling is deliberately asymmetric: the cached-read path
//! requires a clean 200 before a payload may be cached, while the
//! uncached path treats 404 as a legitimate application-level result
//! (existence checks) and only fails on other 400+ statuses.

use std::sync::Arc;

use serde_json::Value;

use crate::cache::CacheStore;
use crate::distill::Distilled;
use crate::error::{ApiError, ExecuteError};
use crate::method::RestMethod;
use crate::transport::Transport;

pub(crate) struct Executor {
    transport: Arc<dyn Transport>,
    cache: Option<Arc<dyn CacheStore>>,
}

impl Executor {
    pub(crate) fn new(transport: Arc<dyn Transport>, cache: Option<Arc<dyn CacheStore>>) -> Self {
        Self { transport, cache }
    }

    pub(crate) fn cache(&self) -> Option<&Arc<dyn CacheStore>> {
        self.cache.as_ref()
    }

    /// Runs one call to completion.
    pub(crate) async fn execute(
        &self,
        operation_name: &str,
        distilled: Distilled,
    ) -> Result<Value, ApiError> {
        let Distilled {
            request,
            ttl,
            logger,
            fingerprint,
        } = distilled;

        logger.info(&format!("registry-acl request: {operation_name}"));
        logger.info(&serde_json::to_string(&request).unwrap_or_default());

        let cacheable = self.cache.as_ref().zip(ttl).filter(|_| request.method == RestMethod::Get);

        let Some((cache, ttl)) = cacheable else {
            // Uncached / non-GET path.
            logger.info("non-cached request");

            let response = match self.transport.send(&request).await {
                Ok(response) => response,
                Err(err) => {
                    logger.error(&err.to_string());
                    return Err(err.into());
                }
            };

            if response.status > 399 && response.status != 404 {
                let err = ExecuteError::RequestFailed {
                    status: response.status,
                    body: response.body,
                };
                logger.error(&err.to_string());
                return Err(err.into());
            }

            return Ok(parse_payload(&response.body));
        };

        // Cache-aside read.
        match cache.get(&fingerprint).await {
            Err(err) => {
                // A failing store must not fail the call; fall through to
                // the network.
                logger.error(&format!("problem getting {fingerprint} from cache"));
                logger.error(&err.to_string());
            }
            Ok(Some(raw)) => {
                if let Ok(value) = serde_json::from_str::<Value>(&raw) {
                    logger.info(&format!("found {fingerprint} in cache"));
                    return Ok(value);
                }
                // Unparseable entry is a miss.
            }
            Ok(None) => {}
        }

        logger.info(&format!("get: {}", request.url));

        let response = match self.transport.send(&request).await {
            Ok(response) => response,
            Err(err) => {
                logger.error(&err.to_string());
                return Err(err.into());
            }
        };

        if response.status != 200 {
            let err = ExecuteError::UnexpectedStatus {
                status: response.status,
            };
            logger.error(&err.to_string());
            return Err(err.into());
        }

        logger.info(&format!("caching {fingerprint} for {ttl} seconds"));

        // Best-effort population: a store failure is logged, never
        // surfaced, and cannot affect the call outcome.
        match cache.setex(&fingerprint, ttl, &response.body).await {
            Ok(()) => logger.info(&format!("cached {fingerprint}")),
            Err(err) => {
                logger.error(&format!("unable to cache {fingerprint}"));
                logger.error(&err.to_string());
            }
        }

        Ok(parse_payload(&response.body))
    }

    /// Deletes the cache entry a call with these arguments would hit.
    ///
    /// Idempotent: success on an absent key. A store failure is surfaced —
    /// unlike reads, an explicit invalidation that did not happen must not
    /// look like one that did.
    pub(crate) async fn drop_cache(
        &self,
        operation_name: &str,
        distilled: Distilled,
    ) -> Result<(), ApiError> {
        let Distilled {
            request,
            logger,
            fingerprint,
            ..
        } = distilled;

        logger.info(&format!("registry-acl drop-cache: {operation_name}"));
        logger.info(&serde_json::to_string(&request).unwrap_or_default());

        let cache = self.cache.as_ref().ok_or(ApiError::CacheNotConfigured)?;

        if let Err(err) = cache.del(&fingerprint).await {
            logger.error(&format!("problem dropping {fingerprint} from cache"));
            logger.error(&err.to_string());
            return Err(err.into());
        }

        Ok(())
    }
}

/// Parses a response body as JSON, falling back to the raw text (or null
/// for an empty body) when it is not JSON.
fn parse_payload(body: &str) -> Value {
    if body.is_empty() {
        return Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload(""), Value::Null);
        assert_eq!(
            parse_payload(r#"{"name":"browserify"}"#),
            serde_json::json!({"name": "browserify"})
        );
        assert_eq!(
            parse_payload("payment required"),
            Value::String("payment required".to_string())
        );
    }
}
