//! Deterministic request fingerprinting for cache keys.
//!
//! A fingerprint is an XXH64 digest of the canonical JSON rendering of a
//! request's method, URL, and body. Object keys are written in sorted
//! order at every nesting level, so the digest is stable under key-order
//! permutation of the body while remaining sensitive to method, URL, and
//! value content. Headers and ttl are excluded: invalidation must find
//! the same key regardless of which credentials made the original call.

use serde_json::Value;
use xxhash_rust::xxh64::xxh64;

use crate::distill::RequestSpec;

/// Computes the cache-key fingerprint of a request.
pub fn fingerprint(request: &RequestSpec) -> String {
    let mut canonical = String::new();
    canonical.push_str("{\"body\":");
    match &request.body {
        Some(body) => write_canonical(body, &mut canonical),
        None => canonical.push_str("null"),
    }
    canonical.push_str(",\"method\":");
    write_canonical(&Value::String(request.method.to_string()), &mut canonical);
    canonical.push_str(",\"url\":");
    write_canonical(&Value::String(request.url.clone()), &mut canonical);
    canonical.push('}');

    format!("{:016x}", xxh64(canonical.as_bytes(), 0))
}

/// Writes a JSON value with object keys in sorted order.
fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (index, key) in keys.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String((*key).clone()).to_string());
                out.push(':');
                write_canonical(&map[*key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
