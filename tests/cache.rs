//! Cache-aside behavior: round trips, ttl handling, invalidation, and
//! degradation when the store fails.

mod support;

use std::sync::Arc;

use registry_acl::{ApiError, CallArg, CallOptions, Client, ClientConfig};
use serde_json::json;
use support::{FailingCache, ReadOnlyCache, RecordingCache};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn silent() -> CallOptions {
    CallOptions::new().silent()
}

fn cached_client(server: &MockServer, cache: Arc<dyn registry_acl::CacheStore>) -> Client {
    Client::builder()
        .config(ClientConfig::new().base_host(server.uri()))
        .cache(cache)
        .build()
        .unwrap()
}

async fn mock_package(server: &MockServer, name: &str, hits: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/package/{name}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"name": name, "description": "a package"})),
        )
        .expect(hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn second_identical_call_is_served_from_the_cache() {
    let server = MockServer::start().await;
    mock_package(&server, "browserify", 1).await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache.clone());
    let args = || -> Vec<CallArg> { vec!["browserify".into(), silent().ttl(2u64).into()] };

    let first = client.call("packages.get", args()).await.unwrap();
    assert_eq!(first["name"], "browserify");

    // The mock expects exactly one hit; this call must come from the cache.
    let second = client.call("packages.get", args()).await.unwrap();
    assert_eq!(second, first);

    assert_eq!(cache.get_calls(), 2);
    assert_eq!(cache.setex_calls(), 1);
}

#[tokio::test]
async fn human_friendly_ttl_strings_normalize_to_seconds() {
    let server = MockServer::start().await;
    mock_package(&server, "mocha", 1).await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache.clone());
    client
        .call(
            "packages.get",
            vec!["mocha".into(), silent().ttl("3 seconds").into()],
        )
        .await
        .unwrap();

    assert_eq!(cache.last_ttl(), Some(3));
}

#[tokio::test]
async fn gets_without_ttl_never_touch_the_cache() {
    let server = MockServer::start().await;
    mock_package(&server, "cheerio", 1).await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache.clone());
    client
        .call("packages.get", vec!["cheerio".into(), silent().into()])
        .await
        .unwrap();

    assert_eq!(cache.get_calls(), 0);
    assert_eq!(cache.setex_calls(), 0);
}

#[tokio::test]
async fn puts_never_touch_the_cache_even_with_ttl() {
    let package = json!({"name": "novelty"});

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/package"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&package))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache.clone());
    client
        .call(
            "packages.create",
            vec![package.into(), silent().ttl(30u64).into()],
        )
        .await
        .unwrap();

    assert_eq!(cache.get_calls(), 0);
    assert_eq!(cache.setex_calls(), 0);
}

#[tokio::test]
async fn drop_cache_invalidates_the_entry_for_the_same_arguments() {
    let server = MockServer::start().await;
    // Two network hits: before caching and after invalidation.
    mock_package(&server, "lodash", 2).await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache.clone());

    client
        .call(
            "packages.get",
            vec!["lodash".into(), silent().ttl(60u64).into()],
        )
        .await
        .unwrap();

    // ttl and options are irrelevant to the fingerprint: plain args find
    // the same key.
    client
        .drop_cache("packages.get", vec!["lodash".into(), silent().into()])
        .await
        .unwrap();
    assert_eq!(cache.del_calls(), 1);

    client
        .call(
            "packages.get",
            vec!["lodash".into(), silent().ttl(60u64).into()],
        )
        .await
        .unwrap();
    assert_eq!(cache.setex_calls(), 2);
}

#[tokio::test]
async fn a_failing_store_degrades_to_the_network() {
    let server = MockServer::start().await;
    mock_package(&server, "browserify", 1).await;

    let client = cached_client(&server, Arc::new(FailingCache));
    let package = client
        .call(
            "packages.get",
            vec!["browserify".into(), silent().ttl(2u64).into()],
        )
        .await
        .unwrap();
    assert_eq!(package["name"], "browserify");
}

#[tokio::test]
async fn a_failing_population_write_does_not_fail_the_call() {
    let server = MockServer::start().await;
    mock_package(&server, "browserify", 2).await;

    let client = cached_client(&server, Arc::new(ReadOnlyCache::default()));
    let args = || -> Vec<CallArg> { vec!["browserify".into(), silent().ttl(2u64).into()] };

    client.call("packages.get", args()).await.unwrap();
    // Nothing was cached, so the second call goes to the network again.
    client.call("packages.get", args()).await.unwrap();
}

#[tokio::test]
async fn drop_cache_surfaces_store_errors() {
    let server = MockServer::start().await;
    let client = cached_client(&server, Arc::new(FailingCache));
    let err = client
        .drop_cache("packages.get", vec!["lodash".into(), silent().into()])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Cache(_)));
}

#[tokio::test]
async fn drop_cache_without_a_store_is_an_error() {
    let client = Client::builder().build().unwrap();
    assert!(!client.has_cache());

    let err = client
        .drop_cache("packages.get", vec!["lodash".into(), silent().into()])
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::CacheNotConfigured));
}

#[tokio::test]
async fn non_200_on_the_cacheable_path_is_an_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/package/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache.clone());
    let err = client
        .call(
            "packages.get",
            vec!["ghost".into(), silent().ttl(2u64).into()],
        )
        .await
        .unwrap_err();

    // Branch A requires a clean 200; even a 404 rejects here, and nothing
    // is cached.
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(err.to_string(), "unexpected status code 404");
    assert_eq!(cache.setex_calls(), 0);
}

#[tokio::test]
async fn cached_payloads_match_the_network_payload() {
    let server = MockServer::start().await;
    mock_package(&server, "browserify", 1).await;

    let cache = Arc::new(RecordingCache::new());
    let client = cached_client(&server, cache);
    let args = || -> Vec<CallArg> { vec!["browserify".into(), silent().ttl(2u64).into()] };

    let from_network = client.call("packages.get", args()).await.unwrap();
    let from_cache = client.call("packages.get", args()).await.unwrap();
    assert_eq!(from_network, from_cache);
    assert_eq!(from_cache["description"], "a package");
}
