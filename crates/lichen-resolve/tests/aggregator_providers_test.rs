//! Integration tests for the ClearlyDefined and Libraries.io providers
//! against wiremock servers.

use lichen_core::PackageDescriptor;
use lichen_resolve::provider::LicenseProvider;
use lichen_resolve::{
    ClearlyDefinedConfig, ClearlyDefinedProvider, LibrariesIoConfig, LibrariesIoProvider,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn package() -> PackageDescriptor {
    PackageDescriptor::new("pkg-a", "1.8").unwrap()
}

fn clearly_defined(server: &MockServer) -> ClearlyDefinedProvider {
    ClearlyDefinedProvider::new(ClearlyDefinedConfig::new().with_base_url(server.uri())).unwrap()
}

fn libraries_io(server: &MockServer) -> LibrariesIoProvider {
    LibrariesIoProvider::new(LibrariesIoConfig::new("test-key").with_base_url(server.uri()))
        .unwrap()
}

// ── ClearlyDefined ───────────────────────────────────────────────────────

#[tokio::test]
async fn clearly_defined_returns_the_declared_license() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/nuget/nuget/-/pkg-a/1.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "licensed": { "declared": "Apache-2.0" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let license = clearly_defined(&server).resolve(&package()).await.unwrap();
    assert_eq!(license.id, "Apache-2.0");
    assert_eq!(license.name, "Apache-2.0");
}

#[tokio::test]
async fn clearly_defined_excludes_sentinel_values() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/nuget/nuget/-/pkg-a/1.8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "licensed": { "declared": "OTHER" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(clearly_defined(&server).resolve(&package()).await, None);
}

#[tokio::test]
async fn clearly_defined_not_found_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/nuget/nuget/-/pkg-a/1.8"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(clearly_defined(&server).resolve(&package()).await, None);
}

#[tokio::test]
async fn clearly_defined_server_error_is_downgraded_to_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/definitions/nuget/nuget/-/pkg-a/1.8"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(clearly_defined(&server).resolve(&package()).await, None);
}

// ── Libraries.io ─────────────────────────────────────────────────────────

fn libraries_body(licenses: &str, versions: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "licenses": licenses,
        "repository_license": null,
        "versions": versions
            .iter()
            .map(|number| serde_json::json!({ "number": number }))
            .collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn libraries_io_sends_the_api_key_as_a_query_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nuget/pkg-a"))
        .and(query_param("api_key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(libraries_body("MIT", &["1.8"])))
        .expect(1)
        .mount(&server)
        .await;

    let license = libraries_io(&server).resolve(&package()).await.unwrap();
    assert_eq!(license.id, "MIT");
}

#[tokio::test]
async fn libraries_io_rejects_a_license_for_an_unlisted_version() {
    let server = MockServer::start().await;
    // License present, but the requested 1.8 is not among the versions.
    Mock::given(method("GET"))
        .and(path("/nuget/pkg-a"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(libraries_body("MIT", &["1.6", "1.7"])),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(libraries_io(&server).resolve(&package()).await, None);
}

#[tokio::test]
async fn libraries_io_falls_back_to_the_repository_license() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nuget/pkg-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "licenses": "Unknown",
            "repository_license": "BSD-3-Clause",
            "versions": [{ "number": "1.8" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let license = libraries_io(&server).resolve(&package()).await.unwrap();
    assert_eq!(license.id, "BSD-3-Clause");
}

#[tokio::test]
async fn libraries_io_malformed_body_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nuget/pkg-a"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(libraries_io(&server).resolve(&package()).await, None);
}

#[tokio::test]
async fn libraries_io_not_found_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nuget/pkg-a"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(libraries_io(&server).resolve(&package()).await, None);
}

#[tokio::test]
async fn libraries_io_waits_before_each_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nuget/pkg-a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(libraries_body("MIT", &["1.8"])))
        .mount(&server)
        .await;

    let provider = libraries_io(&server);
    let started = std::time::Instant::now();
    provider.resolve(&package()).await.unwrap();
    assert!(
        started.elapsed() >= std::time::Duration::from_secs(1),
        "rate-limit delay must precede the request"
    );
}
