use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use veil_dns_api::{create_router, ApiKeyStore, AppState};
use veil_dns_application::ports::{DnsResolver, ResolverStats};
use veil_dns_domain::{DnsRecord, DomainError, RecordType, ResolutionResult};
use veil_dns_infrastructure::crypto::EnvelopeCipher;

struct StubResolver {
    seen: Mutex<Vec<(String, RecordType)>>,
    response: Result<ResolutionResult, DomainError>,
}

impl StubResolver {
    fn returning(response: Result<ResolutionResult, DomainError>) -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
            response,
        })
    }

    fn google() -> Arc<Self> {
        Self::returning(Ok(ResolutionResult::new(
            "google.com",
            vec![DnsRecord::new(
                "google.com",
                RecordType::A,
                "142.250.185.78",
                300,
            )],
        )))
    }
}

#[async_trait]
impl DnsResolver for StubResolver {
    async fn resolve(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<ResolutionResult, DomainError> {
        self.seen
            .lock()
            .unwrap()
            .push((domain.to_string(), record_type));
        self.response.clone()
    }

    fn stats(&self) -> ResolverStats {
        ResolverStats {
            upstreams: vec!["8.8.8.8:53".to_string()],
            cache_size: 7,
        }
    }
}

fn app(resolver: Arc<StubResolver>, cipher: Option<Arc<EnvelopeCipher>>) -> Router {
    create_router(AppState {
        resolver,
        cipher,
        api_keys: Arc::new(ApiKeyStore::new(&["test-key".to_string()])),
    })
}

async fn post_body(
    app: Router,
    path: &str,
    api_key: Option<&str>,
    body: Vec<u8>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }

    let response = app
        .oneshot(builder.body(Body::from(body)).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn post_json(
    app: Router,
    path: &str,
    api_key: Option<&str>,
    body: Value,
) -> (StatusCode, Value) {
    post_body(app, path, api_key, serde_json::to_vec(&body).unwrap()).await
}

#[tokio::test]
async fn resolves_a_record() {
    let (status, body) = post_json(
        app(StubResolver::google(), None),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "google.com", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["domain"], "google.com");
    assert_eq!(body["records"][0]["value"], "142.250.185.78");
    assert_eq!(body["records"][0]["ttl"], 300);
    assert_eq!(body["error"], "");
}

#[tokio::test]
async fn data_alias_reaches_the_same_handler() {
    let (status, body) = post_json(
        app(StubResolver::google(), None),
        "/api/v1/data",
        Some("test-key"),
        json!({"domain": "google.com", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["value"], "142.250.185.78");
}

#[tokio::test]
async fn missing_api_key_is_unauthorized() {
    let (status, body) = post_json(
        app(StubResolver::google(), None),
        "/api/v1/resolve",
        None,
        json!({"domain": "google.com", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "unauthorized");
}

#[tokio::test]
async fn wrong_api_key_is_unauthorized() {
    let (status, _) = post_json(
        app(StubResolver::google(), None),
        "/api/v1/resolve",
        Some("wrong"),
        json!({"domain": "google.com", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_key_query_param_is_accepted() {
    let (status, _) = post_json(
        app(StubResolver::google(), None),
        "/api/v1/resolve?api_key=test-key",
        None,
        json!({"domain": "google.com", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn empty_domain_is_a_bad_request() {
    let (status, body) = post_json(
        app(StubResolver::google(), None),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("domain"));
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (status, _) = post_body(
        app(StubResolver::google(), None),
        "/api/v1/resolve",
        Some("test-key"),
        b"{not json".to_vec(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_type_defaults_to_a() {
    let resolver = StubResolver::google();
    post_json(
        app(resolver.clone(), None),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "google.com"}),
    )
    .await;

    let seen = resolver.seen.lock().unwrap();
    assert_eq!(seen[0].1, RecordType::A);
}

#[tokio::test]
async fn lowercase_type_is_uppercased() {
    let resolver = StubResolver::google();
    post_json(
        app(resolver.clone(), None),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "google.com", "type": "aaaa"}),
    )
    .await;

    let seen = resolver.seen.lock().unwrap();
    assert_eq!(seen[0].1, RecordType::AAAA);
}

#[tokio::test]
async fn unsupported_type_is_an_in_band_error() {
    let resolver = StubResolver::google();
    let (status, body) = post_json(
        app(resolver.clone(), None),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "google.com", "type": "PTR"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], json!([]));
    assert!(!body["error"].as_str().unwrap().is_empty());
    assert!(resolver.seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn resolver_errors_ride_in_band_at_200() {
    let resolver = StubResolver::returning(Err(DomainError::AllUpstreamsFailed(
        "no such host".to_string(),
    )));
    let (status, body) = post_json(
        app(resolver, None),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "doesnotexist.invalid", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["domain"], "doesnotexist.invalid");
    assert_eq!(body["records"], json!([]));
    assert!(body["error"].as_str().unwrap().contains("no such host"));
}

#[tokio::test]
async fn get_on_resolve_is_method_not_allowed() {
    let response = app(StubResolver::google(), None)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/v1/resolve")
                .header("x-api-key", "test-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn envelope_yields_the_same_response_as_the_plain_form() {
    let key = EnvelopeCipher::generate_key();
    let cipher = Arc::new(EnvelopeCipher::new(&key).unwrap());

    let plain = json!({"domain": "google.com", "type": "A"});
    let (_, plain_body) = post_json(
        app(StubResolver::google(), Some(cipher.clone())),
        "/api/v1/resolve",
        Some("test-key"),
        plain.clone(),
    )
    .await;

    let data = cipher.encrypt(&serde_json::to_vec(&plain).unwrap()).unwrap();
    let (status, enveloped_body) = post_json(
        app(StubResolver::google(), Some(cipher)),
        "/api/v1/data",
        Some("test-key"),
        json!({"data": data}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(enveloped_body, plain_body);
}

#[tokio::test]
async fn tampered_envelope_is_a_bad_request() {
    let key = EnvelopeCipher::generate_key();
    let cipher = Arc::new(EnvelopeCipher::new(&key).unwrap());

    let (status, _) = post_json(
        app(StubResolver::google(), Some(cipher)),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"data": "AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn plain_body_still_works_when_cipher_is_configured() {
    let key = EnvelopeCipher::generate_key();
    let cipher = Arc::new(EnvelopeCipher::new(&key).unwrap());

    let (status, body) = post_json(
        app(StubResolver::google(), Some(cipher)),
        "/api/v1/resolve",
        Some("test-key"),
        json!({"domain": "google.com", "type": "A"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"][0]["value"], "142.250.185.78");
}

#[tokio::test]
async fn health_is_public_and_reports_stats() {
    let response = app(StubResolver::google(), None)
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["stats"]["upstreams"][0], "8.8.8.8:53");
    assert_eq!(body["stats"]["cache_size"], 7);
    assert!(body["time"].as_str().unwrap().contains('T'));
}
