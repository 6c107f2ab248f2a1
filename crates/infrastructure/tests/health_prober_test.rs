use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use veil_dns_application::ports::EndpointProbePort;
use veil_dns_domain::{ApiConfig, EndpointConfig, LoadBalancing};
use veil_dns_infrastructure::rpc::{ApiClient, HealthProber};

async fn spawn_server(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn healthy() -> &'static str {
    "ok"
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "broken")
}

fn config_for(addrs: &[SocketAddr]) -> ApiConfig {
    ApiConfig {
        endpoints: addrs
            .iter()
            .map(|addr| EndpointConfig {
                url: format!("http://{}/api/v1/resolve", addr),
                api_key: "key".to_string(),
                weight: 1,
            })
            .collect(),
        timeout_ms: 2_000,
        max_retries: 3,
        retry_delay_ms: 10,
        health_check_freq_secs: 30,
        load_balancing: LoadBalancing::RoundRobin,
    }
}

#[tokio::test]
async fn probe_updates_health_from_derived_url() {
    let up = spawn_server(Router::new().route("/health", get(healthy))).await;
    let down = spawn_server(Router::new().route("/health", get(broken))).await;

    let config = config_for(&[up, down]);
    let client = ApiClient::new(&config, None).unwrap();
    let endpoints = client.endpoints();

    // Start from the pessimistic state to prove the probe can promote.
    endpoints[0].set_healthy(false);

    let prober = HealthProber::new(endpoints.clone(), client.http_client());
    prober.probe_all().await;

    assert!(endpoints[0].is_healthy());
    assert!(!endpoints[1].is_healthy());
}

#[tokio::test]
async fn unreachable_endpoint_is_marked_unhealthy() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let dead = listener.local_addr().unwrap();
    drop(listener);

    let config = config_for(&[dead]);
    let client = ApiClient::new(&config, None).unwrap();
    let endpoints = client.endpoints();

    let prober = HealthProber::new(endpoints.clone(), client.http_client());
    prober.probe_all().await;

    assert!(!endpoints[0].is_healthy());
}

#[tokio::test]
async fn probe_recovers_an_endpoint_demoted_by_request_failures() {
    let up = spawn_server(Router::new().route("/health", get(healthy))).await;

    let config = config_for(&[up]);
    let client = ApiClient::new(&config, None).unwrap();
    let endpoints = client.endpoints();
    endpoints[0].set_healthy(false);

    let prober = HealthProber::new(endpoints.clone(), client.http_client());
    prober.probe_all().await;

    assert!(endpoints[0].is_healthy());
}
