//! HTTP adapter routes, exercised over a real socket.

use std::time::Duration;

use browser_fetch::server::{serve, AppState};
use browser_fetch::{FetchConfig, Fetcher};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A running adapter; dropping it shuts the server down.
struct TestServer {
    base: String,
    _shutdown: oneshot::Sender<()>,
}

async fn start() -> TestServer {
    let config = FetchConfig {
        max_retries: 2,
        backoff_unit: Duration::from_millis(10),
        connect_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(2),
        ..Default::default()
    };
    let state = AppState::new(Fetcher::new(config).unwrap());
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let base = format!("http://{}", listener.local_addr().unwrap());
    let (tx, rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let shutdown = async {
            let _ = rx.await;
        };
        serve(listener, state, shutdown).await.unwrap();
    });

    TestServer {
        base,
        _shutdown: tx,
    }
}

fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

#[tokio::test]
async fn test_fetch_route_returns_success_record() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hello</html>"))
        .mount(&target)
        .await;
    let server = start().await;

    let response = client()
        .post(format!("{}/fetch", server.base))
        .json(&json!({
            "url": format!("{}/", target.uri()),
            "cookies": "session-id=123-456"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "success",
            "url": format!("{}/", target.uri()),
            "page_source": "<html>hello</html>"
        })
    );
}

#[tokio::test]
async fn test_fetch_route_returns_error_record() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&target)
        .await;
    let server = start().await;

    let response = client()
        .post(format!("{}/fetch", server.base))
        .json(&json!({ "url": target.uri() }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({ "status": "error", "message": "HTTP error 403: Forbidden" })
    );
}

#[tokio::test]
async fn test_fetch_route_rejects_invalid_input() {
    let server = start().await;
    let client = client();

    for payload in [
        json!({ "url": "ftp://example.com/file" }),
        json!({ "url": "https://example.com/", "max_retries": 0 }),
        json!({ "url": "https://example.com/", "max_retries": 1000000 }),
        json!({ "cookies": "a=1" }),
    ] {
        let response = client
            .post(format!("{}/fetch", server.base))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 422, "payload {payload}");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["status"], "error");
        assert!(body["message"].is_string());
        assert!(body.get("page_source").is_none());
    }
}

#[tokio::test]
async fn test_banner_and_health() {
    let server = start().await;
    let client = client();

    let banner: Value = client
        .get(format!("{}/", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(banner, json!({ "message": "browser_fetch" }));

    let health = client
        .head(format!("{}/health", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);

    let health = client
        .get(format!("{}/health", server.base))
        .send()
        .await
        .unwrap();
    assert_eq!(health.status(), 200);
    assert!(health.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_status_counts_fetches() {
    let target = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&target)
        .await;
    let server = start().await;
    let client = client();

    client
        .post(format!("{}/fetch", server.base))
        .json(&json!({ "url": target.uri() }))
        .send()
        .await
        .unwrap();

    let status: Value = client
        .get(format!("{}/status", server.base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["fetches"], 1);
    assert_eq!(status["attempts"], 1);
    assert_eq!(status["successes"], 0);
    assert_eq!(status["failures"]["total"], 1);
    assert_eq!(status["failures"]["terminal_client"], 1);
    assert!(status["uptime_seconds"].as_f64().unwrap() >= 0.0);
}
