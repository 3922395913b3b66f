//! Shared test utilities.

#![allow(dead_code, unused_imports)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pizza_manager::api::middleware::CorsPolicy;
use pizza_manager::api::{build_router, ApiHandle, ApiServer, AppState, ServerError};
use pizza_manager::config::Config;
use serde_json::Value;
use tokio::task::JoinHandle;
use tower::ServiceExt;

pub const FRONTEND_ORIGIN: &str = "http://localhost:3000";

/// Router over a fresh in-memory store.
pub fn test_router() -> Router {
    router_with_state(AppState::in_memory())
}

pub fn router_with_state(state: AppState) -> Router {
    build_router(state, CorsPolicy::new(&[FRONTEND_ORIGIN.to_string()]))
}

/// Send a request through the router and decode the JSON body.
///
/// An empty body decodes to `Value::Null`.
pub async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Create a topping and return its id.
pub async fn create_topping(router: &Router, name: &str) -> u64 {
    let (status, body) = send(
        router,
        "POST",
        "/api/toppings",
        Some(serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "creating topping {name}: {body}");
    body["id"].as_u64().unwrap()
}

/// Create a pizza and return its id.
pub async fn create_pizza(router: &Router, name: &str, topping_ids: &[u64]) -> u64 {
    let (status, body) = send(
        router,
        "POST",
        "/api/pizzas",
        Some(serde_json::json!({ "name": name, "toppingIds": topping_ids })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "creating pizza {name}: {body}");
    body["id"].as_u64().unwrap()
}

/// Topping names of a pizza response, in response order.
pub fn topping_names(pizza: &Value) -> Vec<String> {
    pizza["toppings"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap().to_string())
        .collect()
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.server.bind_addr = "127.0.0.1:0".to_string();
    config.server.shutdown_grace_seconds = 1;
    config
}

/// Bind a real server on a free port and run it in the background.
pub async fn start_server() -> (SocketAddr, ApiHandle, JoinHandle<Result<(), ServerError>>) {
    let mut server = ApiServer::new(&test_config()).expect("Failed to create server");

    // Bind before spawning so the port is known and held.
    let addr = server.try_bind().await.expect("Failed to bind");
    let handle = server.handle();
    let task = tokio::spawn(server.run());

    assert!(wait_for_server(addr, Duration::from_secs(2)).await);
    (addr, handle, task)
}

/// Wait for a server to become available.
pub async fn wait_for_server(addr: SocketAddr, timeout: Duration) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if tokio::net::TcpStream::connect(addr).await.is_ok() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
