//! End-to-end checks against a bound server.

mod common;

use std::time::Duration;

use pizza_manager::api::dto::{PizzaRequest, PizzaResponse, ToppingRequest, ToppingResponse};
use pizza_manager::api::middleware::REQUEST_ID_HEADER;
use pizza_manager::api::{ApiServer, ServerError};
use reqwest::Client;

#[tokio::test]
async fn test_health_endpoint() {
    let (addr, handle, _task) = common::start_server().await;

    let resp = Client::new()
        .get(format!("http://{}/health", addr))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status().as_u16(), 200);
    assert!(resp.headers().contains_key(REQUEST_ID_HEADER));

    let json: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "pizza-manager");

    handle.shutdown();
}

#[tokio::test]
async fn test_pizza_workflow_over_http() {
    let (addr, handle, _task) = common::start_server().await;
    let client = Client::new();
    let base = format!("http://{}", addr);

    let cheese: ToppingResponse = client
        .post(format!("{base}/api/toppings"))
        .json(&ToppingRequest {
            name: "Cheese".to_string(),
        })
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let resp = client
        .post(format!("{base}/api/pizzas"))
        .json(&PizzaRequest {
            name: "Margherita".to_string(),
            topping_ids: [cheese.id].into(),
        })
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status().as_u16(), 201);
    let pizza: PizzaResponse = resp.json().await.unwrap();
    assert_eq!(pizza.toppings, vec![cheese.clone()]);

    let listed: Vec<PizzaResponse> = client
        .get(format!("{base}/api/pizzas"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed, vec![pizza]);

    handle.shutdown();
}

#[tokio::test]
async fn test_shutdown_stops_server() {
    let (addr, handle, task) = common::start_server().await;

    handle.shutdown();

    let result = tokio::time::timeout(Duration::from_secs(5), task)
        .await
        .expect("server did not stop in time")
        .expect("server task panicked");
    assert!(result.is_ok());
    assert!(tokio::net::TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_run_without_bind_fails() {
    let server = ApiServer::new(&common::test_config()).unwrap();
    let result = server.run().await;
    assert!(matches!(result, Err(ServerError::NotBound)));
}

#[tokio::test]
async fn test_bind_conflict_is_reported() {
    let (addr, handle, _task) = common::start_server().await;

    let mut config = common::test_config();
    config.server.bind_addr = addr.to_string();
    let mut second = ApiServer::new(&config).unwrap();

    let result = second.try_bind().await;
    assert!(matches!(result, Err(ServerError::Bind { .. })));

    handle.shutdown();
}
