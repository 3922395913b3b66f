use std::sync::Arc;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;

use super::middleware::{cors, request_log, CorsPolicy};
use super::{health, pizzas, toppings, AppState};

/// Build the application router.
///
/// Logging wraps CORS so preflight answers are logged too.
pub fn build_router(state: AppState, cors_policy: CorsPolicy) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/pizzas",
            get(pizzas::list_pizzas).post(pizzas::create_pizza),
        )
        .route(
            "/api/pizzas/{id}",
            get(pizzas::get_pizza)
                .put(pizzas::update_pizza)
                .delete(pizzas::delete_pizza),
        )
        .route(
            "/api/pizzas/{pizza_id}/toppings/{topping_id}",
            post(pizzas::add_topping).delete(pizzas::remove_topping),
        )
        .route(
            "/api/toppings",
            get(toppings::list_toppings).post(toppings::create_topping),
        )
        .route(
            "/api/toppings/{id}",
            get(toppings::get_topping)
                .put(toppings::update_topping)
                .delete(toppings::delete_topping),
        )
        .layer(middleware::from_fn_with_state(Arc::new(cors_policy), cors))
        .layer(middleware::from_fn(request_log))
        .with_state(state)
}
