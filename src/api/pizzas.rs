//! Handlers under `/api/pizzas`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::dto::{PizzaRequest, PizzaResponse, PizzaUpdateRequest};
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use super::AppState;
use crate::model::{PizzaId, ToppingId};
use crate::service::ServiceError;

pub async fn list_pizzas(
    State(state): State<AppState>,
) -> Result<Json<Vec<PizzaResponse>>, ApiError> {
    let pizzas = state.pizzas.list_all()?;
    Ok(Json(pizzas.iter().map(PizzaResponse::from).collect()))
}

pub async fn get_pizza(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PizzaId>,
) -> Result<Json<PizzaResponse>, ApiError> {
    let pizza = state
        .pizzas
        .find_by_id(id)?
        .ok_or(ServiceError::PizzaNotFound { id })?;
    Ok(Json(PizzaResponse::from(&pizza)))
}

pub async fn create_pizza(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<PizzaRequest>,
) -> Result<(StatusCode, Json<PizzaResponse>), ApiError> {
    let pizza = state.pizzas.create(&request.name, &request.topping_ids)?;
    Ok((StatusCode::CREATED, Json(PizzaResponse::from(&pizza))))
}

pub async fn update_pizza(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PizzaId>,
    ApiJson(request): ApiJson<PizzaUpdateRequest>,
) -> Result<Json<PizzaResponse>, ApiError> {
    let pizza = state
        .pizzas
        .update(id, &request.name, &request.topping_ids)?;
    Ok(Json(PizzaResponse::from(&pizza)))
}

pub async fn delete_pizza(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<PizzaId>,
) -> Result<StatusCode, ApiError> {
    state.pizzas.delete(id)?;
    Ok(StatusCode::OK)
}

pub async fn add_topping(
    State(state): State<AppState>,
    ApiPath((pizza_id, topping_id)): ApiPath<(PizzaId, ToppingId)>,
) -> Result<Json<PizzaResponse>, ApiError> {
    let topping = state
        .toppings
        .find_by_id(topping_id)?
        .ok_or(ServiceError::ToppingNotFound { id: topping_id })?;
    let pizza = state.pizzas.add_topping(pizza_id, topping)?;
    Ok(Json(PizzaResponse::from(&pizza)))
}

pub async fn remove_topping(
    State(state): State<AppState>,
    ApiPath((pizza_id, topping_id)): ApiPath<(PizzaId, ToppingId)>,
) -> Result<Json<PizzaResponse>, ApiError> {
    let topping = state
        .toppings
        .find_by_id(topping_id)?
        .ok_or(ServiceError::ToppingNotFound { id: topping_id })?;
    let pizza = state.pizzas.remove_topping(pizza_id, &topping)?;
    Ok(Json(PizzaResponse::from(&pizza)))
}
