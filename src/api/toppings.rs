//! Handlers under `/api/toppings`.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::dto::{ToppingRequest, ToppingResponse};
use super::error::ApiError;
use super::extract::{ApiJson, ApiPath};
use super::AppState;
use crate::model::ToppingId;
use crate::service::ServiceError;

pub async fn list_toppings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ToppingResponse>>, ApiError> {
    let toppings = state.toppings.list_all()?;
    Ok(Json(toppings.iter().map(ToppingResponse::from).collect()))
}

pub async fn get_topping(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ToppingId>,
) -> Result<Json<ToppingResponse>, ApiError> {
    let topping = state
        .toppings
        .find_by_id(id)?
        .ok_or(ServiceError::ToppingNotFound { id })?;
    Ok(Json(ToppingResponse::from(&topping)))
}

pub async fn create_topping(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<ToppingRequest>,
) -> Result<Json<ToppingResponse>, ApiError> {
    let topping = state.toppings.create(&request.name)?;
    Ok(Json(ToppingResponse::from(&topping)))
}

pub async fn update_topping(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ToppingId>,
    ApiJson(request): ApiJson<ToppingRequest>,
) -> Result<Json<ToppingResponse>, ApiError> {
    let topping = state.toppings.update(id, &request.name)?;
    Ok(Json(ToppingResponse::from(&topping)))
}

pub async fn delete_topping(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<ToppingId>,
) -> Result<StatusCode, ApiError> {
    state.toppings.delete(id)?;
    Ok(StatusCode::OK)
}
