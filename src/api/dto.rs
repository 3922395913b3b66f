//! Wire shapes and the entity → response mapping.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::model::{Pizza, PizzaId, Topping, ToppingId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToppingResponse {
    pub id: ToppingId,
    pub name: String,
}

/// A pizza with its toppings expanded, ordered by topping id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PizzaResponse {
    pub id: PizzaId,
    pub name: String,
    pub toppings: Vec<ToppingResponse>,
}

/// Body of `POST /api/pizzas`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topping_ids: BTreeSet<ToppingId>,
}

/// Body of `PUT /api/pizzas/{id}`.
///
/// `toppingIds` is the complete new topping list; omitting it clears the
/// pizza's toppings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PizzaUpdateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub topping_ids: Vec<ToppingId>,
}

/// Body of `POST /api/toppings` and `PUT /api/toppings/{id}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToppingRequest {
    #[serde(default)]
    pub name: String,
}

impl From<&Topping> for ToppingResponse {
    fn from(topping: &Topping) -> Self {
        Self {
            id: topping.id,
            name: topping.name.clone(),
        }
    }
}

impl From<&Pizza> for PizzaResponse {
    fn from(pizza: &Pizza) -> Self {
        Self {
            id: pizza.id,
            name: pizza.name.clone(),
            toppings: pizza.toppings().map(ToppingResponse::from).collect(),
        }
    }
}
