//! HTTP boundary: routing, (de)serialization and error mapping.
//!
//! Handlers hold no business logic; they translate requests into
//! [`PizzaManager`] and [`ToppingManager`] calls.

pub mod dto;
pub mod error;
pub mod extract;
pub mod health;
pub mod middleware;
pub mod pizzas;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod toppings;
pub mod tracing;

use std::sync::Arc;

use crate::service::{PizzaManager, ToppingManager};
use crate::storage::{MemoryStore, PizzaRepository, ToppingRepository};

pub use error::{ApiError, ErrorResponse};
pub use router::build_router;
pub use server::{ApiHandle, ApiServer, ServerError};

/// Managers shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pizzas: PizzaManager,
    pub toppings: ToppingManager,
}

impl AppState {
    pub fn new(pizzas: PizzaManager, toppings: ToppingManager) -> Self {
        Self { pizzas, toppings }
    }

    /// Wire both managers over one shared in-memory store.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::new());
        let pizza_store: Arc<dyn PizzaRepository> = store.clone();
        let topping_store: Arc<dyn ToppingRepository> = store;
        Self::new(
            PizzaManager::new(pizza_store, topping_store.clone()),
            ToppingManager::new(topping_store),
        )
    }
}
