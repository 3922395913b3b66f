//! Storage contract for pizzas and toppings.
//!
//! Managers only talk to the [`ToppingRepository`] and [`PizzaRepository`]
//! traits. Each call is atomic on its own; uniqueness of names and existence
//! of referenced toppings are enforced here as the last line of defense
//! against concurrent writers.

mod memory;

pub use memory::MemoryStore;

use thiserror::Error;

use crate::model::{NewPizza, NewTopping, Pizza, PizzaId, Topping, ToppingId};

/// Errors raised by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// A row with the same unique name already exists.
    #[error("{entity} named '{name}' already exists")]
    UniqueViolation { entity: &'static str, name: String },

    /// A pizza referenced a topping id with no topping row.
    #[error("topping {topping} does not exist")]
    ForeignKeyViolation { topping: ToppingId },

    /// Any other backend fault.
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    /// True for constraint violations, which callers treat as conflicts.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            StorageError::UniqueViolation { .. } | StorageError::ForeignKeyViolation { .. }
        )
    }
}

pub trait ToppingRepository: Send + Sync {
    fn exists_by_name(&self, name: &str) -> Result<bool, StorageError>;

    fn find_by_id(&self, id: ToppingId) -> Result<Option<Topping>, StorageError>;

    fn exists_by_id(&self, id: ToppingId) -> Result<bool, StorageError>;

    /// Insert a new topping under a freshly assigned id.
    fn insert(&self, topping: NewTopping) -> Result<Topping, StorageError>;

    /// Upsert by id.
    fn save(&self, topping: &Topping) -> Result<Topping, StorageError>;

    /// Delete a topping and any pizza association edges pointing at it.
    ///
    /// Returns the number of pizzas that lost the topping.
    fn delete_by_id(&self, id: ToppingId) -> Result<usize, StorageError>;

    fn find_all(&self) -> Result<Vec<Topping>, StorageError>;
}

pub trait PizzaRepository: Send + Sync {
    fn exists_by_name(&self, name: &str) -> Result<bool, StorageError>;

    fn find_by_id(&self, id: PizzaId) -> Result<Option<Pizza>, StorageError>;

    fn exists_by_id(&self, id: PizzaId) -> Result<bool, StorageError>;

    /// Insert a new pizza under a freshly assigned id.
    fn insert(&self, pizza: NewPizza) -> Result<Pizza, StorageError>;

    /// Upsert by id, replacing the stored topping associations.
    fn save(&self, pizza: &Pizza) -> Result<Pizza, StorageError>;

    /// Delete a pizza together with its association edges.
    fn delete_by_id(&self, id: PizzaId) -> Result<(), StorageError>;

    fn find_all(&self) -> Result<Vec<Pizza>, StorageError>;
}
