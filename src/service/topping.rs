use std::sync::Arc;

use crate::model::{validate_name, NewTopping, Topping, ToppingId};
use crate::storage::ToppingRepository;

use super::ServiceError;

/// Owns the topping lifecycle.
#[derive(Clone)]
pub struct ToppingManager {
    toppings: Arc<dyn ToppingRepository>,
}

impl ToppingManager {
    pub fn new(toppings: Arc<dyn ToppingRepository>) -> Self {
        Self { toppings }
    }

    pub fn list_all(&self) -> Result<Vec<Topping>, ServiceError> {
        Ok(self.toppings.find_all()?)
    }

    pub fn find_by_id(&self, id: ToppingId) -> Result<Option<Topping>, ServiceError> {
        Ok(self.toppings.find_by_id(id)?)
    }

    /// Create a topping.
    ///
    /// # Errors
    /// `ToppingNameTaken` if a topping with `name` exists, `InvalidName` if
    /// `name` is empty or too long.
    pub fn create(&self, name: &str) -> Result<Topping, ServiceError> {
        validate_name(name)?;
        if self.toppings.exists_by_name(name)? {
            return Err(ServiceError::ToppingNameTaken {
                name: name.to_string(),
            });
        }

        let topping = self.toppings.insert(NewTopping::new(name))?;
        tracing::debug!(topping_id = %topping.id, name = %topping.name, "Topping created");
        Ok(topping)
    }

    /// Rename a topping.
    ///
    /// A blank `new_name`, or one equal to the current name, leaves the
    /// topping untouched.
    pub fn update(&self, id: ToppingId, new_name: &str) -> Result<Topping, ServiceError> {
        let mut topping = self
            .toppings
            .find_by_id(id)?
            .ok_or(ServiceError::ToppingNotFound { id })?;

        if !new_name.is_empty() && topping.name != new_name {
            validate_name(new_name)?;
            tracing::debug!(topping_id = %id, old = %topping.name, new = %new_name, "Topping renamed");
            topping.name = new_name.to_string();
        }

        Ok(self.toppings.save(&topping)?)
    }

    /// Delete a topping.
    ///
    /// Pizzas that still carry the topping keep existing; their association
    /// to it is dropped by storage.
    pub fn delete(&self, id: ToppingId) -> Result<(), ServiceError> {
        if !self.toppings.exists_by_id(id)? {
            return Err(ServiceError::ToppingNotFound { id });
        }

        let detached = self.toppings.delete_by_id(id)?;
        if detached > 0 {
            tracing::info!(topping_id = %id, pizzas = detached, "Deleted topping was removed from pizzas");
        } else {
            tracing::debug!(topping_id = %id, "Topping deleted");
        }
        Ok(())
    }
}
