use std::collections::BTreeSet;
use std::sync::Arc;

use crate::model::{validate_name, NewPizza, Pizza, PizzaId, Topping, ToppingId};
use crate::storage::{PizzaRepository, ToppingRepository};

use super::ServiceError;

/// Owns the pizza lifecycle and its topping associations.
///
/// Holds topping storage only to check that referenced toppings exist; it
/// never creates or deletes toppings.
#[derive(Clone)]
pub struct PizzaManager {
    pizzas: Arc<dyn PizzaRepository>,
    toppings: Arc<dyn ToppingRepository>,
}

impl PizzaManager {
    pub fn new(pizzas: Arc<dyn PizzaRepository>, toppings: Arc<dyn ToppingRepository>) -> Self {
        Self { pizzas, toppings }
    }

    pub fn list_all(&self) -> Result<Vec<Pizza>, ServiceError> {
        Ok(self.pizzas.find_all()?)
    }

    pub fn find_by_id(&self, id: PizzaId) -> Result<Option<Pizza>, ServiceError> {
        Ok(self.pizzas.find_by_id(id)?)
    }

    /// Create a pizza carrying the given toppings.
    ///
    /// # Errors
    /// - `PizzaNameTaken` if the name is in use.
    /// - `MissingTopping` for the first id with no topping behind it.
    /// - `InvalidName` if the name is empty or too long.
    pub fn create(
        &self,
        name: &str,
        topping_ids: &BTreeSet<ToppingId>,
    ) -> Result<Pizza, ServiceError> {
        validate_name(name)?;
        if self.pizzas.exists_by_name(name)? {
            return Err(ServiceError::PizzaNameTaken {
                name: name.to_string(),
            });
        }

        let toppings = self.resolve_toppings(topping_ids)?;
        let pizza = self
            .pizzas
            .insert(NewPizza::new(name, toppings.iter().map(|t| t.id)))?;

        tracing::debug!(
            pizza_id = %pizza.id,
            name = %pizza.name,
            toppings = toppings.len(),
            "Pizza created"
        );
        Ok(pizza)
    }

    /// Rename a pizza and replace its toppings.
    ///
    /// The topping set becomes exactly `topping_ids`; toppings not listed are
    /// dropped. A blank or unchanged `new_name` keeps the current name.
    ///
    /// Renaming does not pre-check for another pizza with the same name.
    /// Storage still refuses an actual collision, which surfaces as a
    /// conflict.
    pub fn update(
        &self,
        id: PizzaId,
        new_name: &str,
        topping_ids: &[ToppingId],
    ) -> Result<Pizza, ServiceError> {
        let mut pizza = self
            .pizzas
            .find_by_id(id)?
            .ok_or(ServiceError::PizzaNotFound { id })?;

        if !new_name.is_empty() && pizza.name != new_name {
            validate_name(new_name)?;
            pizza.name = new_name.to_string();
        }

        let toppings = self.resolve_toppings(topping_ids)?;
        pizza.replace_toppings(toppings);

        let saved = self.pizzas.save(&pizza)?;
        tracing::debug!(pizza_id = %id, name = %saved.name, "Pizza updated");
        Ok(saved)
    }

    pub fn delete(&self, id: PizzaId) -> Result<(), ServiceError> {
        if !self.pizzas.exists_by_id(id)? {
            return Err(ServiceError::PizzaNotFound { id });
        }
        self.pizzas.delete_by_id(id)?;
        tracing::debug!(pizza_id = %id, "Pizza deleted");
        Ok(())
    }

    /// Put a topping on a pizza. Adding a topping already present is a no-op.
    pub fn add_topping(&self, pizza_id: PizzaId, topping: Topping) -> Result<Pizza, ServiceError> {
        let mut pizza = self.require(pizza_id)?;
        let topping_id = topping.id;
        if pizza.add_topping(topping) {
            tracing::debug!(pizza_id = %pizza_id, topping_id = %topping_id, "Topping added to pizza");
        }
        Ok(self.pizzas.save(&pizza)?)
    }

    /// Take a topping off a pizza. Removing an absent topping is a no-op.
    pub fn remove_topping(
        &self,
        pizza_id: PizzaId,
        topping: &Topping,
    ) -> Result<Pizza, ServiceError> {
        let mut pizza = self.require(pizza_id)?;
        if pizza.remove_topping(topping.id).is_some() {
            tracing::debug!(pizza_id = %pizza_id, topping_id = %topping.id, "Topping removed from pizza");
        }
        Ok(self.pizzas.save(&pizza)?)
    }

    fn require(&self, id: PizzaId) -> Result<Pizza, ServiceError> {
        self.pizzas
            .find_by_id(id)?
            .ok_or(ServiceError::PizzaNotFound { id })
    }

    /// Look up every id, failing on the first one without a topping.
    fn resolve_toppings<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ToppingId>,
    ) -> Result<Vec<Topping>, ServiceError> {
        ids.into_iter()
            .map(|id| {
                self.toppings
                    .find_by_id(*id)?
                    .ok_or(ServiceError::MissingTopping { id: *id })
            })
            .collect()
    }
}
