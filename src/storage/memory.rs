//! In-process store backing both repositories.
//!
//! Pizzas and toppings live in separate tables joined by a
//! `(pizza, topping)` edge set, mirroring a relational many-to-many layout.
//! All tables sit behind a single lock so every repository call observes
//! and mutates a consistent snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use parking_lot::RwLock;

use super::{PizzaRepository, StorageError, ToppingRepository};
use crate::model::{NewPizza, NewTopping, Pizza, PizzaId, Topping, ToppingId};

/// Cloneable handle to the shared tables.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    last_topping_id: u64,
    last_pizza_id: u64,
    toppings: BTreeMap<ToppingId, String>,
    pizzas: BTreeMap<PizzaId, String>,
    pizza_toppings: BTreeSet<(PizzaId, ToppingId)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tables {
    fn topping(&self, id: ToppingId) -> Option<Topping> {
        self.toppings.get(&id).map(|name| Topping::new(id, name.clone()))
    }

    fn pizza(&self, id: PizzaId) -> Option<Pizza> {
        let name = self.pizzas.get(&id)?;
        let toppings = self
            .pizza_toppings
            .range((id, ToppingId(0))..=(id, ToppingId(u64::MAX)))
            .filter_map(|&(_, topping)| self.topping(topping));
        Some(Pizza::new(id, name.clone()).with_toppings(toppings))
    }

    fn topping_name_taken(&self, name: &str, except: Option<ToppingId>) -> bool {
        self.toppings
            .iter()
            .any(|(id, existing)| existing == name && Some(*id) != except)
    }

    fn pizza_name_taken(&self, name: &str, except: Option<PizzaId>) -> bool {
        self.pizzas
            .iter()
            .any(|(id, existing)| existing == name && Some(*id) != except)
    }

    fn check_toppings_exist<'a>(
        &self,
        ids: impl IntoIterator<Item = &'a ToppingId>,
    ) -> Result<(), StorageError> {
        match ids.into_iter().find(|id| !self.toppings.contains_key(id)) {
            Some(missing) => Err(StorageError::ForeignKeyViolation { topping: *missing }),
            None => Ok(()),
        }
    }

    fn replace_edges(&mut self, pizza: PizzaId, toppings: &BTreeSet<ToppingId>) {
        self.pizza_toppings.retain(|(p, _)| *p != pizza);
        self.pizza_toppings
            .extend(toppings.iter().map(|topping| (pizza, *topping)));
    }
}

impl ToppingRepository for MemoryStore {
    fn exists_by_name(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.inner.read().topping_name_taken(name, None))
    }

    fn find_by_id(&self, id: ToppingId) -> Result<Option<Topping>, StorageError> {
        Ok(self.inner.read().topping(id))
    }

    fn exists_by_id(&self, id: ToppingId) -> Result<bool, StorageError> {
        Ok(self.inner.read().toppings.contains_key(&id))
    }

    fn insert(&self, topping: NewTopping) -> Result<Topping, StorageError> {
        let mut tables = self.inner.write();
        if tables.topping_name_taken(&topping.name, None) {
            return Err(StorageError::UniqueViolation {
                entity: "topping",
                name: topping.name,
            });
        }
        tables.last_topping_id += 1;
        let id = ToppingId(tables.last_topping_id);
        tables.toppings.insert(id, topping.name.clone());
        Ok(Topping::new(id, topping.name))
    }

    fn save(&self, topping: &Topping) -> Result<Topping, StorageError> {
        let mut tables = self.inner.write();
        if tables.topping_name_taken(&topping.name, Some(topping.id)) {
            return Err(StorageError::UniqueViolation {
                entity: "topping",
                name: topping.name.clone(),
            });
        }
        tables.last_topping_id = tables.last_topping_id.max(topping.id.0);
        tables.toppings.insert(topping.id, topping.name.clone());
        Ok(topping.clone())
    }

    fn delete_by_id(&self, id: ToppingId) -> Result<usize, StorageError> {
        let mut tables = self.inner.write();
        tables.toppings.remove(&id);
        let before = tables.pizza_toppings.len();
        tables.pizza_toppings.retain(|(_, topping)| *topping != id);
        Ok(before - tables.pizza_toppings.len())
    }

    fn find_all(&self) -> Result<Vec<Topping>, StorageError> {
        let tables = self.inner.read();
        Ok(tables
            .toppings
            .iter()
            .map(|(id, name)| Topping::new(*id, name.clone()))
            .collect())
    }
}

impl PizzaRepository for MemoryStore {
    fn exists_by_name(&self, name: &str) -> Result<bool, StorageError> {
        Ok(self.inner.read().pizza_name_taken(name, None))
    }

    fn find_by_id(&self, id: PizzaId) -> Result<Option<Pizza>, StorageError> {
        Ok(self.inner.read().pizza(id))
    }

    fn exists_by_id(&self, id: PizzaId) -> Result<bool, StorageError> {
        Ok(self.inner.read().pizzas.contains_key(&id))
    }

    fn insert(&self, pizza: NewPizza) -> Result<Pizza, StorageError> {
        let mut tables = self.inner.write();
        if tables.pizza_name_taken(&pizza.name, None) {
            return Err(StorageError::UniqueViolation {
                entity: "pizza",
                name: pizza.name,
            });
        }
        tables.check_toppings_exist(&pizza.topping_ids)?;

        tables.last_pizza_id += 1;
        let id = PizzaId(tables.last_pizza_id);
        tables.pizzas.insert(id, pizza.name);
        tables.replace_edges(id, &pizza.topping_ids);
        tables
            .pizza(id)
            .ok_or_else(|| StorageError::Backend(format!("pizza {id} vanished after insert")))
    }

    fn save(&self, pizza: &Pizza) -> Result<Pizza, StorageError> {
        let mut tables = self.inner.write();
        if tables.pizza_name_taken(&pizza.name, Some(pizza.id)) {
            return Err(StorageError::UniqueViolation {
                entity: "pizza",
                name: pizza.name.clone(),
            });
        }
        let topping_ids = pizza.topping_ids();
        tables.check_toppings_exist(&topping_ids)?;

        tables.last_pizza_id = tables.last_pizza_id.max(pizza.id.0);
        tables.pizzas.insert(pizza.id, pizza.name.clone());
        tables.replace_edges(pizza.id, &topping_ids);
        tables
            .pizza(pizza.id)
            .ok_or_else(|| StorageError::Backend(format!("pizza {} vanished after save", pizza.id)))
    }

    fn delete_by_id(&self, id: PizzaId) -> Result<(), StorageError> {
        let mut tables = self.inner.write();
        tables.pizzas.remove(&id);
        tables.pizza_toppings.retain(|(pizza, _)| *pizza != id);
        Ok(())
    }

    fn find_all(&self) -> Result<Vec<Pizza>, StorageError> {
        let tables = self.inner.read();
        Ok(tables
            .pizzas
            .keys()
            .filter_map(|id| tables.pizza(*id))
            .collect())
    }
}
