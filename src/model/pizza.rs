use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use super::topping::{Topping, ToppingId};

/// Storage-assigned pizza identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PizzaId(pub u64);

impl fmt::Display for PizzaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted pizza together with its resolved toppings.
///
/// Toppings form a set keyed by [`ToppingId`]: two toppings with the same id
/// are the same topping regardless of name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pizza {
    pub id: PizzaId,
    pub name: String,
    toppings: BTreeMap<ToppingId, Topping>,
}

impl Pizza {
    pub fn new(id: PizzaId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            toppings: BTreeMap::new(),
        }
    }

    pub fn with_toppings(mut self, toppings: impl IntoIterator<Item = Topping>) -> Self {
        self.replace_toppings(toppings);
        self
    }

    /// Toppings in ascending id order.
    pub fn toppings(&self) -> impl Iterator<Item = &Topping> {
        self.toppings.values()
    }

    pub fn topping_ids(&self) -> BTreeSet<ToppingId> {
        self.toppings.keys().copied().collect()
    }

    pub fn has_topping(&self, id: ToppingId) -> bool {
        self.toppings.contains_key(&id)
    }

    /// Add a topping. Returns `false` if it was already on the pizza.
    pub fn add_topping(&mut self, topping: Topping) -> bool {
        if self.toppings.contains_key(&topping.id) {
            return false;
        }
        self.toppings.insert(topping.id, topping);
        true
    }

    pub fn remove_topping(&mut self, id: ToppingId) -> Option<Topping> {
        self.toppings.remove(&id)
    }

    /// Replace the whole topping set. Duplicate ids collapse into one entry.
    pub fn replace_toppings(&mut self, toppings: impl IntoIterator<Item = Topping>) {
        self.toppings = toppings.into_iter().map(|t| (t.id, t)).collect();
    }
}

/// A pizza that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPizza {
    pub name: String,
    pub topping_ids: BTreeSet<ToppingId>,
}

impl NewPizza {
    pub fn new(name: impl Into<String>, topping_ids: impl IntoIterator<Item = ToppingId>) -> Self {
        Self {
            name: name.into(),
            topping_ids: topping_ids.into_iter().collect(),
        }
    }
}
