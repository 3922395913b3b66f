use std::fmt;

use serde::{Deserialize, Serialize};

/// Storage-assigned topping identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToppingId(pub u64);

impl fmt::Display for ToppingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted topping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Topping {
    pub id: ToppingId,
    pub name: String,
}

impl Topping {
    pub fn new(id: ToppingId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A topping that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTopping {
    pub name: String,
}

impl NewTopping {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
