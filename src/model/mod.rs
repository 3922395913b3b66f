//! Domain entities: toppings, pizzas and the rules on their names.

mod pizza;
mod topping;

pub use pizza::{NewPizza, Pizza, PizzaId};
pub use topping::{NewTopping, Topping, ToppingId};

use thiserror::Error;

/// Longest accepted pizza or topping name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Reasons a pizza or topping name is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must not be empty")]
    Empty,

    #[error("name must be at most {MAX_NAME_LEN} characters, got {len}")]
    TooLong { len: usize },
}

/// Check a name against the 1..=20 character rule.
///
/// Length is counted in `char`s so multi-byte names are not penalized.
pub fn validate_name(name: &str) -> Result<(), NameError> {
    let len = name.chars().count();
    if len == 0 {
        return Err(NameError::Empty);
    }
    if len > MAX_NAME_LEN {
        return Err(NameError::TooLong { len });
    }
    Ok(())
}
