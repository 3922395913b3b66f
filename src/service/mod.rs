//! Pizza and topping management.
//!
//! Managers validate every request against storage before issuing a single
//! write, so a rejected operation never leaves partial state behind.

mod error;
mod pizza;
mod topping;

pub use error::{ErrorKind, ServiceError};
pub use pizza::PizzaManager;
pub use topping::ToppingManager;
