use thiserror::Error;

use crate::model::{NameError, PizzaId, ToppingId};
use crate::storage::StorageError;

/// Failures surfaced by the pizza and topping managers.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Pizza with id {id} does not exist.")]
    PizzaNotFound { id: PizzaId },

    #[error("Topping with id {id} does not exist.")]
    ToppingNotFound { id: ToppingId },

    #[error("Pizza with name {name} already exists.")]
    PizzaNameTaken { name: String },

    #[error("Topping with name {name} already exists.")]
    ToppingNameTaken { name: String },

    /// A pizza referenced a topping id that has no topping.
    #[error("Topping with id {id} does not exist.")]
    MissingTopping { id: ToppingId },

    #[error("Invalid name: {0}")]
    InvalidName(#[from] NameError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Coarse classification the HTTP boundary maps to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    Invalid,
    Unexpected,
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::PizzaNotFound { .. } | ServiceError::ToppingNotFound { .. } => {
                ErrorKind::NotFound
            }
            ServiceError::PizzaNameTaken { .. }
            | ServiceError::ToppingNameTaken { .. }
            | ServiceError::MissingTopping { .. } => ErrorKind::Conflict,
            ServiceError::InvalidName(_) => ErrorKind::Invalid,
            // A constraint hit in storage means a concurrent writer won the
            // race past our pre-check; same class as the pre-check itself.
            ServiceError::Storage(err) if err.is_constraint_violation() => ErrorKind::Conflict,
            ServiceError::Storage(_) => ErrorKind::Unexpected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants() {
        assert_eq!(
            ServiceError::PizzaNotFound { id: PizzaId(1) }.kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            ServiceError::ToppingNotFound { id: ToppingId(1) }.kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn missing_topping_is_conflict_and_reads_does_not_exist() {
        let err = ServiceError::MissingTopping { id: ToppingId(42) };
        assert_eq!(err.kind(), ErrorKind::Conflict);
        assert_eq!(err.to_string(), "Topping with id 42 does not exist.");
    }

    #[test]
    fn storage_constraint_violations_are_conflicts() {
        let unique = ServiceError::from(StorageError::UniqueViolation {
            entity: "pizza",
            name: "Margherita".to_string(),
        });
        let foreign = ServiceError::from(StorageError::ForeignKeyViolation {
            topping: ToppingId(3),
        });
        assert_eq!(unique.kind(), ErrorKind::Conflict);
        assert_eq!(foreign.kind(), ErrorKind::Conflict);
    }

    #[test]
    fn backend_failure_is_unexpected() {
        let err = ServiceError::from(StorageError::Backend("disk on fire".to_string()));
        assert_eq!(err.kind(), ErrorKind::Unexpected);
    }

    #[test]
    fn invalid_name_is_invalid() {
        assert_eq!(
            ServiceError::from(NameError::Empty).kind(),
            ErrorKind::Invalid
        );
    }
}
