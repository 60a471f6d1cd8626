//! Cross-cutting error types.
//!
//! Storage and transport errors live in their own crates (`DatabaseError`,
//! `ChatError`). Everything converges into `anyhow` only inside `pte-cli`.

use thiserror::Error;

/// Errors that can be raised by any crate of the task engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Input failed validation (missing field, bad enum, bad date).
    #[error("Validation error: {0}")]
    Validation(String),
}

impl CoreError {
    /// Shorthand for a missing task.
    #[must_use]
    pub fn task_not_found(id: i64) -> Self {
        Self::NotFound {
            entity_type: "task".to_string(),
            id: id.to_string(),
        }
    }

    /// Whether this error is a validation failure.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::task_not_found(42);
        assert_eq!(err.to_string(), "Entity not found: task 42");
        assert!(!err.is_validation());
    }

    #[test]
    fn validation_message_is_prefixed() {
        let err = CoreError::Validation("missing required field: project".into());
        assert_eq!(
            err.to_string(),
            "Validation error: missing required field: project"
        );
        assert!(err.is_validation());
    }
}
