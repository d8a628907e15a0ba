//! Error types produced by criteria validation.
//!
//! Two categories, handled differently by callers:
//!
//! | Error | Category | Caller action |
//! |-------|----------|---------------|
//! | [`CriteriaError::Field`] | user input | show the message on the field, focus it |
//! | [`CriteriaError::Structural`] | internal | abort the submission, report a fault |
use serde::Serialize;
use thiserror::Error;

use crate::types::Field;

/// A single user-correctable problem tied to one input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// The form itself is in a state no user edit can fix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum StructuralError {
    #[error("no search mode selected")]
    NoModeSelected,
}

/// Result of a failed validation. Exactly one is reported per call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error(transparent)]
    Field(#[from] FieldError),
    #[error("invalid form state: {0}")]
    Structural(#[from] StructuralError),
}

impl CriteriaError {
    pub fn field(&self) -> Option<Field> {
        match self {
            CriteriaError::Field(err) => Some(err.field),
            CriteriaError::Structural(_) => None,
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, CriteriaError::Structural(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_error_display_names_field() {
        let err = CriteriaError::from(FieldError::new(Field::Gothram, "Please enter your Gothram."));
        assert_eq!(err.to_string(), "gothram: Please enter your Gothram.");
        assert_eq!(err.field(), Some(Field::Gothram));
        assert!(!err.is_structural());
    }

    #[test]
    fn structural_error_has_no_field() {
        let err = CriteriaError::from(StructuralError::NoModeSelected);
        assert!(err.is_structural());
        assert_eq!(err.field(), None);
        assert_eq!(err.to_string(), "invalid form state: no search mode selected");
    }
}
