use std::fmt;

use crate::error::InvalidQuantity;

/// What went wrong with one field.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldErrorKind {
    /// The value was rejected by the field's validator.
    Invalid(InvalidQuantity),
    /// A required field was not provided.
    Missing,
    /// An input key the schema does not declare.
    Extra,
    /// Assignment on a frozen model.
    Frozen,
    /// Assignment to a field the schema does not declare.
    Unknown,
}

/// One field-level failure.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// Field (or input key) the failure belongs to.
    pub field: String,
    /// Failure kind.
    pub kind: FieldErrorKind,
}

impl FieldError {
    pub(crate) fn new(field: impl Into<String>, kind: FieldErrorKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            FieldErrorKind::Invalid(e) => write!(f, "{}: {}", self.field, e.detailed()),
            FieldErrorKind::Missing => write!(f, "{}: field required", self.field),
            FieldErrorKind::Extra => write!(f, "{}: extra inputs are not permitted", self.field),
            FieldErrorKind::Frozen => write!(f, "{}: instance is frozen", self.field),
            FieldErrorKind::Unknown => write!(f, "{}: no such field", self.field),
        }
    }
}

/// Every field-level failure of one construction or assignment.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub struct ValidationError {
    /// Name of the schema.
    pub model: String,
    /// Failures in input order.
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    pub(crate) fn single(model: &str, error: FieldError) -> Self {
        Self {
            model: model.to_string(),
            errors: vec![error],
        }
    }

    /// Failure recorded for `field`, if any.
    pub fn for_field(&self, field: &str) -> Option<&FieldErrorKind> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| &e.kind)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.errors.len();
        write!(
            f,
            "{} validation error{} for {}",
            n,
            if n == 1 { "" } else { "s" },
            self.model
        )?;
        for e in &self.errors {
            write!(f, "\n  {}", e)?;
        }
        Ok(())
    }
}

/// Failure of a JSON load.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Not valid JSON, or not a JSON object.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Valid JSON that does not validate against the schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
