use std::fmt;

use super::Format;

/// A single rule violation reported by a generated `validate()` method.
///
/// `path` is the dotted label of the offending value (e.g. `body.items[*].name`).
/// Values and bounds are stored in their debug rendering so one error type can
/// describe strings, numbers and collections alike.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("{path}: missing required attribute {name:?}")]
    MissingAttribute { path: String, name: String },

    #[error("{path}: value {value} must be one of {}", .allowed.join(", "))]
    InvalidEnumValue {
        path: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("{path}: value {value} does not match format {format}: {reason}")]
    InvalidFormat {
        path: String,
        value: String,
        format: Format,
        reason: String,
    },

    #[error("{path}: value {value} does not match pattern {pattern:?}")]
    InvalidPattern {
        path: String,
        value: String,
        pattern: String,
    },

    #[error("{path}: value {value} must be {} {bound}", bound_word(.minimum))]
    InvalidRange {
        path: String,
        value: String,
        bound: f64,
        minimum: bool,
    },

    #[error("{path}: length of {value} is {length}, must be {} {bound}", bound_word(.minimum))]
    InvalidLength {
        path: String,
        value: String,
        length: usize,
        bound: usize,
        minimum: bool,
    },
}

fn bound_word(minimum: &bool) -> &'static str {
    if *minimum {
        "greater than or equal to"
    } else {
        "less than or equal to"
    }
}

impl ValidationError {
    pub fn missing_attribute(path: &str, name: &str) -> Self {
        ValidationError::MissingAttribute {
            path: path.to_string(),
            name: name.to_string(),
        }
    }

    pub fn invalid_enum_value<T, A>(path: &str, value: &T, allowed: &[A]) -> Self
    where
        T: fmt::Debug + ?Sized,
        A: fmt::Debug,
    {
        ValidationError::InvalidEnumValue {
            path: path.to_string(),
            value: format!("{value:?}"),
            allowed: allowed.iter().map(|a| format!("{a:?}")).collect(),
        }
    }

    pub fn invalid_format<T>(path: &str, value: &T, format: Format, reason: String) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        ValidationError::InvalidFormat {
            path: path.to_string(),
            value: format!("{value:?}"),
            format,
            reason,
        }
    }

    pub fn invalid_pattern<T>(path: &str, value: &T, pattern: &str) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        ValidationError::InvalidPattern {
            path: path.to_string(),
            value: format!("{value:?}"),
            pattern: pattern.to_string(),
        }
    }

    /// `minimum` is true when `bound` is a lower bound.
    pub fn invalid_range<T>(path: &str, value: &T, bound: f64, minimum: bool) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        ValidationError::InvalidRange {
            path: path.to_string(),
            value: format!("{value:?}"),
            bound,
            minimum,
        }
    }

    pub fn invalid_length<T>(
        path: &str,
        value: &T,
        length: usize,
        bound: usize,
        minimum: bool,
    ) -> Self
    where
        T: fmt::Debug + ?Sized,
    {
        ValidationError::InvalidLength {
            path: path.to_string(),
            value: format!("{value:?}"),
            length,
            bound,
            minimum,
        }
    }

    /// Label of the value that failed validation.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            ValidationError::MissingAttribute { path, .. }
            | ValidationError::InvalidEnumValue { path, .. }
            | ValidationError::InvalidFormat { path, .. }
            | ValidationError::InvalidPattern { path, .. }
            | ValidationError::InvalidRange { path, .. }
            | ValidationError::InvalidLength { path, .. } => path,
        }
    }
}

/// Every violation found during one `validate()` call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append the violations collected by a nested `validate()` call.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// `Ok(())` when nothing was collected, the aggregate otherwise.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.as_slice() {
            [] => write!(f, "no validation errors"),
            [single] => write!(f, "{single}"),
            many => {
                write!(f, "{} validation errors:", many.len())?;
                for error in many {
                    write!(f, "\n  - {error}")?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        ValidationErrors {
            errors: vec![error],
        }
    }
}
