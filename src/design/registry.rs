use std::collections::BTreeMap;

use super::check::DesignIssue;
use super::types::{Attribute, DataType, Object, UserType};

/// Errors raised while looking up or validating a design.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DesignError {
    #[error("unknown type {0:?}")]
    UnknownType(String),
    #[error("type {0:?} is not an object")]
    NotAnObject(String),
    #[error("design has {} issue(s)", .0.len())]
    Invalid(Vec<DesignIssue>),
}

/// A transform the generator emits between two user types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformDecl {
    /// Function name; derived from the type names when absent.
    pub name: Option<String>,
    pub source: String,
    pub target: String,
}

impl TransformDecl {
    #[must_use]
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        TransformDecl {
            name: None,
            source: source.into(),
            target: target.into(),
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Registry of user types: the root of every attribute graph.
///
/// Named and projected references inside attributes are resolved through
/// this registry, which is what allows a type to refer to itself.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Design {
    types: BTreeMap<String, UserType>,
    transforms: Vec<TransformDecl>,
}

impl Design {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, user_type: UserType) -> Self {
        self.add_type(user_type);
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: TransformDecl) -> Self {
        self.transforms.push(transform);
        self
    }

    /// Register `user_type`, replacing any type of the same name.
    pub fn add_type(&mut self, user_type: UserType) {
        self.types.insert(user_type.name.clone(), user_type);
    }

    pub fn add_transform(&mut self, transform: TransformDecl) {
        self.transforms.push(transform);
    }

    #[must_use]
    pub fn user_type(&self, name: &str) -> Option<&UserType> {
        self.types.get(name)
    }

    /// User types in name order.
    pub fn types(&self) -> impl Iterator<Item = &UserType> {
        self.types.values()
    }

    #[must_use]
    pub fn transforms(&self) -> &[TransformDecl] {
        &self.transforms
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn lookup(&self, name: &str) -> Result<&UserType, DesignError> {
        self.types
            .get(name)
            .ok_or_else(|| DesignError::UnknownType(name.to_string()))
    }

    /// Follow a named or projected reference to the attribute it stands for.
    ///
    /// Other attributes are returned unchanged.
    pub fn underlying<'a>(&'a self, attribute: &'a Attribute) -> Result<&'a Attribute, DesignError> {
        match &attribute.data_type {
            DataType::Named(name) | DataType::Projected(name) => {
                Ok(&self.lookup(name)?.attribute)
            }
            _ => Ok(attribute),
        }
    }

    /// The object behind `attribute`, following one level of naming.
    pub fn object_of<'a>(&'a self, attribute: &'a Attribute) -> Result<Option<&'a Object>, DesignError> {
        let resolved = self.underlying(attribute)?;
        match (&resolved.data_type, attribute.data_type.type_name()) {
            (DataType::Object(o), _) => Ok(Some(o)),
            (_, Some(name)) => Err(DesignError::NotAnObject(name.to_string())),
            _ => Ok(None),
        }
    }

    /// Run every structural check and fail when any issue is an error.
    ///
    /// The returned error carries warnings too, so callers can report both.
    pub fn validate(&self) -> Result<Vec<DesignIssue>, DesignError> {
        let issues = self.check();
        if issues.iter().any(DesignIssue::is_error) {
            Err(DesignError::Invalid(issues))
        } else {
            Ok(issues)
        }
    }
}
