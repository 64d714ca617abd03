//! Structural checks run on a [`Design`] before any code is synthesized.
//!
//! ## Checks Performed
//!
//! 1. **Type references** - every named or projected reference resolves
//! 2. **Object shape** - user types are objects, field names are unique
//! 3. **Required names** - `required` only lists fields of the same object
//! 4. **Views** - projected types declare a `default` view over existing fields
//! 5. **Rules** - each validation applies to the attribute's kind, patterns compile
//! 6. **Defaults** - default values match the attribute's type
//! 7. **Map keys** - keys are booleans, integers or strings
//! 8. **Identifiers** - names produce non-empty Rust identifiers
//! 9. **Transforms** - declared transforms reference known types
//! 10. **Required cycles** - no loop of by-value fields through named types
//!
//! Errors block generation; warnings are reported and generation proceeds.

use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

use super::registry::Design;
use super::types::{
    in_i64_range, Attribute, DataType, Object, PrimitiveKind, UserType, Validation, DEFAULT_VIEW,
    TRANSFORM_KEY,
};
use crate::generator::naming;

/// Severity level for design issues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Generation cannot proceed
    Error,
    /// Suspicious but generation proceeds
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// A problem found in a design.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignIssue {
    /// Dotted path of the offending attribute (e.g. `Bottle.vintage`)
    pub location: String,
    pub severity: Severity,
    /// Short machine-friendly label (e.g. `unknown_type`)
    pub kind: &'static str,
    pub message: String,
    pub suggestion: Option<String>,
}

impl DesignIssue {
    pub fn error(location: impl Into<String>, kind: &'static str, message: impl Into<String>) -> Self {
        DesignIssue {
            location: location.into(),
            severity: Severity::Error,
            kind,
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn warning(location: impl Into<String>, kind: &'static str, message: impl Into<String>) -> Self {
        DesignIssue {
            severity: Severity::Warning,
            ..Self::error(location, kind, message)
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for DesignIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.location, self.message)
    }
}

/// Log every issue, errors first.
pub fn print_issues(issues: &[DesignIssue]) {
    for issue in issues.iter().filter(|i| i.is_error()) {
        tracing::error!(
            kind = issue.kind,
            location = %issue.location,
            suggestion = issue.suggestion.as_deref(),
            "{}",
            issue.message
        );
    }
    for issue in issues.iter().filter(|i| !i.is_error()) {
        tracing::warn!(
            kind = issue.kind,
            location = %issue.location,
            suggestion = issue.suggestion.as_deref(),
            "{}",
            issue.message
        );
    }
}

impl Design {
    /// Collect every issue in the design. An empty list means the design is
    /// safe to hand to the synthesizers.
    #[must_use]
    pub fn check(&self) -> Vec<DesignIssue> {
        let mut issues = Vec::new();
        for user_type in self.types() {
            self.check_user_type(&mut issues, user_type);
            self.check_required_cycle(&mut issues, user_type);
        }
        for transform in self.transforms() {
            for name in [&transform.source, &transform.target] {
                if self.user_type(name).is_none() {
                    issues.push(DesignIssue::error(
                        format!("transform:{}->{}", transform.source, transform.target),
                        "unknown_transform_type",
                        format!("transform references unknown type {name:?}"),
                    ));
                }
            }
            if let Some(fn_name) = &transform.name {
                if naming::snake_case(fn_name).is_empty() {
                    issues.push(DesignIssue::error(
                        format!("transform:{fn_name}"),
                        "invalid_name",
                        "transform name does not produce an identifier",
                    ));
                }
            }
        }
        issues
    }

    fn check_user_type(&self, issues: &mut Vec<DesignIssue>, user_type: &UserType) {
        let location = user_type.name.as_str();
        if naming::resolve(&user_type.name, true).is_empty() {
            issues.push(DesignIssue::error(
                location,
                "invalid_name",
                "type name does not produce an identifier",
            ));
        }

        let Some(object) = user_type.attribute.as_object() else {
            issues.push(
                DesignIssue::error(location, "not_an_object", "user types must be objects")
                    .with_suggestion("wrap the attribute in an object with a single field"),
            );
            return;
        };
        self.check_attribute(issues, location, &user_type.attribute);

        if user_type.is_projected() {
            check_views(issues, user_type, object);
        }
    }

    /// Public structs hold required and defaulted fields by value, so a loop
    /// of such fields through named types has no finite default.
    fn check_required_cycle(&self, issues: &mut Vec<DesignIssue>, user_type: &UserType) {
        let mut seen = HashSet::new();
        let mut stack = vec![user_type.name.clone()];
        while let Some(name) = stack.pop() {
            let Some(current) = self.user_type(&name) else { continue };
            let mut edges = Vec::new();
            required_edges(&current.attribute, &mut edges);
            for next in edges {
                if next == user_type.name {
                    issues.push(
                        DesignIssue::error(
                            user_type.name.as_str(),
                            "required_cycle",
                            format!("type {:?} requires itself through {name:?}", user_type.name),
                        )
                        .with_suggestion("make one field on the loop optional or an array"),
                    );
                    return;
                }
                if seen.insert(next.clone()) {
                    stack.push(next);
                }
            }
        }
    }

    fn check_attribute(&self, issues: &mut Vec<DesignIssue>, location: &str, attribute: &Attribute) {
        match &attribute.data_type {
            DataType::Primitive(_) => {}
            DataType::Array(elem) => self.check_attribute(issues, &format!("{location}[*]"), elem),
            DataType::Map { key, elem } => {
                let key_location = format!("{location}[key]");
                if !matches!(
                    key.data_type,
                    DataType::Primitive(PrimitiveKind::Boolean | PrimitiveKind::Integer | PrimitiveKind::String)
                ) {
                    issues.push(DesignIssue::error(
                        &key_location,
                        "invalid_map_key",
                        "map keys must be booleans, integers or strings",
                    ));
                }
                self.check_attribute(issues, &key_location, key);
                self.check_attribute(issues, &format!("{location}[*]"), elem);
            }
            DataType::Object(object) => self.check_object(issues, location, attribute, object),
            DataType::Named(name) => {
                if self.user_type(name).is_none() {
                    issues.push(DesignIssue::error(
                        location,
                        "unknown_type",
                        format!("reference to unknown type {name:?}"),
                    ));
                }
            }
            DataType::Projected(name) => match self.user_type(name) {
                None => issues.push(DesignIssue::error(
                    location,
                    "unknown_type",
                    format!("reference to unknown type {name:?}"),
                )),
                Some(target) if !target.is_projected() => issues.push(
                    DesignIssue::error(
                        location,
                        "not_projected",
                        format!("type {name:?} is referenced as projected but declares no views"),
                    )
                    .with_suggestion("declare a `default` view or reference it as a named type"),
                ),
                Some(_) => {}
            },
        }

        self.check_rules(issues, location, attribute);
        if let Some(default) = &attribute.default_value {
            if !self.default_matches(&attribute.data_type, default) {
                issues.push(DesignIssue::error(
                    location,
                    "invalid_default",
                    format!("default value {default} does not match the attribute type"),
                ));
            }
        }
    }

    fn check_object(
        &self,
        issues: &mut Vec<DesignIssue>,
        location: &str,
        attribute: &Attribute,
        object: &Object,
    ) {
        let mut names = HashSet::new();
        let mut idents = HashSet::new();
        let mut transform_keys = HashSet::new();
        for field in object.iter() {
            let field_location = format!("{location}.{}", field.name);
            if !names.insert(field.name.as_str()) {
                issues.push(DesignIssue::error(
                    &field_location,
                    "duplicate_field",
                    format!("field {:?} is declared more than once", field.name),
                ));
            }
            let ident = naming::field_ident(&field.name, &field.attribute);
            if ident.is_empty() {
                issues.push(DesignIssue::error(
                    &field_location,
                    "invalid_name",
                    "field name does not produce an identifier",
                ));
            } else if !idents.insert(ident.clone()) {
                issues.push(DesignIssue::error(
                    &field_location,
                    "duplicate_field",
                    format!("field identifier {ident:?} collides with another field"),
                ));
            }
            if let Some(values) = field.attribute.metadata(TRANSFORM_KEY) {
                match values.first() {
                    Some(key) if !transform_keys.insert(key.clone()) => issues.push(DesignIssue::warning(
                        &field_location,
                        "ambiguous_transform_key",
                        format!("transform key {key:?} is used by more than one field"),
                    )),
                    _ => {}
                }
            }
            if attribute.is_required(&field.name) && field.attribute.has_default() {
                issues.push(DesignIssue::warning(
                    &field_location,
                    "required_with_default",
                    "required field also declares a default; the default is only used before validation",
                ));
            }
            self.check_attribute(issues, &field_location, &field.attribute);
        }
    }

    fn check_rules(&self, issues: &mut Vec<DesignIssue>, location: &str, attribute: &Attribute) {
        let kind = match &attribute.data_type {
            DataType::Primitive(k) => Some(*k),
            _ => None,
        };
        let is_string = kind == Some(PrimitiveKind::String);
        let is_numeric = matches!(kind, Some(PrimitiveKind::Integer | PrimitiveKind::Number));
        let is_collection = matches!(attribute.data_type, DataType::Array(_) | DataType::Map { .. });

        for rule in &attribute.validations {
            let applicable = match rule {
                Validation::Enum(values) => match kind {
                    Some(PrimitiveKind::Any) | None => false,
                    Some(k) => {
                        if let Some(bad) = values.iter().find(|v| !k.accepts(v)) {
                            issues.push(DesignIssue::error(
                                location,
                                "invalid_rule",
                                format!("enum value {bad} is not a {}", k.name()),
                            ));
                        }
                        !values.is_empty()
                    }
                },
                Validation::Format(_) => is_string,
                Validation::Pattern(pattern) => {
                    if let Err(e) = regex::Regex::new(pattern) {
                        issues.push(DesignIssue::error(
                            location,
                            "invalid_rule",
                            format!("pattern {pattern:?} does not compile: {e}"),
                        ));
                    }
                    is_string
                }
                Validation::Minimum(bound) | Validation::Maximum(bound) => {
                    if kind == Some(PrimitiveKind::Integer) && !in_i64_range(*bound) {
                        issues.push(DesignIssue::error(
                            location,
                            "invalid_rule",
                            format!("{} {bound} is outside the integer range", rule.name()),
                        ));
                    }
                    is_numeric
                }
                Validation::MinLength(_) | Validation::MaxLength(_) => is_string || is_collection,
                Validation::Required(names) => match attribute.as_object() {
                    Some(object) => {
                        for name in names {
                            if object.get(name).is_none() {
                                issues.push(DesignIssue::error(
                                    location,
                                    "unknown_required",
                                    format!("required field {name:?} is not declared"),
                                ));
                            }
                        }
                        true
                    }
                    None => false,
                },
            };
            if !applicable {
                issues.push(DesignIssue::error(
                    location,
                    "invalid_rule",
                    format!("{} does not apply to this attribute", rule.name()),
                ));
            }
        }
    }

    /// Whether `value` is a valid default for `data_type`.
    fn default_matches(&self, data_type: &DataType, value: &Value) -> bool {
        match data_type {
            DataType::Primitive(kind) => kind.accepts(value),
            DataType::Array(elem) => value
                .as_array()
                .is_some_and(|items| items.iter().all(|v| self.default_matches(&elem.data_type, v))),
            DataType::Map { key, elem } => value.as_object().is_some_and(|entries| {
                entries.iter().all(|(k, v)| {
                    map_key_matches(&key.data_type, k) && self.default_matches(&elem.data_type, v)
                })
            }),
            DataType::Object(object) => self.object_default_matches(object, value),
            DataType::Named(name) | DataType::Projected(name) => {
                match self.user_type(name).and_then(|t| t.attribute.as_object()) {
                    Some(object) => self.object_default_matches(object, value),
                    None => false,
                }
            }
        }
    }

    fn object_default_matches(&self, object: &Object, value: &Value) -> bool {
        value.as_object().is_some_and(|entries| {
            entries.iter().all(|(k, v)| {
                object
                    .get(k)
                    .is_some_and(|att| self.default_matches(&att.data_type, v))
            })
        })
    }
}

/// Named types held by value (required or defaulted) in the public struct
/// of `attribute`, looking through inline objects.
fn required_edges(attribute: &Attribute, out: &mut Vec<String>) {
    let Some(object) = attribute.as_object() else { return };
    for field in object.iter() {
        if !(attribute.is_required(&field.name) || field.attribute.has_default()) {
            continue;
        }
        match &field.attribute.data_type {
            DataType::Named(name) | DataType::Projected(name) => out.push(name.clone()),
            DataType::Object(_) => required_edges(&field.attribute, out),
            _ => {}
        }
    }
}

fn map_key_matches(data_type: &DataType, key: &str) -> bool {
    match data_type {
        DataType::Primitive(PrimitiveKind::String) => true,
        DataType::Primitive(PrimitiveKind::Integer) => key.parse::<i64>().is_ok(),
        DataType::Primitive(PrimitiveKind::Boolean) => key == "true" || key == "false",
        _ => false,
    }
}

fn check_views(issues: &mut Vec<DesignIssue>, user_type: &UserType, object: &Object) {
    let location = user_type.name.as_str();
    if user_type.default_view().is_none() {
        issues.push(
            DesignIssue::error(location, "missing_default_view", "projected types need a default view")
                .with_suggestion(format!("add a view named {DEFAULT_VIEW:?}")),
        );
    }
    let mut seen = HashSet::new();
    for view in &user_type.views {
        let view_location = format!("{location}:view:{}", view.name);
        if !seen.insert(view.name.as_str()) {
            issues.push(DesignIssue::error(
                &view_location,
                "duplicate_view",
                format!("view {:?} is declared more than once", view.name),
            ));
        }
        if naming::resolve(&view.name, true).is_empty() {
            issues.push(DesignIssue::error(
                &view_location,
                "invalid_name",
                "view name does not produce an identifier",
            ));
        }
        match view.attribute.as_object() {
            Some(fields) => {
                for field in fields.iter() {
                    if object.get(&field.name).is_none() {
                        issues.push(DesignIssue::error(
                            &view_location,
                            "unknown_view_field",
                            format!("view selects undeclared field {:?}", field.name),
                        ));
                    }
                }
            }
            None => issues.push(DesignIssue::error(
                &view_location,
                "not_an_object",
                "views must be objects",
            )),
        }
    }
}
