use serde_json::Value;

use super::naming::field_ident;
use super::types::{child_path, has_inline_object, is_boxed, Representation};
use super::{Context, SynthError};
use crate::design::{Attribute, DataType, Object, PrimitiveKind};

/// Rust literal for a float, always carrying a decimal point or exponent.
pub(crate) fn f64_literal(x: f64) -> String {
    if x.is_nan() {
        "f64::NAN".to_string()
    } else if x.is_infinite() {
        if x > 0.0 { "f64::INFINITY" } else { "f64::NEG_INFINITY" }.to_string()
    } else {
        format!("{x:?}")
    }
}

/// Literal comparable against a value of `kind` (strings stay `&str`).
pub(crate) fn comparison_literal(kind: PrimitiveKind, value: &Value) -> String {
    match (kind, value) {
        (PrimitiveKind::String, Value::String(s)) => format!("{s:?}"),
        (PrimitiveKind::Integer, Value::Number(n)) => n.to_string(),
        (PrimitiveKind::Number, Value::Number(n)) => f64_literal(n.as_f64().unwrap_or_default()),
        (PrimitiveKind::Boolean, Value::Bool(b)) => b.to_string(),
        _ => json_macro(value),
    }
}

/// Owned literal of `kind` built from `value`.
pub(crate) fn primitive_literal(kind: PrimitiveKind, value: &Value) -> String {
    match (kind, value) {
        (PrimitiveKind::String, Value::String(s)) => format!("{s:?}.to_string()"),
        (PrimitiveKind::Any, _) => json_macro(value),
        _ => comparison_literal(kind, value),
    }
}

fn json_macro(value: &Value) -> String {
    format!("serde_json::json!({value})")
}

fn map_key_literal(key: &Attribute, raw: &str) -> String {
    match &key.data_type {
        DataType::Primitive(PrimitiveKind::String) => format!("{raw:?}.to_string()"),
        // Integer and boolean keys were checked to parse.
        _ => raw.to_string(),
    }
}

/// Expression building the default `value` with the shape of `attribute`
/// in the private representation.
///
/// Arrays and maps become `vec![..]` and `HashMap::from([..])` literals and
/// objects become struct literals of their private struct. `path` names the
/// struct of an inline object, the same way struct definitions do; it may
/// only be empty when no inline object is involved.
pub(crate) fn default_literal(
    ctx: Context<'_>,
    attribute: &Attribute,
    value: &Value,
    path: &str,
) -> Result<String, SynthError> {
    if path.is_empty() && has_inline_object(attribute) {
        return Err(SynthError::MissingOwner);
    }
    match (&attribute.data_type, value) {
        (DataType::Primitive(kind), _) => Ok(primitive_literal(*kind, value)),
        (DataType::Array(elem), Value::Array(items)) => {
            let item_path = child_path(path, "item");
            let items = items
                .iter()
                .map(|i| default_literal(ctx, elem, i, &item_path))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(format!("vec![{}]", items.join(", ")))
        }
        (DataType::Map { key, elem }, Value::Object(entries)) => {
            let value_path = child_path(path, "value");
            let entries = entries
                .iter()
                .map(|(k, v)| {
                    Ok(format!(
                        "({}, {})",
                        map_key_literal(key, k),
                        default_literal(ctx, elem, v, &value_path)?
                    ))
                })
                .collect::<Result<Vec<_>, SynthError>>()?;
            Ok(format!("std::collections::HashMap::from([{}])", entries.join(", ")))
        }
        (DataType::Object(object), Value::Object(_)) => struct_literal(ctx, object, value, path),
        (DataType::Named(name) | DataType::Projected(name), Value::Object(_)) => {
            let object = ctx
                .design
                .lookup(name)?
                .attribute
                .as_object()
                .ok_or_else(|| SynthError::NotAnObject(name.clone()))?;
            struct_literal(ctx, object, value, name)
        }
        _ => Err(SynthError::InvalidDefault(path.to_string())),
    }
}

/// `Name { field: Some(..), .. }` for the entries of `value` that name
/// fields of `object`, in field order.
fn struct_literal(ctx: Context<'_>, object: &Object, value: &Value, path: &str) -> Result<String, SynthError> {
    let name = ctx.struct_name(path, Representation::Private);
    let Value::Object(entries) = value else {
        return Err(SynthError::InvalidDefault(path.to_string()));
    };
    if let Some(unknown) = entries.keys().find(|k| object.get(k).is_none()) {
        return Err(SynthError::InvalidDefault(child_path(path, unknown)));
    }
    let mut fields = Vec::new();
    for field in object.iter() {
        let Some(v) = entries.get(&field.name) else { continue };
        let mut literal = default_literal(ctx, &field.attribute, v, &child_path(path, &field.name))?;
        if is_boxed(&field.attribute) {
            literal = format!("Box::new({literal})");
        }
        fields.push(format!("{}: Some({literal})", field_ident(&field.name, &field.attribute)));
    }
    if fields.is_empty() {
        return Ok(format!("{name}::default()"));
    }
    if fields.len() < object.len() {
        fields.push("..Default::default()".to_string());
    }
    Ok(format!("{name} {{ {} }}", fields.join(", ")))
}
