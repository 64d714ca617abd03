use anyhow::{anyhow, bail, Context};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::path::Path;

use super::registry::{Design, TransformDecl};
use super::types::{Attribute, DataType, Format, Metadata, Object, PrimitiveKind, UserType, Validation};

/// Serialization of a design file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesignFormat {
    Yaml,
    Json,
}

impl DesignFormat {
    /// `.json` files are JSON, everything else is read as YAML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DesignFormat::Json,
            _ => DesignFormat::Yaml,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDesign {
    #[serde(default)]
    types: Vec<RawType>,
    #[serde(default)]
    transforms: Vec<RawTransform>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawType {
    name: String,
    description: Option<String>,
    #[serde(default)]
    attributes: Vec<RawAttribute>,
    #[serde(default)]
    required: Vec<String>,
    #[serde(default)]
    views: Vec<RawView>,
    #[serde(default)]
    metadata: Metadata,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawView {
    name: String,
    attributes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTransform {
    name: Option<String>,
    source: String,
    target: String,
}

/// A field (when `name` is set) or an element/key attribute.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAttribute {
    name: Option<String>,
    #[serde(rename = "type")]
    ty: RawTypeRef,
    description: Option<String>,
    default: Option<Value>,
    #[serde(default)]
    metadata: Metadata,
    #[serde(rename = "enum")]
    enum_values: Option<Vec<Value>>,
    format: Option<Format>,
    pattern: Option<String>,
    minimum: Option<f64>,
    maximum: Option<f64>,
    min_length: Option<usize>,
    max_length: Option<usize>,
    #[serde(default)]
    required: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTypeRef {
    Name(String),
    Array { array: Box<RawAttribute> },
    Map { map: RawMap },
    Object { object: Vec<RawAttribute> },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawMap {
    key: Box<RawAttribute>,
    elem: Box<RawAttribute>,
}

/// Load a design from a YAML or JSON file.
pub fn load_design(path: &Path) -> anyhow::Result<Design> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read design: {}", path.display()))?;
    parse_design(&content, DesignFormat::from_path(path))
        .with_context(|| format!("Failed to parse design: {}", path.display()))
}

/// Parse design text. The result is not checked; call [`Design::check`].
pub fn parse_design(content: &str, format: DesignFormat) -> anyhow::Result<Design> {
    let raw: RawDesign = match format {
        DesignFormat::Yaml => serde_yaml::from_str(content)?,
        DesignFormat::Json => serde_json::from_str(content)?,
    };

    let projected: HashSet<&str> = raw
        .types
        .iter()
        .filter(|t| !t.views.is_empty())
        .map(|t| t.name.as_str())
        .collect();

    let mut design = Design::new();
    for raw_type in &raw.types {
        if design.user_type(&raw_type.name).is_some() {
            bail!("type {:?} is declared more than once", raw_type.name);
        }
        design.add_type(build_user_type(raw_type, &projected)?);
    }
    for t in raw.transforms {
        let mut decl = TransformDecl::new(t.source, t.target);
        decl.name = t.name;
        design.add_transform(decl);
    }
    Ok(design)
}

fn build_user_type(raw: &RawType, projected: &HashSet<&str>) -> anyhow::Result<UserType> {
    let object = build_object(&raw.attributes, projected)
        .with_context(|| format!("in type {:?}", raw.name))?;

    let mut attribute = Attribute::object(object.clone());
    attribute.description = raw.description.clone();
    attribute.metadata = raw.metadata.clone();
    if !raw.required.is_empty() {
        attribute
            .validations
            .push(Validation::Required(raw.required.clone()));
    }

    let mut user_type = UserType::new(&raw.name, attribute);
    for view in &raw.views {
        let mut selected = Object::new();
        for name in &view.attributes {
            // Unknown names are kept so the design check can report them.
            let field = object
                .get(name)
                .cloned()
                .unwrap_or_else(|| Attribute::primitive(PrimitiveKind::Any));
            selected = selected.with_field(name, field);
        }
        user_type = user_type.with_view(&view.name, Attribute::object(selected));
    }
    Ok(user_type)
}

fn build_object(fields: &[RawAttribute], projected: &HashSet<&str>) -> anyhow::Result<Object> {
    let mut object = Object::new();
    for raw in fields {
        let name = raw
            .name
            .as_deref()
            .ok_or_else(|| anyhow!("object field without a name"))?;
        let attribute =
            build_attribute(raw, projected).with_context(|| format!("in field {name:?}"))?;
        object = object.with_field(name, attribute);
    }
    Ok(object)
}

fn build_attribute(raw: &RawAttribute, projected: &HashSet<&str>) -> anyhow::Result<Attribute> {
    let data_type = match &raw.ty {
        RawTypeRef::Name(name) => match PrimitiveKind::from_name(name) {
            Some(kind) => DataType::Primitive(kind),
            None if projected.contains(name.as_str()) => DataType::Projected(name.clone()),
            None => DataType::Named(name.clone()),
        },
        RawTypeRef::Array { array } => DataType::Array(Box::new(build_attribute(array, projected)?)),
        RawTypeRef::Map { map } => DataType::Map {
            key: Box::new(build_attribute(&map.key, projected)?),
            elem: Box::new(build_attribute(&map.elem, projected)?),
        },
        RawTypeRef::Object { object } => DataType::Object(build_object(object, projected)?),
    };

    let mut attribute = Attribute::new(data_type);
    attribute.description = raw.description.clone();
    attribute.default_value = raw.default.clone();
    attribute.metadata = raw.metadata.clone();

    let rules = &mut attribute.validations;
    if let Some(values) = &raw.enum_values {
        rules.push(Validation::Enum(values.clone()));
    }
    if let Some(format) = raw.format {
        rules.push(Validation::Format(format));
    }
    if let Some(pattern) = &raw.pattern {
        rules.push(Validation::Pattern(pattern.clone()));
    }
    if let Some(min) = raw.minimum {
        rules.push(Validation::Minimum(min));
    }
    if let Some(max) = raw.maximum {
        rules.push(Validation::Maximum(max));
    }
    if let Some(min) = raw.min_length {
        rules.push(Validation::MinLength(min));
    }
    if let Some(max) = raw.max_length {
        rules.push(Validation::MaxLength(max));
    }
    if !raw.required.is_empty() {
        rules.push(Validation::Required(raw.required.clone()));
    }
    Ok(attribute)
}
