use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub use crate::runtime::Format;

/// Metadata key whose first value overrides the emitted identifier of a field.
pub const FIELD_NAME_KEY: &str = "struct:field:name";

/// Metadata key whose first value is the field's transform correspondence key.
pub const TRANSFORM_KEY: &str = "transform:key";

/// Name of the view every projected type must declare.
pub const DEFAULT_VIEW: &str = "default";

/// Free-form metadata: key to ordered list of values.
pub type Metadata = BTreeMap<String, Vec<String>>;

/// Primitive kinds an attribute can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Integer,
    Number,
    String,
    /// Arbitrary JSON value
    Any,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 5] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Integer,
        PrimitiveKind::Number,
        PrimitiveKind::String,
        PrimitiveKind::Any,
    ];

    /// Name used in design files.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "boolean",
            PrimitiveKind::Integer => "integer",
            PrimitiveKind::Number => "number",
            PrimitiveKind::String => "string",
            PrimitiveKind::Any => "any",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        PrimitiveKind::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Rust type used for this kind in generated code.
    #[must_use]
    pub fn rust_type(self) -> &'static str {
        match self {
            PrimitiveKind::Boolean => "bool",
            PrimitiveKind::Integer => "i64",
            PrimitiveKind::Number => "f64",
            PrimitiveKind::String => "String",
            PrimitiveKind::Any => "serde_json::Value",
        }
    }

    /// Whether `value` is a valid JSON encoding of this kind. Integers must
    /// fit in `i64`.
    #[must_use]
    pub fn accepts(self, value: &Value) -> bool {
        match self {
            PrimitiveKind::Boolean => value.is_boolean(),
            PrimitiveKind::Integer => value.is_i64(),
            PrimitiveKind::Number => value.is_number(),
            PrimitiveKind::String => value.is_string(),
            PrimitiveKind::Any => true,
        }
    }
}

/// Whether `x` lies within the range of `i64`, so an integer comparison
/// against it is exact.
#[must_use]
pub fn in_i64_range(x: f64) -> bool {
    // 2^63, exactly representable unlike i64::MAX.
    const EDGE: f64 = 9_223_372_036_854_775_808.0;
    (-EDGE..EDGE).contains(&x)
}

/// The closed set of shapes an attribute can take.
#[derive(Debug, Clone, PartialEq)]
pub enum DataType {
    Primitive(PrimitiveKind),
    Array(Box<Attribute>),
    Map {
        key: Box<Attribute>,
        elem: Box<Attribute>,
    },
    Object(Object),
    /// Reference to a user type registered in the [`Design`](super::Design).
    Named(String),
    /// Reference to a user type that also declares views.
    Projected(String),
}

/// Structural kind of a data type, named types resolving to objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Primitive(PrimitiveKind),
    Array,
    Map,
    Object,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Primitive(p) => f.write_str(p.name()),
            Kind::Array => f.write_str("array"),
            Kind::Map => f.write_str("map"),
            Kind::Object => f.write_str("object"),
        }
    }
}

impl DataType {
    #[must_use]
    pub fn kind(&self) -> Kind {
        match self {
            DataType::Primitive(p) => Kind::Primitive(*p),
            DataType::Array(_) => Kind::Array,
            DataType::Map { .. } => Kind::Map,
            DataType::Object(_) | DataType::Named(_) | DataType::Projected(_) => Kind::Object,
        }
    }

    /// Name of the referenced user type, if any.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        match self {
            DataType::Named(name) | DataType::Projected(name) => Some(name),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_primitive(&self) -> bool {
        matches!(self, DataType::Primitive(_))
    }
}

/// An ordered set of uniquely named fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Object {
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub attribute: Attribute,
}

impl Object {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.fields.push(Field {
            name: name.into(),
            attribute,
        });
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| &f.attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A validation rule attached to an attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum Validation {
    Enum(Vec<Value>),
    Format(Format),
    Pattern(String),
    Minimum(f64),
    Maximum(f64),
    MinLength(usize),
    MaxLength(usize),
    /// Names of the object fields that must be present.
    Required(Vec<String>),
}

impl Validation {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Validation::Enum(_) => "enum",
            Validation::Format(_) => "format",
            Validation::Pattern(_) => "pattern",
            Validation::Minimum(_) => "minimum",
            Validation::Maximum(_) => "maximum",
            Validation::MinLength(_) => "min_length",
            Validation::MaxLength(_) => "max_length",
            Validation::Required(_) => "required",
        }
    }

    /// Position in the order checks are emitted.
    #[must_use]
    pub(crate) fn rank(&self) -> u8 {
        match self {
            Validation::Enum(_) => 0,
            Validation::Format(_) => 1,
            Validation::Pattern(_) => 2,
            Validation::Minimum(_) => 3,
            Validation::Maximum(_) => 4,
            Validation::MinLength(_) => 5,
            Validation::MaxLength(_) => 6,
            Validation::Required(_) => 7,
        }
    }
}

/// A typed field descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub data_type: DataType,
    pub description: Option<String>,
    pub validations: Vec<Validation>,
    pub default_value: Option<Value>,
    pub metadata: Metadata,
}

impl Attribute {
    #[must_use]
    pub fn new(data_type: DataType) -> Self {
        Attribute {
            data_type,
            description: None,
            validations: Vec::new(),
            default_value: None,
            metadata: Metadata::new(),
        }
    }

    #[must_use]
    pub fn primitive(kind: PrimitiveKind) -> Self {
        Self::new(DataType::Primitive(kind))
    }

    #[must_use]
    pub fn string() -> Self {
        Self::primitive(PrimitiveKind::String)
    }

    #[must_use]
    pub fn integer() -> Self {
        Self::primitive(PrimitiveKind::Integer)
    }

    #[must_use]
    pub fn array(elem: Attribute) -> Self {
        Self::new(DataType::Array(Box::new(elem)))
    }

    #[must_use]
    pub fn map(key: Attribute, elem: Attribute) -> Self {
        Self::new(DataType::Map {
            key: Box::new(key),
            elem: Box::new(elem),
        })
    }

    #[must_use]
    pub fn object(object: Object) -> Self {
        Self::new(DataType::Object(object))
    }

    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(DataType::Named(name.into()))
    }

    #[must_use]
    pub fn projected(name: impl Into<String>) -> Self {
        Self::new(DataType::Projected(name.into()))
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_validation(mut self, validation: Validation) -> Self {
        self.validations.push(validation);
        self
    }

    #[must_use]
    pub fn with_default(mut self, value: Value) -> Self {
        self.default_value = Some(value);
        self
    }

    #[must_use]
    pub fn with_metadata<I, S>(mut self, key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.metadata
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        self
    }

    /// Names listed by every `Required` rule on this attribute.
    pub fn required(&self) -> impl Iterator<Item = &str> {
        self.validations.iter().flat_map(|v| match v {
            Validation::Required(names) => names.as_slice(),
            _ => &[],
        })
        .map(String::as_str)
    }

    #[must_use]
    pub fn is_required(&self, name: &str) -> bool {
        self.required().any(|n| n == name)
    }

    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default_value.is_some()
    }

    /// Values stored under `key`, if the key is present.
    #[must_use]
    pub fn metadata(&self, key: &str) -> Option<&[String]> {
        self.metadata.get(key).map(Vec::as_slice)
    }

    /// The inline object of this attribute, if it is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match &self.data_type {
            DataType::Object(o) => Some(o),
            _ => None,
        }
    }
}

/// A named subset of a projected type's fields.
#[derive(Debug, Clone, PartialEq)]
pub struct View {
    pub name: String,
    /// Object holding the selected fields, copied from the parent type.
    pub attribute: Attribute,
}

/// A user-defined type: a name bound to an object attribute, plus its views.
#[derive(Debug, Clone, PartialEq)]
pub struct UserType {
    pub name: String,
    pub attribute: Attribute,
    pub views: Vec<View>,
}

impl UserType {
    #[must_use]
    pub fn new(name: impl Into<String>, attribute: Attribute) -> Self {
        UserType {
            name: name.into(),
            attribute,
            views: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_view(mut self, name: impl Into<String>, attribute: Attribute) -> Self {
        self.views.push(View {
            name: name.into(),
            attribute,
        });
        self
    }

    #[must_use]
    pub fn is_projected(&self) -> bool {
        !self.views.is_empty()
    }

    #[must_use]
    pub fn view(&self, name: &str) -> Option<&View> {
        self.views.iter().find(|v| v.name == name)
    }

    #[must_use]
    pub fn default_view(&self) -> Option<&View> {
        self.view(DEFAULT_VIEW)
    }

    /// Attribute referring to this type, projected when it declares views.
    #[must_use]
    pub fn reference(&self) -> Attribute {
        if self.is_projected() {
            Attribute::projected(&self.name)
        } else {
            Attribute::named(&self.name)
        }
    }
}
