//! Rust type references and struct declarations for user types.

use super::naming::{camel, escape, field_ident, resolve};
use super::{Context, SynthError};
use crate::design::{Attribute, DataType, Object, UserType};

/// Which of the two generated shapes of a user type is meant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Representation {
    /// Every field optional; the shape data is decoded into before validation.
    Private,
    /// Required and defaulted fields hold values directly.
    Public,
}

/// A generated Rust struct.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDefinition {
    /// The Rust struct name (e.g., `Bottle`, `BottlePrivate`)
    pub name: String,
    /// Doc comment lines
    pub doc: Vec<String>,
    /// The fields that make up this struct
    pub fields: Vec<FieldDef>,
}

/// A field definition for a generated Rust struct
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Sanitized Rust field name (e.g., `user_id`)
    pub name: String,
    /// Original field name from the design (for serde rename)
    pub original_name: String,
    /// Rust type (e.g., `Option<String>`, `Vec<Bottle>`)
    pub ty: String,
    /// Whether the field is optional (`Option<T>`)
    pub optional: bool,
    /// Doc comment lines
    pub doc: Vec<String>,
}

/// Path naming the inline type found under `segment` of `owner`.
#[must_use]
pub fn child_path(owner: &str, segment: &str) -> String {
    if owner.is_empty() {
        segment.to_string()
    } else {
        format!("{owner}_{segment}")
    }
}

/// Whether the struct field for `name` in `parent` is an `Option`.
#[must_use]
pub fn is_optional(rep: Representation, parent: &Attribute, name: &str, attribute: &Attribute) -> bool {
    match rep {
        Representation::Private => true,
        Representation::Public => !(parent.is_required(name) || attribute.has_default()),
    }
}

/// Fields referring to user types are boxed so recursive types have a size.
#[must_use]
pub fn is_boxed(attribute: &Attribute) -> bool {
    matches!(
        attribute.data_type,
        DataType::Named(_) | DataType::Projected(_)
    )
}

/// Whether values of this attribute contain objects anywhere, in which case
/// copying between representations needs more than `clone`.
#[must_use]
pub fn has_structure(attribute: &Attribute) -> bool {
    match &attribute.data_type {
        DataType::Primitive(_) => false,
        DataType::Array(elem) => has_structure(elem),
        DataType::Map { key, elem } => has_structure(key) || has_structure(elem),
        DataType::Object(_) | DataType::Named(_) | DataType::Projected(_) => true,
    }
}

/// Whether this attribute holds an inline object without going through a
/// user type, so naming its struct needs an owner path.
#[must_use]
pub fn has_inline_object(attribute: &Attribute) -> bool {
    match &attribute.data_type {
        DataType::Object(_) => true,
        DataType::Array(elem) => has_inline_object(elem),
        DataType::Map { key, elem } => has_inline_object(key) || has_inline_object(elem),
        DataType::Primitive(_) | DataType::Named(_) | DataType::Projected(_) => false,
    }
}

fn doc_lines(description: Option<&str>) -> Vec<String> {
    description
        .map(|d| d.lines().map(|l| l.trim_end().to_string()).collect())
        .unwrap_or_default()
}

impl Context<'_> {
    /// Struct name for the object found at `path` (a type name or an inline
    /// object path).
    #[must_use]
    pub fn struct_name(&self, path: &str, rep: Representation) -> String {
        let base = camel(path, true);
        match rep {
            Representation::Public => escape(base),
            Representation::Private => escape(format!("{base}{}", self.config.private_suffix)),
        }
    }

    /// Struct name of a view of a projected type.
    #[must_use]
    pub fn view_struct_name(&self, type_name: &str, view: &str) -> String {
        escape(format!(
            "{}{}{}",
            camel(type_name, true),
            camel(view, true),
            self.config.view_suffix
        ))
    }

    /// Rust type of a value of `attribute`, not counting field-level boxing
    /// or optionality.
    #[must_use]
    pub fn type_ref(&self, attribute: &Attribute, path: &str, rep: Representation) -> String {
        match &attribute.data_type {
            DataType::Primitive(kind) => kind.rust_type().to_string(),
            DataType::Array(elem) => {
                format!("Vec<{}>", self.type_ref(elem, &child_path(path, "item"), rep))
            }
            DataType::Map { key, elem } => format!(
                "std::collections::HashMap<{}, {}>",
                self.type_ref(key, &child_path(path, "key"), rep),
                self.type_ref(elem, &child_path(path, "value"), rep)
            ),
            DataType::Object(_) => self.struct_name(path, rep),
            DataType::Named(name) | DataType::Projected(name) => self.struct_name(name, rep),
        }
    }

    fn field_def(
        &self,
        parent: &Attribute,
        name: &str,
        attribute: &Attribute,
        owner: &str,
        rep: Representation,
    ) -> FieldDef {
        let mut ty = self.type_ref(attribute, &child_path(owner, name), rep);
        if is_boxed(attribute) {
            ty = format!("Box<{ty}>");
        }
        let optional = is_optional(rep, parent, name, attribute);
        if optional {
            ty = format!("Option<{ty}>");
        }
        FieldDef {
            name: field_ident(name, attribute),
            original_name: name.to_string(),
            ty,
            optional,
            doc: doc_lines(attribute.description.as_deref()),
        }
    }

    /// Struct declarations for `user_type` in one representation: the type
    /// itself followed by every inline object it contains.
    pub fn definitions(
        &self,
        user_type: &UserType,
        rep: Representation,
    ) -> Result<Vec<TypeDefinition>, SynthError> {
        let object = user_type
            .attribute
            .as_object()
            .ok_or_else(|| SynthError::NotAnObject(user_type.name.clone()))?;
        let mut out = Vec::new();
        self.object_definitions(&mut out, &user_type.attribute, object, &user_type.name, rep);
        Ok(out)
    }

    fn object_definitions(
        &self,
        out: &mut Vec<TypeDefinition>,
        attribute: &Attribute,
        object: &Object,
        path: &str,
        rep: Representation,
    ) {
        out.push(TypeDefinition {
            name: self.struct_name(path, rep),
            doc: doc_lines(attribute.description.as_deref()),
            fields: object
                .iter()
                .map(|f| self.field_def(attribute, &f.name, &f.attribute, path, rep))
                .collect(),
        });
        for field in object.iter() {
            self.nested_definitions(out, &field.attribute, &child_path(path, &field.name), rep);
        }
    }

    fn nested_definitions(
        &self,
        out: &mut Vec<TypeDefinition>,
        attribute: &Attribute,
        path: &str,
        rep: Representation,
    ) {
        match &attribute.data_type {
            DataType::Object(object) => self.object_definitions(out, attribute, object, path, rep),
            DataType::Array(elem) => {
                self.nested_definitions(out, elem, &child_path(path, "item"), rep);
            }
            DataType::Map { key, elem } => {
                self.nested_definitions(out, key, &child_path(path, "key"), rep);
                self.nested_definitions(out, elem, &child_path(path, "value"), rep);
            }
            DataType::Primitive(_) | DataType::Named(_) | DataType::Projected(_) => {}
        }
    }

    /// One struct per view of a projected type. View fields keep the type and
    /// optionality they have on the public struct.
    pub fn view_definitions(&self, user_type: &UserType) -> Result<Vec<TypeDefinition>, SynthError> {
        let mut out = Vec::new();
        for view in &user_type.views {
            let object = view.attribute.as_object().ok_or_else(|| SynthError::UnknownView {
                type_name: user_type.name.clone(),
                view: view.name.clone(),
            })?;
            out.push(TypeDefinition {
                name: self.view_struct_name(&user_type.name, &view.name),
                doc: vec![format!("{} view of [`{}`].", view.name, resolve(&user_type.name, true))],
                fields: object
                    .iter()
                    .map(|f| {
                        self.field_def(
                            &user_type.attribute,
                            &f.name,
                            &f.attribute,
                            &user_type.name,
                            Representation::Public,
                        )
                    })
                    .collect(),
            });
        }
        Ok(out)
    }
}
