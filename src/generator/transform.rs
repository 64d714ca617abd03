//! Type-to-type transform synthesis.
//!
//! A transform copies a value of one public type into another. Fields are
//! paired by their transform key, which is the first `transform:key`
//! metadata value or else the field name. Target fields with no counterpart
//! keep their default. Paired fields must share a structural kind.
//!
//! Pairs of user types become helper functions named
//! `transform_<source>_to_<target>`. A helper's name is reserved before its
//! body is built, so types that refer to each other produce helpers that
//! call each other instead of recursing forever.

use std::collections::{BTreeMap, HashMap, HashSet};

use super::code::{Block, TempVars};
use super::naming::{field_ident, snake_words};
use super::types::{child_path, has_inline_object, has_structure, is_boxed, is_optional, Representation};
use super::{Context, SynthError};
use crate::design::{Attribute, DataType, Field, Object, TransformDecl, TRANSFORM_KEY};

/// Helper function produced for a pair of user types.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformHelper {
    pub name: String,
    /// Public struct name of the parameter type.
    pub source_type: String,
    /// Public struct name of the returned type.
    pub target_type: String,
    /// Statements declaring and filling `target`; the caller returns it.
    pub body: Block,
}

/// Result of one top-level transform synthesis.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformOutput {
    pub body: Block,
    /// Helpers the body calls, in the order they were completed.
    pub helpers: Vec<TransformHelper>,
}

/// A declared transform, ready to be rendered as a free function.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformFunction {
    pub name: String,
    pub source_type: String,
    pub target_type: String,
    pub body: Block,
    pub helpers: Vec<TransformHelper>,
}

/// Mutable state of one top-level call.
#[derive(Default)]
struct State {
    tmp: TempVars,
    names: HashMap<(String, String), String>,
    reserved: HashSet<String>,
    helpers: Vec<TransformHelper>,
}

/// Expression roots and error labels for one side of a pair.
#[derive(Clone, Copy)]
struct Side<'s> {
    expr: &'s str,
    label: &'s str,
}

pub struct TypeTransformSynthesizer<'a> {
    ctx: Context<'a>,
    owner: String,
}

impl<'a> TypeTransformSynthesizer<'a> {
    #[must_use]
    pub fn new(ctx: Context<'a>) -> Self {
        TypeTransformSynthesizer {
            ctx,
            owner: String::new(),
        }
    }

    /// Path naming inline target objects met at the top level.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Name of the helper generated for `source` to `target`.
    #[must_use]
    pub fn helper_name(source: &str, target: &str) -> String {
        format!("transform_{}_to_{}", snake_words(source), snake_words(target))
    }

    /// Code copying `source_expr` into `target_expr`.
    ///
    /// When both sides are objects, the fields of `target_expr` are assigned
    /// in place. Otherwise the converted value is assigned to `target_expr`
    /// as a whole.
    pub fn synthesize(
        &self,
        source: &Attribute,
        target: &Attribute,
        source_expr: &str,
        target_expr: &str,
        depth: usize,
    ) -> Result<TransformOutput, SynthError> {
        let mut state = State::default();
        let owner = target.data_type.type_name().unwrap_or(&self.owner).to_string();
        if owner.is_empty() && has_inline_object(target) {
            return Err(SynthError::MissingOwner);
        }
        let src = Side {
            expr: source_expr,
            label: source_expr,
        };
        let tgt = Side {
            expr: target_expr,
            label: target_expr,
        };

        let resolved_source = self.ctx.design.underlying(source)?;
        let resolved_target = self.ctx.design.underlying(target)?;
        let body = match (&resolved_source.data_type, &resolved_target.data_type) {
            (DataType::Object(so), DataType::Object(to)) => self.object_pair(
                &mut state,
                (resolved_source, so),
                (resolved_target, to),
                src,
                tgt,
                &owner,
                depth,
            )?,
            _ => {
                let (mut block, value) =
                    self.value(&mut state, source, target, src, tgt, &owner, depth)?;
                block.assign(target_expr, value);
                block
            }
        };
        Ok(TransformOutput {
            body,
            helpers: state.helpers,
        })
    }

    /// Free function for a declared transform.
    ///
    /// The function's own name stands for its type pair, so a recursive
    /// type calls the function itself rather than a duplicate helper.
    pub fn synthesize_function(&self, decl: &TransformDecl) -> Result<TransformFunction, SynthError> {
        let name = decl
            .name
            .clone()
            .unwrap_or_else(|| Self::helper_name(&decl.source, &decl.target));
        let mut state = State::default();
        state
            .names
            .insert((decl.source.clone(), decl.target.clone()), name.clone());
        state.reserved.insert(name.clone());
        let body = self.helper_body(&mut state, &decl.source, &decl.target)?;
        Ok(TransformFunction {
            name,
            source_type: self.ctx.struct_name(&decl.source, Representation::Public),
            target_type: self.ctx.struct_name(&decl.target, Representation::Public),
            body,
            helpers: state.helpers,
        })
    }

    /// Corresponding field pairs keyed by transform key, in key order.
    ///
    /// `source_context` and `target_context` name each side in key errors.
    pub fn correspondence<'o>(
        &self,
        source: &'o Object,
        target: &'o Object,
        source_context: &str,
        target_context: &str,
    ) -> Result<BTreeMap<String, (&'o Field, &'o Field)>, SynthError> {
        let mut by_key: HashMap<String, &Field> = HashMap::new();
        for field in source.iter() {
            by_key.entry(transform_key(field, source_context)?).or_insert(field);
        }
        let mut pairs = BTreeMap::new();
        for field in target.iter() {
            let key = transform_key(field, target_context)?;
            if let Some(&source_field) = by_key.get(&key) {
                pairs.entry(key).or_insert((source_field, field));
            }
        }
        Ok(pairs)
    }

    fn helper_body(&self, state: &mut State, source: &str, target: &str) -> Result<Block, SynthError> {
        let source_type = self.ctx.design.lookup(source)?;
        let target_type = self.ctx.design.lookup(target)?;
        let so = source_type
            .attribute
            .as_object()
            .ok_or_else(|| SynthError::NotAnObject(source.to_string()))?;
        let to = target_type
            .attribute
            .as_object()
            .ok_or_else(|| SynthError::NotAnObject(target.to_string()))?;

        let mut body = Block::new();
        body.let_mut(
            "target",
            format!("{}::default()", self.ctx.struct_name(target, Representation::Public)),
        );
        body.extend(self.object_pair(
            state,
            (&source_type.attribute, so),
            (&target_type.attribute, to),
            Side {
                expr: "source",
                label: source,
            },
            Side {
                expr: "target",
                label: target,
            },
            target,
            0,
        )?);
        Ok(body)
    }

    /// Name of the function converting `source` to `target`, building it on
    /// first use.
    fn helper(&self, state: &mut State, source: &str, target: &str) -> Result<String, SynthError> {
        let pair = (source.to_string(), target.to_string());
        if let Some(name) = state.names.get(&pair) {
            return Ok(name.clone());
        }
        let name = Self::helper_name(source, target);
        state.names.insert(pair, name.clone());
        if !state.reserved.insert(name.clone()) {
            return Ok(name);
        }
        tracing::debug!(helper = %name, source, target, "synthesizing transform helper");
        let body = self.helper_body(state, source, target)?;
        state.helpers.push(TransformHelper {
            name: name.clone(),
            source_type: self.ctx.struct_name(source, Representation::Public),
            target_type: self.ctx.struct_name(target, Representation::Public),
            body,
        });
        Ok(name)
    }

    /// Assignments for every corresponding field of two objects.
    #[allow(clippy::too_many_arguments)]
    fn object_pair(
        &self,
        state: &mut State,
        (source_parent, source_object): (&Attribute, &Object),
        (target_parent, target_object): (&Attribute, &Object),
        src: Side<'_>,
        tgt: Side<'_>,
        owner: &str,
        depth: usize,
    ) -> Result<Block, SynthError> {
        let mut block = Block::new();
        let pairs = self.correspondence(source_object, target_object, src.label, tgt.label)?;
        let v = format!("v{depth}");
        for (source_field, target_field) in pairs.into_values() {
            let source_ident = field_ident(&source_field.name, &source_field.attribute);
            let target_ident = field_ident(&target_field.name, &target_field.attribute);
            let source_label = format!("{}.{}", src.label, source_field.name);
            let target_label = format!("{}.{}", tgt.label, target_field.name);
            let source_optional = is_optional(
                Representation::Public,
                source_parent,
                &source_field.name,
                &source_field.attribute,
            );
            let source_expr = if source_optional {
                v.clone()
            } else {
                format!("{}.{source_ident}", src.expr)
            };

            let (mut inner, mut value) = self.value(
                state,
                &source_field.attribute,
                &target_field.attribute,
                Side {
                    expr: &source_expr,
                    label: &source_label,
                },
                Side {
                    expr: "",
                    label: &target_label,
                },
                &child_path(owner, &target_field.name),
                depth + 1,
            )?;
            if is_boxed(&target_field.attribute) {
                value = format!("Box::new({value})");
            }
            if is_optional(
                Representation::Public,
                target_parent,
                &target_field.name,
                &target_field.attribute,
            ) {
                value = format!("Some({value})");
            }
            inner.assign(format!("{}.{target_ident}", tgt.expr), value);

            if source_optional {
                block.if_let(
                    format!("Some({v})"),
                    format!("&{}.{source_ident}", src.expr),
                    inner,
                );
            } else {
                block.extend(inner);
            }
        }
        Ok(block)
    }

    /// Statements and the expression holding the converted value of
    /// `src.expr`, before field-level boxing and wrapping.
    #[allow(clippy::too_many_arguments)]
    fn value(
        &self,
        state: &mut State,
        source: &Attribute,
        target: &Attribute,
        src: Side<'_>,
        tgt: Side<'_>,
        owner: &str,
        depth: usize,
    ) -> Result<(Block, String), SynthError> {
        let source_kind = source.data_type.kind();
        let target_kind = target.data_type.kind();
        if source_kind != target_kind {
            return Err(SynthError::Incompatible {
                source_path: src.label.to_string(),
                source_kind,
                target_path: tgt.label.to_string(),
                target_kind,
            });
        }

        let mut block = Block::new();
        match (&source.data_type, &target.data_type) {
            (
                DataType::Named(a) | DataType::Projected(a),
                DataType::Named(b) | DataType::Projected(b),
            ) => {
                let helper = self.helper(state, a, b)?;
                Ok((block, format!("{helper}(&{})", src.expr)))
            }
            (DataType::Array(se), DataType::Array(te)) => {
                let item_src = format!("{}[*]", src.label);
                let item_tgt = format!("{}[*]", tgt.label);
                if !has_structure(se) && !has_structure(te) {
                    plain_compatible(se, te, &item_src, &item_tgt)?;
                    return Ok((block, format!("{}.clone()", src.expr)));
                }
                let out = state.tmp.next("tmp");
                block.let_mut(&out, format!("Vec::with_capacity({}.len())", src.expr));
                let e = format!("e{depth}");
                let (mut inner, item) = self.value(
                    state,
                    se,
                    te,
                    Side {
                        expr: &e,
                        label: &item_src,
                    },
                    Side {
                        expr: "",
                        label: &item_tgt,
                    },
                    &child_path(owner, "item"),
                    depth + 1,
                )?;
                inner.expr(format!("{out}.push({item})"));
                block.for_each(&e, format!("{}.iter()", src.expr), inner);
                Ok((block, out))
            }
            (DataType::Map { key: sk, elem: se }, DataType::Map { key: tk, elem: te }) => {
                let key_src = format!("{}[key]", src.label);
                let key_tgt = format!("{}[key]", tgt.label);
                let elem_src = format!("{}[*]", src.label);
                let elem_tgt = format!("{}[*]", tgt.label);
                if !has_structure(source) && !has_structure(target) {
                    plain_compatible(sk, tk, &key_src, &key_tgt)?;
                    plain_compatible(se, te, &elem_src, &elem_tgt)?;
                    return Ok((block, format!("{}.clone()", src.expr)));
                }
                let out = state.tmp.next("tmp");
                block.let_mut(
                    &out,
                    format!("std::collections::HashMap::with_capacity({}.len())", src.expr),
                );
                let k = format!("k{depth}");
                let e = format!("e{depth}");
                let (mut inner, key) = self.value(
                    state,
                    sk,
                    tk,
                    Side {
                        expr: &k,
                        label: &key_src,
                    },
                    Side {
                        expr: "",
                        label: &key_tgt,
                    },
                    &child_path(owner, "key"),
                    depth + 1,
                )?;
                let (values, value) = self.value(
                    state,
                    se,
                    te,
                    Side {
                        expr: &e,
                        label: &elem_src,
                    },
                    Side {
                        expr: "",
                        label: &elem_tgt,
                    },
                    &child_path(owner, "value"),
                    depth + 1,
                )?;
                inner.extend(values);
                inner.expr(format!("{out}.insert({key}, {value})"));
                block.for_each(format!("({k}, {e})"), format!("{}.iter()", src.expr), inner);
                Ok((block, out))
            }
            (DataType::Primitive(_), DataType::Primitive(_)) => {
                Ok((block, format!("{}.clone()", src.expr)))
            }
            _ => {
                // Object pairs where at least one side is inline.
                let source_object = self
                    .ctx
                    .design
                    .object_of(source)?
                    .ok_or_else(|| SynthError::NotAnObject(src.label.to_string()))?;
                let target_object = self
                    .ctx
                    .design
                    .object_of(target)?
                    .ok_or_else(|| SynthError::NotAnObject(tgt.label.to_string()))?;
                let target_owner = target.data_type.type_name().unwrap_or(owner);
                let out = state.tmp.next("tmp");
                block.let_mut(
                    &out,
                    format!(
                        "{}::default()",
                        self.ctx.struct_name(target_owner, Representation::Public)
                    ),
                );
                block.extend(self.object_pair(
                    state,
                    (self.ctx.design.underlying(source)?, source_object),
                    (self.ctx.design.underlying(target)?, target_object),
                    src,
                    Side {
                        expr: &out,
                        label: tgt.label,
                    },
                    target_owner,
                    depth,
                )?);
                Ok((block, out))
            }
        }
    }
}

fn transform_key(field: &Field, context: &str) -> Result<String, SynthError> {
    match field.attribute.metadata(TRANSFORM_KEY) {
        None => Ok(field.name.clone()),
        Some([]) => Err(SynthError::MissingTransformKey {
            field: field.name.clone(),
            context: context.to_string(),
        }),
        Some([key, ..]) => Ok(key.clone()),
    }
}

/// Checks that two structure-free attributes have the same shape all the way
/// down, so a plain `clone` converts one into the other.
fn plain_compatible(
    source: &Attribute,
    target: &Attribute,
    source_path: &str,
    target_path: &str,
) -> Result<(), SynthError> {
    let incompatible = || SynthError::Incompatible {
        source_path: source_path.to_string(),
        source_kind: source.data_type.kind(),
        target_path: target_path.to_string(),
        target_kind: target.data_type.kind(),
    };
    match (&source.data_type, &target.data_type) {
        (DataType::Primitive(a), DataType::Primitive(b)) if a == b => Ok(()),
        (DataType::Array(se), DataType::Array(te)) => plain_compatible(
            se,
            te,
            &format!("{source_path}[*]"),
            &format!("{target_path}[*]"),
        ),
        (DataType::Map { key: sk, elem: se }, DataType::Map { key: tk, elem: te }) => {
            plain_compatible(sk, tk, &format!("{source_path}[key]"), &format!("{target_path}[key]"))?;
            plain_compatible(se, te, &format!("{source_path}[*]"), &format!("{target_path}[*]"))
        }
        _ => Err(incompatible()),
    }
}
