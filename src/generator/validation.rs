//! Validation code synthesis.
//!
//! Emits one check per validation rule. A failing check pushes an error onto
//! the `err` aggregate (a `ValidationErrors` declared by the caller) and the
//! remaining checks still run, so one `validate()` call reports every
//! violation.
//!
//! Checks on a value are emitted against a reference binding `v<depth>`:
//!
//! ```text
//! if let Some(v1) = &v0.vintage {
//!     if *v1 < 1900 {
//!         err.push(rt::ValidationError::invalid_range("Bottle.vintage", v1, 1900.0, true));
//!     }
//! }
//! ```

use super::code::{Block, Stmt};
use super::literal::{comparison_literal, f64_literal};
use super::naming::field_ident;
use super::reach::Reach;
use super::types::{is_optional, Representation};
use super::{Context, SynthError};
use crate::design::{in_i64_range, Attribute, DataType, PrimitiveKind, Validation};

/// Name of the error aggregate in generated validation bodies.
pub const ERRORS_VAR: &str = "err";

pub struct ValidationSynthesizer<'a> {
    ctx: Context<'a>,
    rep: Representation,
}

type NeedsValidation<'a> = Reach<'a, fn(&Attribute) -> bool>;

fn has_rules(attribute: &Attribute) -> bool {
    !attribute.validations.is_empty()
}

impl<'a> ValidationSynthesizer<'a> {
    #[must_use]
    pub fn new(ctx: Context<'a>, rep: Representation) -> Self {
        ValidationSynthesizer { ctx, rep }
    }

    /// Checks for `attribute` held at `target`.
    ///
    /// Named types are expanded one level: their own fields are checked, and
    /// fields referring to other named types call that type's `validate()`.
    /// Array and map elements of `attribute` itself are not visited; elements
    /// of its fields are. The block is empty when nothing reachable carries a
    /// rule.
    pub fn synthesize(
        &self,
        attribute: &Attribute,
        target: &str,
        path: &str,
        depth: usize,
    ) -> Result<Block, SynthError> {
        let mut reach: NeedsValidation<'a> = Reach::new(self.ctx.design, has_rules);
        let attribute = self.ctx.design.underlying(attribute)?;
        self.value(&mut reach, attribute, target, path, depth, false, false)
    }

    /// Whether the `validate()` method of `type_name` can report anything.
    pub fn type_needs_validation(&self, type_name: &str) -> Result<bool, SynthError> {
        let mut reach: NeedsValidation<'a> = Reach::new(self.ctx.design, has_rules);
        reach.named(type_name)
    }

    #[allow(clippy::too_many_arguments)]
    fn value(
        &self,
        reach: &mut NeedsValidation<'a>,
        attribute: &Attribute,
        target: &str,
        path: &str,
        depth: usize,
        optional: bool,
        elements: bool,
    ) -> Result<Block, SynthError> {
        let v = format!("v{depth}");
        let mut body = self.rules(attribute, &v, path);

        match &attribute.data_type {
            DataType::Primitive(_) => {}
            DataType::Object(object) => {
                for field in object.iter() {
                    let ident = field_ident(&field.name, &field.attribute);
                    let field_optional =
                        is_optional(self.rep, attribute, &field.name, &field.attribute);
                    body.extend(self.value(
                        reach,
                        &field.attribute,
                        &format!("{v}.{ident}"),
                        &format!("{path}.{ident}"),
                        depth + 1,
                        field_optional,
                        true,
                    )?);
                }
            }
            DataType::Named(name) | DataType::Projected(name) => {
                if reach.named(name)? {
                    let mut merge = Block::new();
                    merge.expr(format!("{ERRORS_VAR}.merge(e)"));
                    body.if_let("Err(e)", format!("{v}.validate()"), merge);
                }
            }
            DataType::Array(elem) if elements => {
                let e = format!("e{depth}");
                let inner = self.value(
                    reach,
                    elem,
                    &format!("(*{e})"),
                    &format!("{path}[*]"),
                    depth + 1,
                    false,
                    true,
                )?;
                if !inner.is_empty() {
                    body.for_each(e, format!("{v}.iter()"), inner);
                }
            }
            DataType::Map { key, elem } if elements => {
                let k = format!("k{depth}");
                let e = format!("e{depth}");
                let keys = self.value(
                    reach,
                    key,
                    &format!("(*{k})"),
                    &format!("{path}[key]"),
                    depth + 1,
                    false,
                    true,
                )?;
                let values = self.value(
                    reach,
                    elem,
                    &format!("(*{e})"),
                    &format!("{path}[*]"),
                    depth + 1,
                    false,
                    true,
                )?;
                // Bind only the side that is checked.
                match (keys.is_empty(), values.is_empty()) {
                    (true, true) => {}
                    (false, true) => body.for_each(k, format!("{v}.keys()"), keys),
                    (true, false) => body.for_each(e, format!("{v}.values()"), values),
                    (false, false) => {
                        let mut inner = keys;
                        inner.extend(values);
                        body.for_each(format!("({k}, {e})"), format!("{v}.iter()"), inner);
                    }
                }
            }
            DataType::Array(_) | DataType::Map { .. } => {}
        }

        if body.is_empty() {
            return Ok(body);
        }
        let mut out = Block::new();
        if optional {
            out.if_let(format!("Some({v})"), format!("&{target}"), body);
        } else {
            let binding = if target == "self" {
                "self".to_string()
            } else {
                format!("&{target}")
            };
            let mut scope = Block::new();
            scope.push(Stmt::Let {
                name: v,
                mutable: false,
                value: Some(binding),
            });
            scope.extend(body);
            out.push(Stmt::Scope(scope));
        }
        Ok(out)
    }

    /// Direct rule checks against the reference `v`.
    fn rules(&self, attribute: &Attribute, v: &str, path: &str) -> Block {
        let rt = &self.ctx.config.runtime_path;
        let kind = match &attribute.data_type {
            DataType::Primitive(k) => Some(*k),
            _ => None,
        };
        let length = if kind == Some(PrimitiveKind::String) {
            format!("{v}.chars().count()")
        } else {
            format!("{v}.len()")
        };

        let mut rules: Vec<&Validation> = attribute.validations.iter().collect();
        rules.sort_by_key(|r| r.rank());

        let mut block = Block::new();
        for rule in rules {
            match rule {
                Validation::Enum(values) => {
                    let Some(kind) = kind else { continue };
                    if values.is_empty() {
                        continue;
                    }
                    let literals: Vec<String> =
                        values.iter().map(|val| comparison_literal(kind, val)).collect();
                    let cond = literals
                        .iter()
                        .map(|l| format!("*{v} == {l}"))
                        .collect::<Vec<_>>()
                        .join(" || ");
                    block.if_then(
                        format!("!({cond})"),
                        push_error(format!(
                            "{rt}::ValidationError::invalid_enum_value({path:?}, {v}, &[{}])",
                            literals.join(", ")
                        )),
                    );
                }
                Validation::Format(format) => {
                    let variant = format.variant();
                    block.if_let(
                        "Err(reason)",
                        format!("{rt}::validate_format({rt}::Format::{variant}, {v})"),
                        push_error(format!(
                            "{rt}::ValidationError::invalid_format({path:?}, {v}, {rt}::Format::{variant}, reason)"
                        )),
                    );
                }
                Validation::Pattern(pattern) => {
                    block.if_then(
                        format!("!{rt}::validate_pattern({pattern:?}, {v})"),
                        push_error(format!(
                            "{rt}::ValidationError::invalid_pattern({path:?}, {v}, {pattern:?})"
                        )),
                    );
                }
                Validation::Minimum(bound) | Validation::Maximum(bound) => {
                    let minimum = matches!(rule, Validation::Minimum(_));
                    let op = if minimum { "<" } else { ">" };
                    let cond = match kind {
                        Some(PrimitiveKind::Integer) if bound.fract() == 0.0 && in_i64_range(*bound) => {
                            format!("*{v} {op} {}", *bound as i64)
                        }
                        Some(PrimitiveKind::Integer) => {
                            format!("(*{v} as f64) {op} {}", f64_literal(*bound))
                        }
                        _ => format!("*{v} {op} {}", f64_literal(*bound)),
                    };
                    block.if_then(
                        cond,
                        push_error(format!(
                            "{rt}::ValidationError::invalid_range({path:?}, {v}, {}, {minimum})",
                            f64_literal(*bound)
                        )),
                    );
                }
                Validation::MinLength(bound) | Validation::MaxLength(bound) => {
                    let minimum = matches!(rule, Validation::MinLength(_));
                    let op = if minimum { "<" } else { ">" };
                    block.if_then(
                        format!("{length} {op} {bound}"),
                        push_error(format!(
                            "{rt}::ValidationError::invalid_length({path:?}, {v}, {length}, {bound}, {minimum})"
                        )),
                    );
                }
                Validation::Required(names) => {
                    let Some(object) = attribute.as_object() else { continue };
                    for name in names {
                        let Some(field) = object.get(name) else { continue };
                        let ident = field_ident(name, field);
                        let missing = format!(
                            "{rt}::ValidationError::missing_attribute({path:?}, {name:?})"
                        );
                        match self.rep {
                            Representation::Private => {
                                block.if_then(format!("{v}.{ident}.is_none()"), push_error(missing));
                            }
                            Representation::Public => {
                                // Public fields that are required always hold a value.
                                if matches!(field.data_type, DataType::Primitive(PrimitiveKind::String)) {
                                    block.if_then(format!("{v}.{ident}.is_empty()"), push_error(missing));
                                }
                            }
                        }
                    }
                }
            }
        }
        block
    }
}

fn push_error(error: String) -> Block {
    let mut block = Block::new();
    block.expr(format!("{ERRORS_VAR}.push({error})"));
    block
}
