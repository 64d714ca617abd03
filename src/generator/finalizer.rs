//! Default-value finalizer synthesis.
//!
//! Finalizers run on the private representation, where every field is an
//! `Option`. Unset fields that declare a default are filled in; nested
//! objects and collection elements are visited when present.

use super::code::Block;
use super::literal::default_literal;
use super::naming::field_ident;
use super::reach::Reach;
use super::types::{child_path, is_boxed};
use super::{Context, SynthError};
use crate::design::{Attribute, DataType, Object};

type NeedsFinalize<'a> = Reach<'a, fn(&Attribute) -> bool>;

fn has_default(attribute: &Attribute) -> bool {
    attribute.default_value.is_some()
}

/// Like [`child_path`], but an unknown owner stays unknown.
fn sub_path(owner: &str, segment: &str) -> String {
    if owner.is_empty() {
        String::new()
    } else {
        child_path(owner, segment)
    }
}

pub struct FinalizerSynthesizer<'a> {
    ctx: Context<'a>,
    owner: String,
}

impl<'a> FinalizerSynthesizer<'a> {
    #[must_use]
    pub fn new(ctx: Context<'a>) -> Self {
        FinalizerSynthesizer {
            ctx,
            owner: String::new(),
        }
    }

    /// Path naming inline objects met at the top level, used by defaults
    /// that build one.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Code filling in defaults on the value at `target` (a mutable place).
    ///
    /// A named type is expanded at the top level; named types reached from
    /// its fields call their own `finalize()` when anything under them has a
    /// default. Which types need that call is decided once per call and
    /// memoized, so a type referring to itself is visited once.
    pub fn synthesize(&self, attribute: &Attribute, target: &str, depth: usize) -> Result<Block, SynthError> {
        let mut reach: NeedsFinalize<'a> = Reach::new(self.ctx.design, has_default);
        let owner = match &attribute.data_type {
            DataType::Named(name) | DataType::Projected(name) => name.as_str(),
            _ => self.owner.as_str(),
        };
        let attribute = self.ctx.design.underlying(attribute)?;
        match &attribute.data_type {
            DataType::Object(object) => self.object(&mut reach, object, target, owner, depth),
            _ => self.value(&mut reach, attribute, target, owner, depth),
        }
    }

    /// Whether `finalize()` of `type_name` does anything.
    pub fn type_needs_finalize(&self, type_name: &str) -> Result<bool, SynthError> {
        let mut reach: NeedsFinalize<'a> = Reach::new(self.ctx.design, has_default);
        reach.named(type_name)
    }

    fn object(
        &self,
        reach: &mut NeedsFinalize<'a>,
        object: &Object,
        target: &str,
        owner: &str,
        depth: usize,
    ) -> Result<Block, SynthError> {
        let mut block = Block::new();
        for field in object.iter() {
            let slot = format!("{target}.{}", field_ident(&field.name, &field.attribute));
            let path = sub_path(owner, &field.name);
            if let Some(default) = &field.attribute.default_value {
                let mut literal = default_literal(self.ctx, &field.attribute, default, &path)?;
                if is_boxed(&field.attribute) {
                    literal = format!("Box::new({literal})");
                }
                let mut assign = Block::new();
                assign.assign(&slot, format!("Some({literal})"));
                block.if_then(format!("{slot}.is_none()"), assign);
            }

            let v = format!("v{depth}");
            let inner = self.value(reach, &field.attribute, &v, &path, depth + 1)?;
            if !inner.is_empty() {
                block.if_let(format!("Some({v})"), format!("{slot}.as_mut()"), inner);
            }
        }
        Ok(block)
    }

    /// Code finalizing the value behind the mutable reference `binding`.
    fn value(
        &self,
        reach: &mut NeedsFinalize<'a>,
        attribute: &Attribute,
        binding: &str,
        path: &str,
        depth: usize,
    ) -> Result<Block, SynthError> {
        let mut block = Block::new();
        match &attribute.data_type {
            DataType::Primitive(_) => {}
            DataType::Object(object) => return self.object(reach, object, binding, path, depth),
            DataType::Named(name) | DataType::Projected(name) => {
                if reach.named(name)? {
                    block.expr(format!("{binding}.finalize()"));
                }
            }
            DataType::Array(elem) => {
                let e = format!("e{depth}");
                let inner = self.value(reach, elem, &e, &sub_path(path, "item"), depth + 1)?;
                if !inner.is_empty() {
                    block.for_each(e, format!("{binding}.iter_mut()"), inner);
                }
            }
            DataType::Map { elem, .. } => {
                let e = format!("e{depth}");
                let inner = self.value(reach, elem, &e, &sub_path(path, "value"), depth + 1)?;
                if !inner.is_empty() {
                    block.for_each(e, format!("{binding}.values_mut()"), inner);
                }
            }
        }
        Ok(block)
    }
}
