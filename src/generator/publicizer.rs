//! Private-to-public conversion synthesis.
//!
//! The private representation of a user type holds every field as an
//! `Option`. Its `publicize()` method builds the public representation,
//! unwrapping fields that are required or defaulted once validation and
//! finalization have run. Fields referring to user types call that type's
//! own `publicize()`, so recursive types are never inlined.

use super::code::{Block, TempVars};
use super::naming::field_ident;
use super::types::{child_path, has_inline_object, has_structure, is_boxed, is_optional, Representation};
use super::{Context, SynthError};
use crate::design::{Attribute, DataType, Object, UserType};

pub struct PublicizerSynthesizer<'a> {
    ctx: Context<'a>,
    owner: String,
}

impl<'a> PublicizerSynthesizer<'a> {
    #[must_use]
    pub fn new(ctx: Context<'a>) -> Self {
        PublicizerSynthesizer {
            ctx,
            owner: String::new(),
        }
    }

    /// Path used to name inline object structs met at the top level.
    #[must_use]
    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = owner.into();
        self
    }

    /// Code assigning the public form of the private value `source` to
    /// `target`.
    ///
    /// With `dereference` set, `target` holds the value directly; otherwise it
    /// is an `Option` and receives `Some(..)`. Values of user types are boxed,
    /// matching struct field slots. Inline objects need an owner set with
    /// [`with_owner`](Self::with_owner).
    pub fn synthesize(
        &self,
        attribute: &Attribute,
        source: &str,
        target: &str,
        dereference: bool,
        depth: usize,
    ) -> Result<Block, SynthError> {
        if self.owner.is_empty() && has_inline_object(attribute) {
            return Err(SynthError::MissingOwner);
        }
        let mut tmp = TempVars::new();
        let (mut block, mut value) = self.value(&mut tmp, attribute, source, &self.owner, depth)?;
        if is_boxed(attribute) {
            value = format!("Box::new({value})");
        }
        if !dereference {
            value = format!("Some({value})");
        }
        block.assign(target, value);
        Ok(block)
    }

    /// Body of `publicize(&self)` for `user_type`: declares `target` and fills
    /// every present field.
    pub fn synthesize_type(&self, user_type: &UserType) -> Result<Block, SynthError> {
        let object = user_type
            .attribute
            .as_object()
            .ok_or_else(|| SynthError::NotAnObject(user_type.name.clone()))?;
        let mut tmp = TempVars::new();
        let mut block = Block::new();
        block.let_mut(
            "target",
            format!(
                "{}::default()",
                self.ctx.struct_name(&user_type.name, Representation::Public)
            ),
        );
        block.extend(self.object_fields(
            &mut tmp,
            &user_type.attribute,
            object,
            "self",
            "target",
            &user_type.name,
            0,
        )?);
        Ok(block)
    }

    /// Statements to run and the expression holding the public value of
    /// `source`, a private value or a reference to one.
    fn value(
        &self,
        tmp: &mut TempVars,
        attribute: &Attribute,
        source: &str,
        owner: &str,
        depth: usize,
    ) -> Result<(Block, String), SynthError> {
        if !has_structure(attribute) {
            return Ok((Block::new(), format!("{source}.clone()")));
        }
        let mut block = Block::new();
        match &attribute.data_type {
            DataType::Named(_) | DataType::Projected(_) => {
                return Ok((block, format!("{source}.publicize()")));
            }
            DataType::Object(object) => {
                let out = tmp.next("tmp");
                block.let_mut(
                    &out,
                    format!("{}::default()", self.ctx.struct_name(owner, Representation::Public)),
                );
                block.extend(self.object_fields(tmp, attribute, object, source, &out, owner, depth)?);
                Ok((block, out))
            }
            DataType::Array(elem) => {
                let out = tmp.next("tmp");
                block.let_mut(&out, format!("Vec::with_capacity({source}.len())"));
                let e = format!("e{depth}");
                let (mut inner, item) =
                    self.value(tmp, elem, &e, &child_path(owner, "item"), depth + 1)?;
                inner.expr(format!("{out}.push({item})"));
                block.for_each(&e, format!("{source}.iter()"), inner);
                Ok((block, out))
            }
            DataType::Map { key, elem } => {
                let out = tmp.next("tmp");
                block.let_mut(
                    &out,
                    format!("std::collections::HashMap::with_capacity({source}.len())"),
                );
                let k = format!("k{depth}");
                let e = format!("e{depth}");
                let (mut inner, pub_key) =
                    self.value(tmp, key, &k, &child_path(owner, "key"), depth + 1)?;
                let (values, pub_value) =
                    self.value(tmp, elem, &e, &child_path(owner, "value"), depth + 1)?;
                inner.extend(values);
                inner.expr(format!("{out}.insert({pub_key}, {pub_value})"));
                block.for_each(format!("({k}, {e})"), format!("{source}.iter()"), inner);
                Ok((block, out))
            }
            DataType::Primitive(_) => Ok((block, format!("{source}.clone()"))),
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn object_fields(
        &self,
        tmp: &mut TempVars,
        parent: &Attribute,
        object: &Object,
        source: &str,
        target: &str,
        owner: &str,
        depth: usize,
    ) -> Result<Block, SynthError> {
        let mut block = Block::new();
        let v = format!("v{depth}");
        for field in object.iter() {
            let ident = field_ident(&field.name, &field.attribute);
            let (mut inner, mut value) = self.value(
                tmp,
                &field.attribute,
                &v,
                &child_path(owner, &field.name),
                depth + 1,
            )?;
            if is_boxed(&field.attribute) {
                value = format!("Box::new({value})");
            }
            if is_optional(Representation::Public, parent, &field.name, &field.attribute) {
                value = format!("Some({value})");
            }
            inner.assign(format!("{target}.{ident}"), value);
            block.if_let(format!("Some({v})"), format!("&{source}.{ident}"), inner);
        }
        Ok(block)
    }
}
