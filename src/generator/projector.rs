//! View projection for projected types.
//!
//! A view struct holds a subset of the public struct's fields with the same
//! Rust types, so projecting is a field-by-field clone.

use super::code::Block;
use super::naming::field_ident;
use super::{Context, SynthError};
use crate::design::UserType;

pub struct ProjectorSynthesizer<'a> {
    ctx: Context<'a>,
}

impl<'a> ProjectorSynthesizer<'a> {
    #[must_use]
    pub fn new(ctx: Context<'a>) -> Self {
        ProjectorSynthesizer { ctx }
    }

    /// Code copying the fields of `view` from the public value `source` into
    /// the view value `target`.
    pub fn synthesize(
        &self,
        user_type: &UserType,
        view: &str,
        source: &str,
        target: &str,
    ) -> Result<Block, SynthError> {
        let unknown = || SynthError::UnknownView {
            type_name: user_type.name.clone(),
            view: view.to_string(),
        };
        let object = user_type
            .view(view)
            .and_then(|v| v.attribute.as_object())
            .ok_or_else(unknown)?;

        let mut block = Block::new();
        for field in object.iter() {
            let ident = field_ident(&field.name, &field.attribute);
            block.assign(format!("{target}.{ident}"), format!("{source}.{ident}.clone()"));
        }
        Ok(block)
    }

    /// Body of `as_<view>_view(&self)`.
    pub fn synthesize_method(&self, user_type: &UserType, view: &str) -> Result<Block, SynthError> {
        let mut block = Block::new();
        block.let_mut(
            "target",
            format!("{}::default()", self.ctx.view_struct_name(&user_type.name, view)),
        );
        block.extend(self.synthesize(user_type, view, "self", "target")?);
        Ok(block)
    }
}
