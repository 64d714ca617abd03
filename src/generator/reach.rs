use std::collections::{HashMap, HashSet};

use super::SynthError;
use crate::design::{Attribute, DataType, Design};

/// Answers "does anything reachable from this attribute satisfy `pred`?",
/// following named types through the design.
///
/// Results for named types are memoized for the lifetime of the value, which
/// is one top-level synthesis call. Each fresh query marks a type as visited
/// before descending into it, so recursive types terminate.
pub(crate) struct Reach<'a, F> {
    design: &'a Design,
    pred: F,
    memo: HashMap<String, bool>,
}

impl<'a, F> Reach<'a, F>
where
    F: Fn(&Attribute) -> bool,
{
    pub(crate) fn new(design: &'a Design, pred: F) -> Self {
        Reach {
            design,
            pred,
            memo: HashMap::new(),
        }
    }

    pub(crate) fn named(&mut self, name: &str) -> Result<bool, SynthError> {
        if let Some(&known) = self.memo.get(name) {
            return Ok(known);
        }
        let mut visiting = HashSet::new();
        let found = self.search_named(name, &mut visiting)?;
        self.memo.insert(name.to_string(), found);
        Ok(found)
    }

    fn search_named(&self, name: &str, visiting: &mut HashSet<String>) -> Result<bool, SynthError> {
        if let Some(&known) = self.memo.get(name) {
            return Ok(known);
        }
        if !visiting.insert(name.to_string()) {
            return Ok(false);
        }
        let user_type = self
            .design
            .user_type(name)
            .ok_or_else(|| SynthError::UnknownType(name.to_string()))?;
        self.search(&user_type.attribute, visiting)
    }

    fn search(&self, attribute: &Attribute, visiting: &mut HashSet<String>) -> Result<bool, SynthError> {
        if (self.pred)(attribute) {
            return Ok(true);
        }
        match &attribute.data_type {
            DataType::Primitive(_) => Ok(false),
            DataType::Array(elem) => self.search(elem, visiting),
            DataType::Map { key, elem } => {
                Ok(self.search(key, visiting)? || self.search(elem, visiting)?)
            }
            DataType::Object(object) => {
                for field in object.iter() {
                    if self.search(&field.attribute, visiting)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            DataType::Named(name) | DataType::Projected(name) => self.search_named(name, visiting),
        }
    }
}
