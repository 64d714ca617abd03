// Code generated by attrgen. DO NOT EDIT.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodePrivate {
    pub name: Option<String>,
    pub meta: Option<Box<TagPrivate>>,
    pub next: Option<Box<NodePrivate>>,
    pub slots: Option<std::collections::HashMap<String, NodeSlotsValuePrivate>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSlotsValuePrivate {
    pub size: Option<i64>,
    pub note: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Node {
    pub name: String,
    pub meta: Box<Tag>,
    pub next: Option<Box<Node>>,
    pub slots: Option<std::collections::HashMap<String, NodeSlotsValue>>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeSlotsValue {
    pub size: Option<i64>,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagPrivate {
    pub label: Option<String>,
    pub weight: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tag {
    pub label: String,
    pub weight: i64,
}

impl NodePrivate {
    /// Checks every validation rule, reporting all violations.
    pub fn validate(&self) -> Result<(), attrgen::runtime::ValidationErrors> {
        let mut err = attrgen::runtime::ValidationErrors::new();
        {
            let v0 = self;
            if v0.name.is_none() {
                err.push(attrgen::runtime::ValidationError::missing_attribute("Node", "name"));
            }
            if let Some(v1) = &v0.name {
                if v1.chars().count() < 1 {
                    err.push(attrgen::runtime::ValidationError::invalid_length("Node.name", v1, v1.chars().count(), 1, true));
                }
            }
            if let Some(v1) = &v0.meta {
                if let Err(e) = v1.validate() {
                    err.merge(e);
                }
            }
            if let Some(v1) = &v0.next {
                if let Err(e) = v1.validate() {
                    err.merge(e);
                }
            }
            if let Some(v1) = &v0.slots {
                for e1 in v1.values() {
                    {
                        let v2 = &(*e1);
                        if let Some(v3) = &v2.size {
                            if *v3 > 10 {
                                err.push(attrgen::runtime::ValidationError::invalid_range("Node.slots[*].size", v3, 10.0, false));
                            }
                        }
                    }
                }
            }
        }
        err.into_result()
    }

    /// Sets unset fields that declare a default.
    pub fn finalize(&mut self) {
        if self.meta.is_none() {
            self.meta = Some(Box::new(TagPrivate { label: Some("root".to_string()), ..Default::default() }));
        }
        if let Some(v0) = self.meta.as_mut() {
            v0.finalize();
        }
        if let Some(v0) = self.next.as_mut() {
            v0.finalize();
        }
        if let Some(v0) = self.slots.as_mut() {
            for e1 in v0.values_mut() {
                if e1.note.is_none() {
                    e1.note = Some("empty".to_string());
                }
            }
        }
    }

    /// Converts into [`Node`]; call after `validate` and `finalize`.
    pub fn publicize(&self) -> Node {
        let mut target = Node::default();
        if let Some(v0) = &self.name {
            target.name = v0.clone();
        }
        if let Some(v0) = &self.meta {
            target.meta = Box::new(v0.publicize());
        }
        if let Some(v0) = &self.next {
            target.next = Some(Box::new(v0.publicize()));
        }
        if let Some(v0) = &self.slots {
            let mut tmp1 = std::collections::HashMap::with_capacity(v0.len());
            for (k1, e1) in v0.iter() {
                let mut tmp2 = NodeSlotsValue::default();
                if let Some(v2) = &e1.size {
                    tmp2.size = Some(v2.clone());
                }
                if let Some(v2) = &e1.note {
                    tmp2.note = v2.clone();
                }
                tmp1.insert(k1.clone(), tmp2);
            }
            target.slots = Some(tmp1);
        }
        target
    }
}

impl Node {
    /// Checks every validation rule, reporting all violations.
    pub fn validate(&self) -> Result<(), attrgen::runtime::ValidationErrors> {
        let mut err = attrgen::runtime::ValidationErrors::new();
        {
            let v0 = self;
            if v0.name.is_empty() {
                err.push(attrgen::runtime::ValidationError::missing_attribute("Node", "name"));
            }
            {
                let v1 = &v0.name;
                if v1.chars().count() < 1 {
                    err.push(attrgen::runtime::ValidationError::invalid_length("Node.name", v1, v1.chars().count(), 1, true));
                }
            }
            {
                let v1 = &v0.meta;
                if let Err(e) = v1.validate() {
                    err.merge(e);
                }
            }
            if let Some(v1) = &v0.next {
                if let Err(e) = v1.validate() {
                    err.merge(e);
                }
            }
            if let Some(v1) = &v0.slots {
                for e1 in v1.values() {
                    {
                        let v2 = &(*e1);
                        if let Some(v3) = &v2.size {
                            if *v3 > 10 {
                                err.push(attrgen::runtime::ValidationError::invalid_range("Node.slots[*].size", v3, 10.0, false));
                            }
                        }
                    }
                }
            }
        }
        err.into_result()
    }
}

impl TagPrivate {
    /// Checks every validation rule, reporting all violations.
    pub fn validate(&self) -> Result<(), attrgen::runtime::ValidationErrors> {
        let mut err = attrgen::runtime::ValidationErrors::new();
        {
            let v0 = self;
            if v0.label.is_none() {
                err.push(attrgen::runtime::ValidationError::missing_attribute("Tag", "label"));
            }
            if let Some(v1) = &v0.weight {
                if *v1 < 0 {
                    err.push(attrgen::runtime::ValidationError::invalid_range("Tag.weight", v1, 0.0, true));
                }
            }
        }
        err.into_result()
    }

    /// Sets unset fields that declare a default.
    pub fn finalize(&mut self) {
        if self.weight.is_none() {
            self.weight = Some(1);
        }
    }

    /// Converts into [`Tag`]; call after `validate` and `finalize`.
    pub fn publicize(&self) -> Tag {
        let mut target = Tag::default();
        if let Some(v0) = &self.label {
            target.label = v0.clone();
        }
        if let Some(v0) = &self.weight {
            target.weight = v0.clone();
        }
        target
    }
}

impl Tag {
    /// Checks every validation rule, reporting all violations.
    pub fn validate(&self) -> Result<(), attrgen::runtime::ValidationErrors> {
        let mut err = attrgen::runtime::ValidationErrors::new();
        {
            let v0 = self;
            if v0.label.is_empty() {
                err.push(attrgen::runtime::ValidationError::missing_attribute("Tag", "label"));
            }
            {
                let v1 = &v0.weight;
                if *v1 < 0 {
                    err.push(attrgen::runtime::ValidationError::invalid_range("Tag.weight", v1, 0.0, true));
                }
            }
        }
        err.into_result()
    }
}

/// Converts [`Node`] into [`Node`].
pub fn copy_node(source: &Node) -> Node {
    let mut target = Node::default();
    target.meta = Box::new(transform_tag_to_tag(&source.meta));
    target.name = source.name.clone();
    if let Some(v0) = &source.next {
        target.next = Some(Box::new(copy_node(&v0)));
    }
    if let Some(v0) = &source.slots {
        let mut tmp1 = std::collections::HashMap::with_capacity(v0.len());
        for (k1, e1) in v0.iter() {
            let mut tmp2 = NodeSlotsValue::default();
            tmp2.note = e1.note.clone();
            if let Some(v2) = &e1.size {
                tmp2.size = Some(v2.clone());
            }
            tmp1.insert(k1.clone(), tmp2);
        }
        target.slots = Some(tmp1);
    }
    target
}

fn transform_tag_to_tag(source: &Tag) -> Tag {
    let mut target = Tag::default();
    target.label = source.label.clone();
    target.weight = source.weight.clone();
    target
}
