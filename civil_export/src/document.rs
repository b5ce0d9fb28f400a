//! In-memory document tree assembled by the exporters.

use std::fmt::Display;

/// Named element with string attributes and child elements.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Element {
    pub name: String,
    /// Attributes in insertion order.
    pub attributes: Vec<(String, String)>,
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing an existing value of the same name.
    pub fn set_attribute(&mut self, name: &str, value: impl Display) -> &mut Self {
        let value = value.to_string();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name.to_string(), value)),
        }
        self
    }

    /// Builder form of [`Element::set_attribute`].
    pub fn with_attribute(mut self, name: &str, value: impl Display) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Appends `child` and returns a handle to it.
    pub fn append_child(&mut self, child: Element) -> &mut Element {
        self.children.push(child);
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    /// Children with the given element name.
    pub fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    pub fn child(&self, name: &str) -> Option<&Element> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Export document: a single `Document` root carrying the drawing name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: Element,
}

impl Document {
    pub fn new(name: &str) -> Self {
        Self {
            root: Element::new("Document").with_attribute("Name", name),
        }
    }
}

/// Text form of numeric attribute values: the shortest decimal string that
/// reads back to the same `f64`, without rounding.
pub fn number(value: f64) -> String {
    value.to_string()
}
