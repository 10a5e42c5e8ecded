//! Compound element selectors.
//!
//! A [`Selector`] matches a single element against a tag, classes, attribute
//! tests, an `:nth-child` position and `:not(...)` exclusions. Combinators
//! (descendant, child, sibling) are not supported; queries walk the whole
//! subtree instead.
//!
//! # Example
//!
//! ```
//! use htmldom::Selector;
//!
//! let named = Selector::any()
//!     .attr("data-element")
//!     .not(Selector::any().attr_eq("data-element", "arrow"));
//! let root = htmldom::Node::element("div")
//!     .child(htmldom::Node::element("span").attr("data-element", "arrow"))
//!     .child(htmldom::Node::element("div").attr("data-element", "body"));
//! assert_eq!(root.query_selector_all(&named).len(), 1);
//! ```

use crate::element::Node;

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrMatch {
    Exists(String),
    Equals(String, String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    tag: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
    nth_child: Option<usize>,
    not: Vec<Selector>,
}

impl Selector {
    /// Matches every element.
    pub fn any() -> Self {
        Self::default()
    }

    pub fn tag(tag: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.into().to_ascii_lowercase()),
            ..Self::default()
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Require the attribute to be present.
    pub fn attr(mut self, name: impl Into<String>) -> Self {
        self.attrs.push(AttrMatch::Exists(name.into()));
        self
    }

    /// Require the attribute to equal `value` exactly.
    pub fn attr_eq(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push(AttrMatch::Equals(name.into(), value.into()));
        self
    }

    /// Require a 1-based position among the parent's element children.
    pub fn nth_child(mut self, position: usize) -> Self {
        self.nth_child = Some(position);
        self
    }

    /// Exclude elements matching `other`.
    pub fn not(mut self, other: Selector) -> Self {
        self.not.push(other);
        self
    }

    pub fn matches(&self, node: &Node) -> bool {
        let Some(tag) = node.tag_name() else {
            return false;
        };
        if self.tag.as_ref().is_some_and(|want| *want != tag) {
            return false;
        }
        if !self.classes.iter().all(|class| node.has_class(class)) {
            return false;
        }
        let attrs_match = self.attrs.iter().all(|test| match test {
            AttrMatch::Exists(name) => node.has_attribute(name),
            AttrMatch::Equals(name, value) => {
                node.get_attribute(name).as_deref() == Some(value.as_str())
            }
        });
        if !attrs_match {
            return false;
        }
        if let Some(position) = self.nth_child {
            if node.element_index() != Some(position) {
                return false;
            }
        }
        !self.not.iter().any(|excluded| excluded.matches(node))
    }
}
