//! The render, index and patch lifecycle shared by every component.
//!
//! A component renders its template once, mounts the markup into a detached
//! [`Node`] tree and indexes the nodes marked with `data-element`. Afterwards
//! it only mutates those indexed nodes.
//!
//! ```
//! use dashkit_lib::component::Mounted;
//!
//! let mounted = Mounted::new(
//!     r#"<div><h1 data-element="title">Hi</h1><p data-element="body"></p></div>"#,
//! )
//! .unwrap();
//! assert_eq!(mounted.sub_elements().names(), ["body", "title"]);
//! assert!(mounted.element().unwrap().parent().is_none());
//! ```

pub mod mount;

use std::collections::BTreeMap;

use htmldom::Node;

use crate::error::ComponentError;

pub use mount::{index, mount};

/// The header row and its cells keyed by `data-id`.
#[derive(Debug, Clone)]
pub struct HeaderIndex {
    pub node: Node,
    pub columns: BTreeMap<String, Node>,
}

/// Named nodes of a mounted component.
#[derive(Debug, Clone, Default)]
pub struct SubElements {
    pub(crate) nodes: BTreeMap<String, Node>,
    pub(crate) header: Option<HeaderIndex>,
}

impl SubElements {
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.get(name)
    }

    /// Like [`get`](Self::get), but a missing node is an error.
    pub fn require(&self, name: &str) -> Result<&Node, ComponentError> {
        self.get(name).ok_or_else(|| ComponentError::missing(name))
    }

    /// The per-column header index, present when a `header` sub-element was
    /// mounted.
    pub fn header(&self) -> Option<&HeaderIndex> {
        self.header.as_ref()
    }

    /// Indexed names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.nodes.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.header = None;
    }
}

/// A root node together with its sub-element index.
///
/// Once destroyed the root is gone for good and every accessor reports
/// nothing.
#[derive(Debug)]
pub struct Mounted {
    element: Option<Node>,
    sub_elements: SubElements,
}

impl Mounted {
    pub fn new(markup: &str) -> Result<Self, ComponentError> {
        let (element, sub_elements) = mount(markup)?;
        Ok(Self {
            element: Some(element),
            sub_elements,
        })
    }

    pub fn element(&self) -> Option<&Node> {
        self.element.as_ref()
    }

    pub fn sub_elements(&self) -> &SubElements {
        &self.sub_elements
    }

    /// `false` after [`destroy`](Self::destroy).
    pub fn is_alive(&self) -> bool {
        self.element.is_some()
    }

    /// Detach the root from wherever it was inserted. Idempotent.
    pub fn remove(&self) {
        if let Some(element) = &self.element {
            element.remove();
        }
    }

    /// Detach the root and drop it along with the index. Idempotent.
    pub fn destroy(&mut self) {
        self.remove();
        if self.element.take().is_some() {
            log::debug!("Destroyed component");
        }
        self.sub_elements.clear();
    }
}

/// Lifecycle surface shared by components.
pub trait Component {
    fn mounted(&self) -> &Mounted;

    fn mounted_mut(&mut self) -> &mut Mounted;

    /// The root node, or `None` once destroyed.
    fn element(&self) -> Option<&Node> {
        self.mounted().element()
    }

    fn sub_elements(&self) -> &SubElements {
        self.mounted().sub_elements()
    }

    fn remove(&self) {
        self.mounted().remove();
    }

    fn destroy(&mut self) {
        self.mounted_mut().destroy();
    }
}
