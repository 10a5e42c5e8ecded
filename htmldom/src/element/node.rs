use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use super::Content;
use crate::error::ParseError;
use crate::select::Selector;

pub(crate) struct NodeData {
    pub(crate) content: Content,
    pub(crate) parent: Weak<RefCell<NodeData>>,
    pub(crate) children: Vec<Node>,
}

/// A handle to a node in a live tree.
///
/// Cloning a `Node` clones the handle, not the node: both handles point at the
/// same tree position and see each other's mutations. Equality is identity.
///
/// Parents own their children; a child only keeps a weak link back up, so
/// dropping the last handle to a detached subtree frees it.
#[derive(Clone)]
pub struct Node(pub(crate) Rc<RefCell<NodeData>>);

impl Node {
    fn from_content(content: Content) -> Self {
        Self(Rc::new(RefCell::new(NodeData {
            content,
            parent: Weak::new(),
            children: Vec::new(),
        })))
    }

    /// Create a detached element. The tag name is stored lowercase.
    pub fn element(tag: impl Into<String>) -> Self {
        Self::from_content(Content::Element {
            tag: tag.into().to_ascii_lowercase(),
            attrs: Vec::new(),
        })
    }

    /// Create a detached text node.
    pub fn text(text: impl Into<String>) -> Self {
        Self::from_content(Content::Text(text.into()))
    }

    // Builders

    pub fn attr(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn class(self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn child(self, child: Node) -> Self {
        self.append_child(&child);
        self
    }

    pub fn with_children(self, children: impl IntoIterator<Item = Node>) -> Self {
        self.append(children);
        self
    }

    // Identity

    /// Returns `true` if both handles point at the same node.
    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn is_element(&self) -> bool {
        self.0.borrow().content.is_element()
    }

    pub fn is_text(&self) -> bool {
        !self.is_element()
    }

    pub fn tag_name(&self) -> Option<String> {
        match &self.0.borrow().content {
            Content::Element { tag, .. } => Some(tag.clone()),
            Content::Text(_) => None,
        }
    }

    // Attributes

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        match &self.0.borrow().content {
            Content::Element { attrs, .. } => attrs
                .iter()
                .find(|(key, _)| key.eq_ignore_ascii_case(name))
                .map(|(_, value)| value.clone()),
            Content::Text(_) => None,
        }
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        match &self.0.borrow().content {
            Content::Element { attrs, .. } => {
                attrs.iter().any(|(key, _)| key.eq_ignore_ascii_case(name))
            }
            Content::Text(_) => false,
        }
    }

    /// Set an attribute, replacing any previous value. No-op on text nodes.
    pub fn set_attribute(&self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into().to_ascii_lowercase();
        let value = value.into();
        if let Content::Element { attrs, .. } = &mut self.0.borrow_mut().content {
            match attrs.iter_mut().find(|(key, _)| *key == name) {
                Some(slot) => slot.1 = value,
                None => attrs.push((name, value)),
            }
        }
    }

    pub fn remove_attribute(&self, name: &str) {
        if let Content::Element { attrs, .. } = &mut self.0.borrow_mut().content {
            attrs.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
        }
    }

    /// All attributes in source order.
    pub fn attributes(&self) -> Vec<(String, String)> {
        match &self.0.borrow().content {
            Content::Element { attrs, .. } => attrs.clone(),
            Content::Text(_) => Vec::new(),
        }
    }

    /// Read a `data-*` attribute.
    pub fn data(&self, key: &str) -> Option<String> {
        self.get_attribute(&format!("data-{key}"))
    }

    pub fn set_data(&self, key: &str, value: impl Into<String>) {
        self.set_attribute(format!("data-{key}"), value);
    }

    // Classes

    pub fn class_list(&self) -> Vec<String> {
        self.get_attribute("class")
            .map(|classes| classes.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.class_list().iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        let mut classes = self.class_list();
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_string());
            self.set_attribute("class", classes.join(" "));
        }
    }

    pub fn remove_class(&self, class: &str) {
        let classes = self.class_list();
        if classes.iter().any(|c| c == class) {
            let kept: Vec<_> = classes.into_iter().filter(|c| c != class).collect();
            self.set_attribute("class", kept.join(" "));
        }
    }

    /// Add the class when `on` is true, remove it otherwise.
    pub fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // Tree

    pub fn parent(&self) -> Option<Node> {
        self.0.borrow().parent.upgrade().map(Node)
    }

    /// All child nodes, text included.
    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn element_children(&self) -> Vec<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .filter(|child| child.is_element())
            .cloned()
            .collect()
    }

    pub fn first_element_child(&self) -> Option<Node> {
        self.0
            .borrow()
            .children
            .iter()
            .find(|child| child.is_element())
            .cloned()
    }

    /// 1-based position among the parent's element children.
    pub fn element_index(&self) -> Option<usize> {
        let parent = self.parent()?;
        parent
            .element_children()
            .iter()
            .position(|sibling| sibling.ptr_eq(self))
            .map(|index| index + 1)
    }

    /// Returns `true` if `other` is this node or one of its descendants.
    pub fn contains(&self, other: &Node) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// Move `child` to the end of this node's children.
    ///
    /// The child is detached from its previous parent first, so appending a
    /// node that is already here reorders it. Appending an ancestor (or the
    /// node itself) would create a cycle and is ignored.
    pub fn append_child(&self, child: &Node) {
        if child.contains(self) {
            log::warn!("Refusing to append a node into its own subtree");
            return;
        }
        child.remove();
        child.0.borrow_mut().parent = Rc::downgrade(&self.0);
        self.0.borrow_mut().children.push(child.clone());
    }

    pub fn append(&self, children: impl IntoIterator<Item = Node>) {
        for child in children {
            self.append_child(&child);
        }
    }

    /// Detach this node from its parent. Idempotent.
    pub fn remove(&self) {
        let parent = std::mem::take(&mut self.0.borrow_mut().parent);
        if let Some(parent) = parent.upgrade() {
            parent
                .borrow_mut()
                .children
                .retain(|child| !Rc::ptr_eq(&child.0, &self.0));
        }
    }

    /// Detach every child.
    pub fn clear_children(&self) {
        let children = std::mem::take(&mut self.0.borrow_mut().children);
        for child in children {
            child.0.borrow_mut().parent = Weak::new();
        }
    }

    /// Every descendant in document order, excluding this node.
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        self.collect_descendants(&mut out);
        out
    }

    fn collect_descendants(&self, out: &mut Vec<Node>) {
        for child in self.children() {
            out.push(child.clone());
            child.collect_descendants(out);
        }
    }

    // Text and markup

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        let data = self.0.borrow();
        match &data.content {
            Content::Text(text) => out.push_str(text),
            Content::Element { .. } => {
                for child in &data.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Replace all children with a single text node (none when `text` is empty).
    pub fn set_text_content(&self, text: &str) {
        if let Content::Text(current) = &mut self.0.borrow_mut().content {
            *current = text.to_string();
            return;
        }
        self.clear_children();
        if !text.is_empty() {
            self.append_child(&Node::text(text));
        }
    }

    pub fn inner_html(&self) -> String {
        crate::serialize::inner_html(self)
    }

    pub fn outer_html(&self) -> String {
        crate::serialize::outer_html(self)
    }

    /// Parse `markup` and replace the children with the result.
    ///
    /// The markup is parsed before anything is detached, so on error the node
    /// keeps its previous children.
    pub fn set_inner_html(&self, markup: &str) -> Result<(), ParseError> {
        if !self.is_element() {
            return Ok(());
        }
        let nodes = crate::parse::parse_fragment(markup)?;
        self.clear_children();
        self.append(nodes);
        Ok(())
    }

    // Queries

    /// Every descendant element matching `selector`, in document order.
    pub fn query_selector_all(&self, selector: &Selector) -> Vec<Node> {
        self.descendants()
            .into_iter()
            .filter(|node| selector.matches(node))
            .collect()
    }

    pub fn query_selector(&self, selector: &Selector) -> Option<Node> {
        self.descendants()
            .into_iter()
            .find(|node| selector.matches(node))
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.0.borrow();
        match &data.content {
            Content::Element { tag, attrs } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", &data.children.len())
                .finish(),
            Content::Text(text) => write!(f, "Text({text:?})"),
        }
    }
}
