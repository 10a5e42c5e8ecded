use std::collections::BTreeMap;

use htmldom::{Node, Selector};

use super::{HeaderIndex, SubElements};
use crate::error::ComponentError;

/// Name of the decorative marker that is never indexed.
pub const ARROW: &str = "arrow";

/// Name of the sub-element that also gets a per-column index.
pub const HEADER: &str = "header";

/// Parse `markup` and detach its first element as the component root, then
/// index it.
pub fn mount(markup: &str) -> Result<(Node, SubElements), ComponentError> {
    let wrapper = Node::element("div");
    wrapper.set_inner_html(markup)?;
    let root = wrapper
        .first_element_child()
        .ok_or(ComponentError::EmptyTemplate)?;
    root.remove();

    let sub_elements = index(&root);
    log::debug!(
        "Mounted <{}> with {} sub-elements",
        root.tag_name().unwrap_or_default(),
        sub_elements.len()
    );
    Ok((root, sub_elements))
}

/// Build the sub-element index of `root`.
///
/// Every descendant carrying `data-element` is indexed by that name, except
/// the decorative arrow. When two nodes share a name the later one wins.
pub fn index(root: &Node) -> SubElements {
    let selector = Selector::any()
        .attr("data-element")
        .not(Selector::any().attr_eq("data-element", ARROW));

    let mut nodes = BTreeMap::new();
    let mut header = None;
    for node in root.query_selector_all(&selector) {
        let name = node.data("element").unwrap_or_default();
        if name == HEADER {
            header = Some(header_index(&node));
        }
        if nodes.insert(name.clone(), node).is_some() {
            log::warn!("Duplicate sub-element {name:?}, keeping the last one");
        }
    }

    SubElements { nodes, header }
}

fn header_index(header: &Node) -> HeaderIndex {
    let mut columns = BTreeMap::new();
    for cell in header.query_selector_all(&Selector::any().attr("data-id")) {
        let id = cell.data("id").unwrap_or_default();
        columns.insert(id, cell);
    }
    HeaderIndex {
        node: header.clone(),
        columns,
    }
}
