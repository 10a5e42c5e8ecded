//! Markup output.

use crate::element::{Content, Node};

/// Elements that never have children or a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Escapes character data.
pub fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escapes a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

pub fn inner_html(node: &Node) -> String {
    let mut out = String::new();
    for child in node.children() {
        write_node(&child, &mut out);
    }
    out
}

fn write_node(node: &Node, out: &mut String) {
    let data = node.0.borrow();
    match &data.content {
        Content::Text(text) => out.push_str(&escape_text(text)),
        Content::Element { tag, attrs } => {
            out.push('<');
            out.push_str(tag);
            for (name, value) in attrs {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape_attr(value));
                out.push('"');
            }
            out.push('>');
            if is_void(tag) {
                return;
            }
            for child in &data.children {
                write_node(child, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(escape_text("a < b & c"), "a &lt; b &amp; c");
        assert_eq!(escape_attr(r#"say "hi""#), "say &quot;hi&quot;");
    }

    #[test]
    fn test_void_elements_have_no_closing_tag() {
        let node = Node::element("p")
            .child(Node::text("one"))
            .child(Node::element("br"))
            .child(Node::text("two"));
        assert_eq!(node.outer_html(), "<p>one<br>two</p>");
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let node = Node::element("a").attr("href", "/x?a=1&b=2").attr("class", "link");
        assert_eq!(
            node.outer_html(),
            r#"<a href="/x?a=1&amp;b=2" class="link"></a>"#
        );
    }
}
