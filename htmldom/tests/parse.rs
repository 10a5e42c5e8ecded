use htmldom::{parse_fragment, Node, ParseError};

fn parse_one(markup: &str) -> Node {
    let nodes = parse_fragment(markup).unwrap();
    nodes
        .into_iter()
        .find(Node::is_element)
        .expect("markup should contain an element")
}

#[test]
fn test_nested_elements_and_attributes() {
    let node = parse_one(
        r#"<div data-element="header" class="sortable-table__header sortable-table__row">
             <div class="sortable-table__cell" data-id="title" data-order="">
               <span>Name</span>
             </div>
           </div>"#,
    );

    assert_eq!(node.tag_name().as_deref(), Some("div"));
    assert_eq!(node.data("element").as_deref(), Some("header"));
    assert!(node.has_class("sortable-table__row"));

    let cell = node.first_element_child().unwrap();
    assert_eq!(cell.data("id").as_deref(), Some("title"));
    assert_eq!(cell.data("order").as_deref(), Some(""));
    assert_eq!(cell.text_content().trim(), "Name");
}

#[test]
fn test_fragment_returns_detached_top_level_nodes() {
    let nodes = parse_fragment("<p>a</p>text<p>b</p>").unwrap();
    assert_eq!(nodes.len(), 3);
    assert!(nodes.iter().all(|node| node.parent().is_none()));
    assert_eq!(nodes[1].text_content(), "text");
}

#[test]
fn test_self_closing_and_void_elements() {
    let node = parse_one(r#"<span data-element="arrow"><span class="sort-arrow"/></span>"#);
    assert_eq!(node.children().len(), 1);

    let node = parse_one("<p>one<br>two<img src=\"x.png\">three</p>");
    assert_eq!(node.element_children().len(), 2);
    assert_eq!(node.text_content(), "onetwothree");
}

#[test]
fn test_attribute_syntax() {
    let node = parse_one("<input type=checkbox checked data-x='it&#39;s' data-y=\"a &amp; b\">");
    assert_eq!(node.get_attribute("type").as_deref(), Some("checkbox"));
    assert_eq!(node.get_attribute("checked").as_deref(), Some(""));
    assert_eq!(node.data("x").as_deref(), Some("it's"));
    assert_eq!(node.data("y").as_deref(), Some("a & b"));
}

#[test]
fn test_escaped_markup_in_attribute_round_trips() {
    let tooltip = "<span><small>Jan 1, 2024</small><br /><strong>33%</strong></span>";
    let node = Node::element("div").attr("data-tooltip", tooltip);

    let reparsed = parse_one(&node.outer_html());
    assert_eq!(reparsed.data("tooltip").as_deref(), Some(tooltip));
    assert!(reparsed.children().is_empty());
}

#[test]
fn test_mismatched_end_tags_are_forgiven() {
    let node = parse_one("<div><span>a</div><p>b</p>");
    assert_eq!(node.tag_name().as_deref(), Some("div"));
    assert_eq!(node.text_content(), "a");

    let node = parse_one("<div>a</span>b</div>");
    assert_eq!(node.text_content(), "ab");
}

#[test]
fn test_unclosed_elements_close_at_end() {
    let node = parse_one("<ul><li>a<li>b");
    assert_eq!(node.text_content(), "ab");
}

#[test]
fn test_comments_and_doctype_are_dropped() {
    let nodes = parse_fragment("<!DOCTYPE html><!-- note --><p>x</p>").unwrap();
    assert_eq!(nodes.len(), 1);
    assert_eq!(nodes[0].outer_html(), "<p>x</p>");
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let node = parse_one(r#"<DIV Data-Element="Body"></DIV>"#);
    assert_eq!(node.outer_html(), r#"<div data-element="Body"></div>"#);
}

#[test]
fn test_invalid_attribute() {
    assert_eq!(
        parse_fragment(r#"<div "oops">"#).unwrap_err(),
        ParseError::InvalidAttribute { offset: 5 }
    );
}
