use dashkit_lib::sort::{sort_rows, Direction, SortKind, SortState};
use dashkit_lib::{ColumnDescriptor, Component, ComponentError, Row, SortableTable, TableOptions};
use htmldom::{Node, Selector};
use serde_json::json;

fn rows(value: serde_json::Value) -> Vec<Row> {
    serde_json::from_value(value).unwrap()
}

fn columns() -> Vec<ColumnDescriptor> {
    vec![
        ColumnDescriptor::new("images", "Image")
            .template(|_| r#"<div class="sortable-table__cell"><img></div>"#.to_string()),
        ColumnDescriptor::new("title", "Name").sortable(SortKind::String),
        ColumnDescriptor::new("quantity", "Quantity").sortable(SortKind::Number),
        ColumnDescriptor::new("price", "Price").sortable(SortKind::Number),
        ColumnDescriptor::new("status", "Status"),
    ]
}

fn products() -> Vec<Row> {
    rows(json!([
        {"id": "soup", "title": "soup", "quantity": 10, "price": 3, "status": 1},
        {"id": "Bread", "title": "Bread", "quantity": 2, "price": 1, "status": 0},
        {"id": "apple", "title": "apple", "quantity": 33, "price": 3, "status": 1},
        {"id": "Apple", "title": "Apple", "quantity": 2, "price": 2},
    ]))
}

fn table() -> SortableTable {
    SortableTable::new(columns(), products()).unwrap()
}

fn body(table: &SortableTable) -> Node {
    table.sub_elements().get("body").unwrap().clone()
}

fn row_ids(table: &SortableTable) -> Vec<String> {
    body(table)
        .element_children()
        .iter()
        .filter_map(|row| row.data("row-id"))
        .collect()
}

fn header_orders(table: &SortableTable) -> Vec<(String, String)> {
    let header = table.sub_elements().header().unwrap();
    header
        .columns
        .iter()
        .filter_map(|(id, cell)| cell.data("order").map(|order| (id.clone(), order)))
        .collect()
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_sub_elements() {
    let table = table();
    // The root itself is not indexed, only its descendants.
    assert_eq!(
        table.sub_elements().names(),
        ["body", "emptyPlaceholder", "header", "loading"]
    );
    assert_eq!(
        table.element().unwrap().data("element").as_deref(),
        Some("productsContainer")
    );
    let header = table.sub_elements().header().unwrap();
    assert_eq!(header.columns.len(), 5);
    assert!(table.element().unwrap().parent().is_none());
}

#[test]
fn test_row_markup() {
    let table = table();
    let first = body(&table).first_element_child().unwrap();
    assert_eq!(first.tag_name().as_deref(), Some("a"));
    assert_eq!(first.get_attribute("href").as_deref(), Some("/products/soup"));
    assert_eq!(first.element_children().len(), 5);

    let texts: Vec<String> = first
        .element_children()
        .iter()
        .map(Node::text_content)
        .collect();
    assert_eq!(texts, ["", "soup", "10", "3", "Enabled"]);
}

#[test]
fn test_custom_row_link() {
    let options = TableOptions {
        row_link: "/items/".to_string(),
    };
    let table = SortableTable::with_options(columns(), products(), options).unwrap();
    let first = body(&table).first_element_child().unwrap();
    assert_eq!(first.get_attribute("href").as_deref(), Some("/items/soup"));
}

#[test]
fn test_status_falls_back_to_disabled() {
    let table = table();
    let last = body(&table).element_children().pop().unwrap();
    let status = last.query_selector(&Selector::any().nth_child(5)).unwrap();
    assert_eq!(status.text_content(), "Disabled");
}

#[test]
fn test_rejects_two_decorative_columns() {
    let columns = vec![
        ColumnDescriptor::decorative(""),
        ColumnDescriptor::decorative(""),
        ColumnDescriptor::new("title", "Name"),
    ];
    assert!(matches!(
        SortableTable::new(columns, Vec::new()),
        Err(ComponentError::MultipleDecorativeColumns { count: 2 })
    ));
}

#[test]
fn test_decorative_column_keeps_positions() {
    let columns = vec![
        ColumnDescriptor::decorative(""),
        ColumnDescriptor::new("title", "Name").sortable(SortKind::String),
    ];
    let mut table = SortableTable::new(columns, products()).unwrap();
    table.sort("title", Direction::Asc).unwrap();
    assert_eq!(row_ids(&table), ["Apple", "apple", "Bread", "soup"]);
}

// ============================================================================
// Sorting
// ============================================================================

#[test]
fn test_sort_string_ascending() {
    let mut table = table();
    table.sort("title", Direction::Asc).unwrap();
    assert_eq!(row_ids(&table), ["Apple", "apple", "Bread", "soup"]);
    assert_eq!(header_orders(&table), [("title".to_string(), "asc".to_string())]);
}

#[test]
fn test_sort_string_descending() {
    let mut table = table();
    table.sort("title", Direction::Desc).unwrap();
    assert_eq!(row_ids(&table), ["soup", "Bread", "apple", "Apple"]);
}

#[test]
fn test_sort_number() {
    let mut table = table();
    table.sort("quantity", Direction::Asc).unwrap();
    assert_eq!(row_ids(&table), ["Bread", "Apple", "soup", "apple"]);

    table.sort("quantity", Direction::Desc).unwrap();
    assert_eq!(row_ids(&table), ["apple", "soup", "Bread", "Apple"]);
}

#[test]
fn test_sort_is_stable() {
    let mut table = table();
    // price: soup 3, Bread 1, apple 3, Apple 2
    table.sort("price", Direction::Asc).unwrap();
    assert_eq!(row_ids(&table), ["Bread", "Apple", "soup", "apple"]);

    let before: Vec<Node> = body(&table).element_children();
    table.sort("price", Direction::Asc).unwrap();
    assert_eq!(body(&table).element_children(), before);
}

#[test]
fn test_sort_moves_nodes_without_copying() {
    let mut table = table();
    let before = body(&table).element_children();
    table.sort("title", Direction::Asc).unwrap();
    let after = body(&table).element_children();
    assert_eq!(after.len(), before.len());
    assert!(after.iter().all(|row| before.contains(row)));
}

#[test]
fn test_only_one_header_carries_order() {
    let mut table = table();
    table.sort("title", Direction::Asc).unwrap();
    table.sort("price", Direction::Desc).unwrap();
    assert_eq!(header_orders(&table), [("price".to_string(), "desc".to_string())]);
    assert_eq!(
        table.sort_state(),
        Some(&SortState::new("price", Direction::Desc))
    );
}

#[test]
fn test_unknown_direction_sorts_ascending() {
    let mut table = table();
    table.sort("title", Direction::parse_lenient("sideways")).unwrap();
    assert_eq!(row_ids(&table), ["Apple", "apple", "Bread", "soup"]);
}

#[test]
fn test_unknown_column_changes_nothing() {
    let mut table = table();
    let before = table.element().unwrap().outer_html();
    assert!(matches!(
        table.sort("nope", Direction::Asc),
        Err(ComponentError::UnknownColumn { field }) if field == "nope"
    ));
    assert_eq!(table.element().unwrap().outer_html(), before);
    assert!(table.sort_state().is_none());
}

#[test]
fn test_non_sortable_column() {
    let mut table = table();
    assert!(matches!(
        table.sort("status", Direction::Asc),
        Err(ComponentError::NotSortable { .. })
    ));
}

#[test]
fn test_update_reapplies_sort() {
    let mut table = table();
    table.sort("quantity", Direction::Desc).unwrap();
    table
        .update(rows(json!([
            {"id": "a", "title": "a", "quantity": 1},
            {"id": "b", "title": "b", "quantity": 7},
        ])))
        .unwrap();
    assert_eq!(row_ids(&table), ["b", "a"]);
    assert_eq!(table.rows().len(), 2);
}

#[test]
fn test_sort_rows_on_data() {
    let mut data = products();
    sort_rows(&mut data, &columns(), "title", Direction::Asc).unwrap();
    let ids: Vec<&str> = data.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["Apple", "apple", "Bread", "soup"]);

    sort_rows(&mut data, &columns(), "price", Direction::Desc).unwrap();
    let ids: Vec<&str> = data.iter().map(|r| r["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["apple", "soup", "Apple", "Bread"]);
}

#[test]
fn test_sort_rows_rejects_bad_fields() {
    let mut data = products();
    let before = data.clone();

    assert!(matches!(
        sort_rows(&mut data, &columns(), "nope", Direction::Asc),
        Err(ComponentError::UnknownColumn { field }) if field == "nope"
    ));
    assert!(matches!(
        sort_rows(&mut data, &columns(), "status", Direction::Asc),
        Err(ComponentError::NotSortable { field }) if field == "status"
    ));

    let decorative = vec![ColumnDescriptor::decorative("")];
    assert!(matches!(
        sort_rows(&mut data, &decorative, "", Direction::Asc),
        Err(ComponentError::UnknownColumn { .. })
    ));
    assert_eq!(data, before);
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_remove_and_destroy() {
    let mut table = table();
    let page = Node::element("main");
    page.append_child(table.element().unwrap());

    table.remove();
    assert!(page.children().is_empty());
    assert!(table.element().is_some());

    table.destroy();
    assert!(table.element().is_none());
    assert!(table.sub_elements().is_empty());
}

#[test]
fn test_calls_after_destroy_are_noops() {
    let mut table = table();
    table.destroy();
    assert!(table.sort("title", Direction::Asc).is_ok());
    assert!(table.sort("nope", Direction::Asc).is_ok());
    assert!(table.update(Vec::new()).is_ok());
    table.remove();
    table.destroy();
    assert!(table.sort_state().is_none());
}
