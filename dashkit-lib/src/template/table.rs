//! Sortable table markup.

use super::{escape_html, truthy, value_text};
use crate::table::{ColumnDescriptor, Row};

const EMPTY_CELL: &str = r#"<div class="sortable-table__cell"></div>"#;

pub fn header_cell(column: &ColumnDescriptor) -> String {
    let mut attrs = String::new();
    if let Some(id) = &column.id {
        attrs.push_str(&format!(r#" data-id="{}""#, escape_html(id)));
    }
    attrs.push_str(&format!(r#" data-sortable="{}""#, column.sortable));
    if column.sortable {
        attrs.push_str(r#" data-order="""#);
    }

    let arrow = if column.sortable {
        r#"<span data-element="arrow" class="sortable-table__sort-arrow"><span class="sort-arrow"></span></span>"#
    } else {
        ""
    };

    format!(
        r#"<div class="sortable-table__cell"{attrs}><span>{}</span>{arrow}</div>"#,
        escape_html(&column.title)
    )
}

pub fn header_cells(columns: &[ColumnDescriptor]) -> String {
    columns.iter().map(header_cell).collect()
}

/// One cell per column, in column order.
pub fn row_cells(columns: &[ColumnDescriptor], row: &Row) -> String {
    columns.iter().map(|column| cell(column, row)).collect()
}

fn cell(column: &ColumnDescriptor, row: &Row) -> String {
    let Some(id) = column.id.as_deref() else {
        return EMPTY_CELL.to_string();
    };
    if let Some(template) = &column.template {
        return template(row);
    }
    match id {
        "images" => EMPTY_CELL.to_string(),
        "status" => {
            let label = if truthy(row.get(id)) { "Enabled" } else { "Disabled" };
            format!(r#"<div class="sortable-table__cell">{label}</div>"#)
        }
        _ => format!(
            r#"<div class="sortable-table__cell">{}</div>"#,
            escape_html(&value_text(row.get(id)))
        ),
    }
}

/// A body row linking to `{row_link}{id}`.
pub fn body_row(columns: &[ColumnDescriptor], row: &Row, row_link: &str) -> String {
    let id = escape_html(&value_text(row.get("id")));
    format!(
        r#"<a href="{}{id}" class="sortable-table__row" data-row-id="{id}">{}</a>"#,
        escape_html(row_link),
        row_cells(columns, row)
    )
}

pub fn body_rows(columns: &[ColumnDescriptor], rows: &[Row], row_link: &str) -> String {
    rows.iter()
        .map(|row| body_row(columns, row, row_link))
        .collect()
}

/// The whole table, with `productsContainer` as its root.
pub fn table(columns: &[ColumnDescriptor], rows: &[Row], row_link: &str) -> String {
    format!(
        concat!(
            r#"<div data-element="productsContainer" class="products-list__container">"#,
            r#"<div class="sortable-table">"#,
            r#"<div data-element="header" class="sortable-table__header sortable-table__row">{}</div>"#,
            r#"<div data-element="body" class="sortable-table__body">{}</div>"#,
            r#"<div data-element="loading" class="loading-line sortable-table__loading-line"></div>"#,
            r#"<div data-element="emptyPlaceholder" class="sortable-table__empty-placeholder">"#,
            r#"<div><p>No products satisfies your filter criteria</p>"#,
            r#"<button type="button" class="button-primary-outline">Reset all filters</button></div>"#,
            r#"</div>"#,
            r#"</div>"#,
            r#"</div>"#,
        ),
        header_cells(columns),
        body_rows(columns, rows, row_link)
    )
}
