//! A table whose rows can be reordered by column.
//!
//! # Example
//!
//! ```
//! use dashkit_lib::sort::{Direction, SortKind};
//! use dashkit_lib::table::{ColumnDescriptor, Row, SortableTable};
//! use dashkit_lib::Component;
//!
//! let columns = vec![
//!     ColumnDescriptor::new("title", "Name").sortable(SortKind::String),
//!     ColumnDescriptor::new("price", "Price").sortable(SortKind::Number),
//! ];
//! let rows: Vec<Row> = serde_json::from_str(
//!     r#"[{"id": 1, "title": "b", "price": 10}, {"id": 2, "title": "a", "price": 2}]"#,
//! )
//! .unwrap();
//!
//! let mut table = SortableTable::new(columns, rows).unwrap();
//! table.sort("price", Direction::Asc).unwrap();
//!
//! let body = table.sub_elements().get("body").unwrap();
//! assert_eq!(body.first_element_child().unwrap().data("row-id").as_deref(), Some("2"));
//! ```

mod column;

use htmldom::{Node, Selector};

use crate::component::{Component, Mounted};
use crate::error::ComponentError;
use crate::sort::{Direction, SortConfig, SortState};
use crate::template;

pub use column::{CellTemplate, ColumnDescriptor, Row};

/// Class every cell carries; sorting looks cells up by it.
pub const CELL_CLASS: &str = "sortable-table__cell";

#[derive(Debug, Clone)]
pub struct TableOptions {
    /// Prefix of each row's `href`; the row id is appended.
    pub row_link: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_link: "/products/".to_string(),
        }
    }
}

#[derive(Debug)]
pub struct SortableTable {
    columns: Vec<ColumnDescriptor>,
    rows: Vec<Row>,
    options: TableOptions,
    mounted: Mounted,
    sort_state: Option<SortState>,
}

impl SortableTable {
    pub fn new(columns: Vec<ColumnDescriptor>, rows: Vec<Row>) -> Result<Self, ComponentError> {
        Self::with_options(columns, rows, TableOptions::default())
    }

    pub fn with_options(
        columns: Vec<ColumnDescriptor>,
        rows: Vec<Row>,
        options: TableOptions,
    ) -> Result<Self, ComponentError> {
        let decorative = columns.iter().filter(|c| c.is_decorative()).count();
        if decorative > 1 {
            return Err(ComponentError::MultipleDecorativeColumns { count: decorative });
        }

        let markup = template::table::table(&columns, &rows, &options.row_link);
        let mounted = Mounted::new(&markup)?;
        mounted.sub_elements().require("header")?;
        mounted.sub_elements().require("body")?;
        log::debug!(
            "Rendered table with {} columns and {} rows",
            columns.len(),
            rows.len()
        );

        Ok(Self {
            columns,
            rows,
            options,
            mounted,
            sort_state: None,
        })
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    /// Rows in the order they were supplied. Sorting reorders the rendered
    /// rows only.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn options(&self) -> &TableOptions {
        &self.options
    }

    /// The last successful sort.
    pub fn sort_state(&self) -> Option<&SortState> {
        self.sort_state.as_ref()
    }

    /// Resolve the comparator for `field`.
    pub fn sort_config(&self, field: &str, direction: Direction) -> Result<SortConfig, ComponentError> {
        SortConfig::resolve(&self.columns, field, direction)
    }

    /// Reorder the rendered rows by `field`.
    ///
    /// The sort is stable. Afterwards only the header cell of `field` carries
    /// `data-order`. Unknown and non-sortable fields are rejected before
    /// anything changes. Does nothing once destroyed.
    pub fn sort(&mut self, field: &str, direction: Direction) -> Result<(), ComponentError> {
        if !self.mounted.is_alive() {
            return Ok(());
        }
        let config = self.sort_config(field, direction)?;
        let body = self.mounted.sub_elements().require("body")?.clone();

        let cell = Selector::any().class(CELL_CLASS).nth_child(config.position);
        let mut keyed: Vec<(String, Node)> = body
            .element_children()
            .into_iter()
            .map(|row| {
                let text = row
                    .query_selector(&cell)
                    .map(|cell| cell.text_content())
                    .unwrap_or_default();
                (text, row)
            })
            .collect();
        keyed.sort_by(|(a, _), (b, _)| config.compare(a, b));
        body.append(keyed.into_iter().map(|(_, row)| row));

        self.show_order(field, direction);
        self.sort_state = Some(SortState::new(field, direction));
        log::debug!("Sorted table by {field} {direction}");
        Ok(())
    }

    // `data-order` mirrors `sort_state` and is never read back.
    fn show_order(&self, field: &str, direction: Direction) {
        let Some(header) = self.mounted.sub_elements().header() else {
            return;
        };
        for cell in header.columns.values() {
            cell.remove_attribute("data-order");
        }
        if let Some(cell) = header.columns.get(field) {
            cell.set_attribute("data-order", direction.as_str());
        }
    }

    /// Replace the rows, re-render the body and re-apply the current sort.
    pub fn update(&mut self, rows: Vec<Row>) -> Result<(), ComponentError> {
        if !self.mounted.is_alive() {
            return Ok(());
        }
        let body = self.mounted.sub_elements().require("body")?;
        body.set_inner_html(&template::table::body_rows(
            &self.columns,
            &rows,
            &self.options.row_link,
        ))?;
        self.rows = rows;

        if let Some(state) = self.sort_state.clone() {
            self.sort(&state.field, state.direction)?;
        }
        Ok(())
    }
}

impl Component for SortableTable {
    fn mounted(&self) -> &Mounted {
        &self.mounted
    }

    fn mounted_mut(&mut self) -> &mut Mounted {
        &mut self.mounted
    }
}
