//! Indexed-render UI components.
//!
//! Components render an HTML template, mount it into a detached
//! [`htmldom`] tree, index the named sub-elements once, and afterwards only
//! patch those nodes in place:
//!
//! - [`SortableTable`](table::SortableTable) reorders its rows by column.
//! - [`ColumnChart`](chart::ColumnChart) loads a range of values from a
//!   [`DataSource`](source::DataSource) and renders one bar per bucket.
//!
//! The [`sort`] module also carries the standalone string sort used by both.

pub mod chart;
pub mod component;
pub mod error;
pub mod sort;
pub mod source;
pub mod table;
pub mod template;

pub use chart::{ChartData, ChartOptions, ColumnChart, Range};
pub use component::{Component, Mounted, SubElements};
pub use error::{ComponentError, Error, FetchError};
pub use sort::{sort_strings, Direction, SortKind};
pub use source::{DataSource, HttpSource, StaticSource};
pub use table::{ColumnDescriptor, Row, SortableTable, TableOptions};
