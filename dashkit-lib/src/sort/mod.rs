//! Ordering of strings, rows and table cells.
//!
//! Two comparison kinds exist. [`SortKind::String`] uses a locale-style
//! collation where case and accents only break ties and uppercase sorts first.
//! [`SortKind::Number`] compares the trimmed text as a number.
//!
//! All sorts are stable, so equal keys keep their previous relative order and
//! sorting an already sorted sequence moves nothing.
//!
//! # Example
//!
//! ```
//! use dashkit_lib::sort::{sort_strings, sort_strings_by, Direction};
//!
//! assert_eq!(
//!     sort_strings(["Hello", "apple", "Banana"], "asc"),
//!     ["apple", "Banana", "Hello"]
//! );
//! assert_eq!(sort_strings_by(["b", "a"], Direction::Desc), ["b", "a"]);
//! ```

pub mod collate;
mod compare;

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ComponentError;
use crate::table::{ColumnDescriptor, Row};
use crate::template::value_text;

pub use compare::{coerce_number, compare_numeric};

/// Sort direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Ascending order (A-Z, 0-9).
    #[default]
    Asc,
    /// Descending order (Z-A, 9-0).
    Desc,
}

impl Direction {
    /// Parse a direction name. Exactly `"desc"` is descending; anything
    /// else, `"DESC"` included, falls back to ascending.
    pub fn parse_lenient(value: &str) -> Self {
        if value == "desc" {
            Self::Desc
        } else {
            Self::Asc
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

impl From<&str> for Direction {
    fn from(value: &str) -> Self {
        Self::parse_lenient(value)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How cell text is compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKind {
    #[default]
    String,
    Number,
}

impl SortKind {
    /// Compare two texts ascending.
    pub fn compare(self, a: &str, b: &str) -> Ordering {
        match self {
            Self::String => collate::compare(a, b),
            Self::Number => compare_numeric(a, b),
        }
    }
}

/// The field a table is currently sorted by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortState {
    pub field: String,
    pub direction: Direction,
}

impl SortState {
    pub fn new(field: impl Into<String>, direction: Direction) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }
}

/// A fully resolved comparator for one table column.
///
/// `position` is the column's 1-based position among all columns, which is
/// also the `nth-child` position of its cell within a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortConfig {
    pub kind: SortKind,
    pub position: usize,
    pub direction: Direction,
}

impl SortConfig {
    /// Resolve the comparator for `field` among `columns`.
    ///
    /// Fails for a field no column describes and for a column that is not
    /// sortable.
    pub fn resolve(
        columns: &[ColumnDescriptor],
        field: &str,
        direction: Direction,
    ) -> Result<Self, ComponentError> {
        let index = columns
            .iter()
            .position(|c| c.id.as_deref() == Some(field))
            .ok_or_else(|| ComponentError::unknown_column(field))?;
        let column = &columns[index];
        if !column.sortable {
            return Err(ComponentError::NotSortable {
                field: field.to_string(),
            });
        }
        Ok(Self {
            kind: column.sort_type,
            position: index + 1,
            direction,
        })
    }

    /// Compare two cell texts. Surrounding whitespace is ignored.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        self.direction.apply(self.kind.compare(a.trim(), b.trim()))
    }
}

/// Return a sorted copy of `items`. `order` is `"asc"` or `"desc"`; other
/// values sort ascending.
pub fn sort_strings<I, S>(items: I, order: &str) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    sort_strings_by(items, Direction::parse_lenient(order))
}

/// Return a sorted copy of `items` in `direction`.
pub fn sort_strings_by<I, S>(items: I, direction: Direction) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    out.sort_by(|a, b| direction.apply(collate::compare(a, b)));
    out
}

/// Sort rows in place by the text of their `field` value.
///
/// `field` is checked against `columns` the same way
/// [`SortableTable::sort`](crate::SortableTable::sort) checks it, and the rows
/// are left untouched when it is rejected.
pub fn sort_rows(
    rows: &mut [Row],
    columns: &[ColumnDescriptor],
    field: &str,
    direction: Direction,
) -> Result<(), ComponentError> {
    let config = SortConfig::resolve(columns, field, direction)?;
    rows.sort_by(|a, b| config.compare(&value_text(a.get(field)), &value_text(b.get(field))));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lenient() {
        assert_eq!(Direction::parse_lenient("asc"), Direction::Asc);
        assert_eq!(Direction::parse_lenient("desc"), Direction::Desc);
        assert_eq!(Direction::parse_lenient("DESC"), Direction::Asc);
        assert_eq!(Direction::parse_lenient("Desc"), Direction::Asc);
        assert_eq!(Direction::parse_lenient("sideways"), Direction::Asc);
        assert_eq!(Direction::parse_lenient(""), Direction::Asc);
    }

    #[test]
    fn test_direction_serde() {
        let d: Direction = serde_json::from_str("\"desc\"").unwrap();
        assert_eq!(d, Direction::Desc);
        assert_eq!(serde_json::to_string(&SortKind::Number).unwrap(), "\"number\"");
    }

    #[test]
    fn test_sort_strings_default_example() {
        assert_eq!(
            sort_strings(["Hello", "apple", "Banana"], "asc"),
            ["apple", "Banana", "Hello"]
        );
        assert_eq!(
            sort_strings(["Hello", "apple", "Banana"], "desc"),
            ["Hello", "Banana", "apple"]
        );
    }

    #[test]
    fn test_sort_strings_unknown_order_is_asc() {
        assert_eq!(sort_strings(["b", "a", "c"], "up"), ["a", "b", "c"]);
    }

    #[test]
    fn test_sort_strings_does_not_mutate_input() {
        let input = vec!["b".to_string(), "a".to_string()];
        let sorted = sort_strings(&input, "asc");
        assert_eq!(input, ["b", "a"]);
        assert_eq!(sorted, ["a", "b"]);
    }

    #[test]
    fn test_sort_config_number() {
        let config = SortConfig {
            kind: SortKind::Number,
            position: 2,
            direction: Direction::Asc,
        };
        let mut values = vec!["10", "2", " 33 "];
        values.sort_by(|a, b| config.compare(a, b));
        assert_eq!(values, ["2", "10", " 33 "]);
    }
}
