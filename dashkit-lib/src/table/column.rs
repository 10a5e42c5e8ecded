use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sort::SortKind;

/// A table record. Keys keep their insertion order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Renders the cell for one row. Must return exactly one cell element so the
/// column positions stay aligned.
pub type CellTemplate = Arc<dyn Fn(&Row) -> String + Send + Sync>;

/// Describes one table column.
///
/// A column without an `id` is decorative: it renders an empty cell and can
/// never be sorted. A table allows at most one.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sortable: bool,
    #[serde(default)]
    pub sort_type: SortKind,
    #[serde(skip)]
    pub template: Option<CellTemplate>,
}

impl ColumnDescriptor {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn decorative(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Mark the column sortable with the given comparison kind.
    pub fn sortable(mut self, kind: SortKind) -> Self {
        self.sortable = true;
        self.sort_type = kind;
        self
    }

    /// Render cells with `template` instead of the built-in rules.
    pub fn template(mut self, template: impl Fn(&Row) -> String + Send + Sync + 'static) -> Self {
        self.template = Some(Arc::new(template));
        self
    }

    pub fn is_decorative(&self) -> bool {
        self.id.is_none()
    }
}

impl fmt::Debug for ColumnDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnDescriptor")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("sortable", &self.sortable)
            .field("sort_type", &self.sort_type)
            .field("template", &self.template.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
