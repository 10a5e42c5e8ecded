//! Component configuration errors

/// Defects in how a component was configured or called.
///
/// These are raised immediately and never retried.
#[derive(Debug, thiserror::Error)]
pub enum ComponentError {
    /// `sort` was asked for a field no column describes.
    #[error("Unknown column: {field}")]
    UnknownColumn { field: String },

    /// The column exists but is not marked sortable.
    #[error("Column is not sortable: {field}")]
    NotSortable { field: String },

    /// More than one column without an id.
    #[error("At most one decorative column is allowed, found {count}")]
    MultipleDecorativeColumns { count: usize },

    /// The template did not produce a root element.
    #[error("Template produced no element")]
    EmptyTemplate,

    /// A sub-element the component relies on is not in its template.
    #[error("Missing sub-element: {name}")]
    MissingSubElement { name: String },

    /// The template is not well-formed markup.
    #[error("Markup error: {0}")]
    Markup(#[from] htmldom::ParseError),
}

impl ComponentError {
    pub fn unknown_column(field: impl Into<String>) -> Self {
        Self::UnknownColumn {
            field: field.into(),
        }
    }

    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingSubElement { name: name.into() }
    }
}
