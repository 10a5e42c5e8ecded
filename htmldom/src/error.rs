//! Error types

/// Errors produced while parsing markup.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// A tag was opened but never closed with `>`.
    #[error("Unterminated tag at byte {offset}")]
    UnterminatedTag { offset: usize },

    /// A `<!--` comment without a matching `-->`.
    #[error("Unterminated comment at byte {offset}")]
    UnterminatedComment { offset: usize },

    /// A quoted attribute value without its closing quote.
    #[error("Unterminated attribute value at byte {offset}")]
    UnterminatedAttribute { offset: usize },

    /// Something inside a tag that is not an attribute.
    #[error("Invalid attribute at byte {offset}")]
    InvalidAttribute { offset: usize },
}
