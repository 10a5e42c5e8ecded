//! Error types

mod component;
mod fetch;

pub use component::*;
pub use fetch::*;

/// Any error produced by this crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}
