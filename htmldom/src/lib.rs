pub mod element;
pub mod error;
pub mod parse;
pub mod select;
pub mod serialize;

pub use element::{Content, Node};
pub use error::ParseError;
pub use parse::parse_fragment;
pub use select::Selector;
