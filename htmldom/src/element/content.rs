/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    /// An element with a lowercase tag name and its attributes in source order.
    Element {
        tag: String,
        attrs: Vec<(String, String)>,
    },
    /// A run of character data, stored decoded.
    Text(String),
}

impl Content {
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Element { .. })
    }
}
