//! A forgiving markup parser.
//!
//! Handles the subset of HTML that templates produce: elements, quoted and
//! bare attributes, void elements, `/>` self-closing tags, comments, and
//! character references. Unknown end tags are ignored and unclosed elements
//! are closed at the end of input. Only lexical errors (a tag, comment or
//! quoted value that never ends) are reported.

use crate::element::Node;
use crate::error::ParseError;
use crate::serialize::is_void;

/// Elements whose content is taken verbatim up to the matching end tag.
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// Parse a markup fragment into detached top-level nodes.
pub fn parse_fragment(input: &str) -> Result<Vec<Node>, ParseError> {
    let mut parser = Parser {
        input,
        pos: 0,
        root: Node::element("template"),
        stack: Vec::new(),
    };
    parser.run()?;

    let nodes = parser.root.children();
    parser.root.clear_children();
    Ok(nodes)
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
    root: Node,
    // Open elements, innermost last. `root` is implicit at the bottom.
    stack: Vec<Node>,
}

impl<'a> Parser<'a> {
    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn current(&self) -> &Node {
        self.stack.last().unwrap_or(&self.root)
    }

    fn run(&mut self) -> Result<(), ParseError> {
        while self.pos < self.input.len() {
            let rest = self.rest();
            if rest.starts_with("<!--") {
                self.comment()?;
            } else if rest.starts_with("</") {
                self.end_tag()?;
            } else if rest.starts_with("<!") || rest.starts_with("<?") {
                self.declaration()?;
            } else if rest.starts_with('<') && rest[1..].starts_with(|c: char| c.is_ascii_alphabetic())
            {
                self.start_tag()?;
            } else {
                self.text();
            }
        }
        Ok(())
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn comment(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.rest()[4..].find("-->") {
            Some(end) => {
                self.pos += 4 + end + 3;
                Ok(())
            }
            None => Err(ParseError::UnterminatedComment { offset: start }),
        }
    }

    // <!DOCTYPE ...> and <?...?> carry nothing we keep.
    fn declaration(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        match self.rest().find('>') {
            Some(end) => {
                self.pos += end + 1;
                Ok(())
            }
            None => Err(ParseError::UnterminatedTag { offset: start }),
        }
    }

    fn end_tag(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        let Some(end) = self.rest().find('>') else {
            return Err(ParseError::UnterminatedTag { offset: start });
        };
        let name = self.rest()[2..end].trim().to_ascii_lowercase();
        self.pos += end + 1;

        if let Some(depth) = self
            .stack
            .iter()
            .rposition(|open| open.tag_name().as_deref() == Some(name.as_str()))
        {
            self.stack.truncate(depth);
        }
        Ok(())
    }

    fn start_tag(&mut self) -> Result<(), ParseError> {
        let start = self.pos;
        self.pos += 1;
        let name = self
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':'))
            .to_ascii_lowercase();
        let element = Node::element(name.as_str());

        let mut self_closing = false;
        loop {
            self.skip_whitespace();
            let rest = self.rest();
            if rest.is_empty() {
                return Err(ParseError::UnterminatedTag { offset: start });
            }
            if rest.starts_with("/>") {
                self.pos += 2;
                self_closing = true;
                break;
            }
            if rest.starts_with('>') {
                self.pos += 1;
                break;
            }
            if rest.starts_with('/') {
                self.pos += 1;
                continue;
            }

            let attr_start = self.pos;
            let attr_name = self.take_while(|c| {
                !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '"' | '\'' | '<')
            });
            if attr_name.is_empty() {
                return Err(ParseError::InvalidAttribute { offset: attr_start });
            }
            self.skip_whitespace();
            let value = if self.rest().starts_with('=') {
                self.pos += 1;
                self.skip_whitespace();
                self.attribute_value(attr_start)?
            } else {
                String::new()
            };
            // First occurrence wins, as in HTML.
            if !element.has_attribute(attr_name) {
                element.set_attribute(attr_name, value);
            }
        }

        self.current().append_child(&element);
        if self_closing || is_void(&name) {
            return Ok(());
        }
        if RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_text(&element, &name);
            return Ok(());
        }
        self.stack.push(element);
        Ok(())
    }

    fn attribute_value(&mut self, attr_start: usize) -> Result<String, ParseError> {
        let rest = self.rest();
        match rest.chars().next() {
            Some(quote @ ('"' | '\'')) => {
                let Some(end) = rest[1..].find(quote) else {
                    return Err(ParseError::UnterminatedAttribute { offset: attr_start });
                };
                self.pos += end + 2;
                Ok(decode_entities(&rest[1..end + 1]))
            }
            _ => {
                let raw = self.take_while(|c| !c.is_whitespace() && c != '>');
                Ok(decode_entities(raw))
            }
        }
    }

    // Content up to `</name`, undecoded. The end tag itself is consumed by
    // the main loop.
    fn raw_text(&mut self, element: &Node, name: &str) {
        let rest = self.rest();
        let closing = format!("</{name}");
        let end = rest
            .to_ascii_lowercase()
            .find(&closing)
            .unwrap_or(rest.len());
        if end > 0 {
            element.append_child(&Node::text(&rest[..end]));
        }
        self.pos += end;
    }

    fn text(&mut self) {
        let rest = self.rest();
        // A '<' that opens nothing is literal; skip past it before searching.
        let first = rest.chars().next().map_or(1, char::len_utf8);
        let end = rest[first..].find('<').map_or(rest.len(), |i| i + first);
        self.pos += end;
        self.current()
            .append_child(&Node::text(decode_entities(&rest[..end])));
    }
}

/// Decode named and numeric character references. Unknown references are
/// kept literally.
pub fn decode_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }

    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];
        let decoded = rest
            .find(';')
            .filter(|&semi| semi <= 10)
            .and_then(|semi| decode_entity(&rest[1..semi]).map(|c| (c, semi)));
        match decoded {
            Some((c, semi)) => {
                out.push(c);
                rest = &rest[semi + 1..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some('\u{a0}'),
        _ => {
            let number = name.strip_prefix('#')?;
            let code = match number.strip_prefix(['x', 'X']) {
                Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                None => number.parse().ok()?,
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;span&gt;"), "<span>");
        assert_eq!(decode_entities("&#39;&#x41;"), "'A");
        assert_eq!(decode_entities("AT&T"), "AT&T");
        assert_eq!(decode_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_literal_less_than_is_text() {
        let nodes = parse_fragment("1 < 2").unwrap();
        let text: String = nodes.iter().map(Node::text_content).collect();
        assert_eq!(text, "1 < 2");
    }

    #[test]
    fn test_raw_text_element() {
        let nodes = parse_fragment("<style>a > b { }</style><p>x</p>").unwrap();
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0].text_content(), "a > b { }");
        assert_eq!(nodes[1].tag_name().as_deref(), Some("p"));
    }

    #[test]
    fn test_lexical_errors() {
        assert_eq!(
            parse_fragment("<div class=\"x").unwrap_err(),
            ParseError::UnterminatedAttribute { offset: 5 }
        );
        assert_eq!(
            parse_fragment("<p>hi<!-- never").unwrap_err(),
            ParseError::UnterminatedComment { offset: 5 }
        );
        assert_eq!(
            parse_fragment("<div").unwrap_err(),
            ParseError::UnterminatedTag { offset: 0 }
        );
    }
}
