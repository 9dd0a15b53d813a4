//! Minimal DOM over quick-xml for the game's Infos files.
//!
//! The reference files are small (low thousands of entries), so buffering a
//! whole document into an element tree keeps every caller simple. Field
//! accessors mirror the shapes used throughout the Infos schema: scalar
//! children, `<Pair><zIndex>/<iValue|bValue></Pair>` lists and `<zValue>`
//! lists.

use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

#[derive(Debug)]
pub enum XmlError {
    Io(io::Error),
    Syntax(String),
}

impl fmt::Display for XmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "xml read error: {err}"),
            Self::Syntax(msg) => write!(f, "xml parse error: {msg}"),
        }
    }
}

impl std::error::Error for XmlError {}

/// One parsed element: tag name, concatenated text content, child elements
/// in document order.
#[derive(Debug, Clone, Default)]
pub struct XmlElement {
    pub name: String,
    pub text: String,
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// First child with the given tag name.
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.name == name)
    }

    /// All children with the given tag name, in document order.
    pub fn children_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.name == name)
    }

    /// Trimmed text of a child element; None when absent or empty.
    pub fn child_text(&self, name: &str) -> Option<&str> {
        let text = self.child(name)?.text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Integer content of a child element; None when absent or unparseable.
    pub fn child_int(&self, name: &str) -> Option<i64> {
        self.child_text(name)?.parse().ok()
    }

    /// Boolean child encoded as 0/1. Absent means false.
    pub fn child_bool(&self, name: &str) -> bool {
        self.child_text(name) == Some("1")
    }
}

/// Parse a document from a string and return its root element.
pub fn parse_str(input: &str) -> Result<XmlElement, XmlError> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    // Synthetic root so documents with leading comments parse uniformly.
    let mut stack: Vec<XmlElement> = vec![XmlElement {
        name: String::new(),
        ..Default::default()
    }];

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                stack.push(XmlElement {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ..Default::default()
                });
            }
            Ok(Event::Empty(ref e)) => {
                let child = XmlElement {
                    name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                    ..Default::default()
                };
                if let Some(parent) = stack.last_mut() {
                    parent.children.push(child);
                }
            }
            Ok(Event::Text(ref e)) => {
                if let Some(top) = stack.last_mut() {
                    top.text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(_)) => {
                let done = stack.pop().ok_or_else(|| {
                    XmlError::Syntax("unbalanced closing tag".to_string())
                })?;
                match stack.last_mut() {
                    Some(parent) => parent.children.push(done),
                    None => return Err(XmlError::Syntax("unbalanced closing tag".to_string())),
                }
            }
            Ok(Event::Eof) => break,
            Err(err) => return Err(XmlError::Syntax(err.to_string())),
            _ => {}
        }
    }

    let mut synthetic = stack
        .pop()
        .ok_or_else(|| XmlError::Syntax("empty document".to_string()))?;
    if !stack.is_empty() {
        return Err(XmlError::Syntax("unclosed element".to_string()));
    }
    if synthetic.children.len() != 1 {
        return Err(XmlError::Syntax(format!(
            "expected one root element, found {}",
            synthetic.children.len()
        )));
    }
    Ok(synthetic.children.remove(0))
}

/// Parse an XML file and return its root element.
pub fn parse_file(path: &Path) -> Result<XmlElement, XmlError> {
    let raw = fs::read_to_string(path).map_err(XmlError::Io)?;
    parse_str(&raw)
}

/// `<Pair><zIndex>ID</zIndex><iValue>N</iValue></Pair>` list. Pairs with an
/// empty index are dropped; a missing value defaults to zero.
pub fn pair_list(element: Option<&XmlElement>) -> Vec<(String, i64)> {
    let Some(element) = element else {
        return Vec::new();
    };
    element
        .children_named("Pair")
        .filter_map(|pair| {
            let index = pair.child_text("zIndex")?;
            let value = pair.child_int("iValue").unwrap_or(0);
            Some((index.to_string(), value))
        })
        .collect()
}

/// `<Pair><zIndex>ID</zIndex><bValue>0|1</bValue></Pair>` list, keeping only
/// the indices whose value is true.
pub fn true_pair_list(element: Option<&XmlElement>) -> Vec<String> {
    let Some(element) = element else {
        return Vec::new();
    };
    element
        .children_named("Pair")
        .filter_map(|pair| {
            let index = pair.child_text("zIndex")?;
            if pair.child_bool("bValue") {
                Some(index.to_string())
            } else {
                None
            }
        })
        .collect()
}

/// `<zValue>ID</zValue>` list.
pub fn value_list(element: Option<&XmlElement>) -> Vec<String> {
    let Some(element) = element else {
        return Vec::new();
    };
    element
        .children_named("zValue")
        .filter_map(|v| {
            let text = v.text.trim();
            if text.is_empty() {
                None
            } else {
                Some(text.to_string())
            }
        })
        .collect()
}
