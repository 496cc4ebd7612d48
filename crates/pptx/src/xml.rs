//! A generic attributed XML tree.
//!
//! Slide XML is loaded into [`XmlNode`]s without any schema validation:
//! producers differ in which elements and attributes they emit, so every
//! lookup is allowed to come back empty. Element lookups use local names,
//! so `a:t` and `t` are the same element. Nesting deeper than [`MAX_DEPTH`]
//! is rejected, which keeps every tree shallow enough to walk and drop.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fmt;

/// Deepest element nesting accepted before a document is treated as malformed.
pub const MAX_DEPTH: usize = 256;

/// An element with its attributes, child elements, and character data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlNode {
    /// Local name, namespace prefix stripped.
    pub name: String,

    /// Attributes as `(qualified name, unescaped value)` in document order.
    pub attributes: Vec<(String, String)>,

    /// Child elements in document order.
    pub children: Vec<XmlNode>,

    /// Character data directly inside this element.
    pub text: String,
}

/// The nodes a document yielded before it turned out to be malformed.
#[derive(Debug, Clone)]
pub struct PartialTree {
    /// Root element as far as it was built, if any element was opened.
    pub root: Option<XmlNode>,

    /// Description of the parse failure.
    pub message: String,
}

impl fmt::Display for PartialTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Zero, one, or several matching nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeSet<'a> {
    Absent,
    Single(&'a XmlNode),
    Many(Vec<&'a XmlNode>),
}

impl<'a> NodeSet<'a> {
    fn from_vec(mut nodes: Vec<&'a XmlNode>) -> Self {
        match nodes.len() {
            0 => NodeSet::Absent,
            1 => NodeSet::Single(nodes.remove(0)),
            _ => NodeSet::Many(nodes),
        }
    }

    /// The matches as a slice, whatever the variant.
    pub fn as_slice(&self) -> &[&'a XmlNode] {
        match self {
            NodeSet::Absent => &[],
            NodeSet::Single(node) => std::slice::from_ref(node),
            NodeSet::Many(nodes) => nodes.as_slice(),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a XmlNode> + '_ {
        self.as_slice().iter().copied()
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, NodeSet::Absent)
    }
}

impl XmlNode {
    /// Parse a document and return its root element.
    pub fn parse(xml: &str) -> Result<XmlNode, PartialTree> {
        let mut reader = Reader::from_str(xml);

        // Bottom is a synthetic document node collecting the root element.
        let mut stack: Vec<XmlNode> = vec![XmlNode::default()];

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    // The stack holds the synthetic document node plus one node per open element.
                    if stack.len() > MAX_DEPTH {
                        return Err(partial(
                            stack,
                            format!(
                                "Element nesting exceeds {} levels at position {}",
                                MAX_DEPTH,
                                reader.buffer_position()
                            ),
                        ));
                    }
                    stack.push(XmlNode::from_start(e));
                }
                Ok(Event::Empty(ref e)) => {
                    let node = XmlNode::from_start(e);
                    attach(&mut stack, node);
                }
                Ok(Event::End(_)) => {
                    if stack.len() > 1 {
                        if let Some(node) = stack.pop() {
                            attach(&mut stack, node);
                        }
                    }
                }
                Ok(Event::Text(ref e)) => match e.unescape() {
                    Ok(text) => push_text(&mut stack, &text),
                    Err(err) => {
                        // Unknown entities are kept verbatim.
                        log::debug!("Keeping raw character data: {}", err);
                        push_text(&mut stack, &String::from_utf8_lossy(e));
                    }
                },
                Ok(Event::CData(e)) => {
                    let bytes = e.into_inner();
                    push_text(&mut stack, &String::from_utf8_lossy(&bytes));
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(partial(
                        stack,
                        format!(
                            "XML error at position {}: {}",
                            reader.buffer_position(),
                            e
                        ),
                    ))
                }
                _ => {}
            }
        }

        if stack.len() > 1 {
            return Err(partial(stack, "Unexpected end of document".to_string()));
        }

        stack
            .pop()
            .and_then(|document| document.children.into_iter().next())
            .ok_or_else(|| PartialTree {
                root: None,
                message: "Document has no root element".to_string(),
            })
    }

    fn from_start(e: &BytesStart<'_>) -> Self {
        let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

        let attributes = e
            .attributes()
            .flatten()
            .map(|attr| {
                let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
                let value = match attr.unescape_value() {
                    Ok(value) => value.into_owned(),
                    Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
                };
                (key, value)
            })
            .collect();

        Self {
            name,
            attributes,
            ..Self::default()
        }
    }

    /// Child elements with the given local name.
    pub fn get(&self, name: &str) -> NodeSet<'_> {
        NodeSet::from_vec(self.children.iter().filter(|c| c.name == name).collect())
    }

    /// First child element with the given local name.
    pub fn child(&self, name: &str) -> Option<&XmlNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Character data directly inside this element.
    pub fn text(&self) -> &str {
        &self.text
    }
}

fn attach(stack: &mut [XmlNode], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn push_text(stack: &mut [XmlNode], text: &str) {
    if let Some(node) = stack.last_mut() {
        node.text.push_str(text);
    }
}

/// Close every open element and wrap what was built.
fn partial(mut stack: Vec<XmlNode>, message: String) -> PartialTree {
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            attach(&mut stack, node);
        }
    }

    PartialTree {
        root: stack
            .pop()
            .and_then(|document| document.children.into_iter().next()),
        message,
    }
}
