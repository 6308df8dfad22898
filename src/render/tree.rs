//! Presentation tree and its HTML serialization.

use super::style::NodeKind;

/// Elements written without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input"];

/// A node of the rendered presentation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentationNode {
    Element(Element),
    /// Text, escaped on output
    Text(String),
    /// Markup passed through verbatim (raw HTML, highlighted code)
    Raw(String),
}

/// A styled HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Node kind the element was produced for
    pub kind: NodeKind,
    pub tag: &'static str,
    pub class: String,
    pub attrs: Vec<(&'static str, String)>,
    pub children: Vec<PresentationNode>,
}

impl Element {
    pub fn new(kind: NodeKind, tag: &'static str, class: impl Into<String>) -> Self {
        Self {
            kind,
            tag,
            class: class.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<PresentationNode>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn push(&mut self, child: impl Into<PresentationNode>) {
        self.children.push(child.into());
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    fn is_void(&self) -> bool {
        VOID_ELEMENTS.contains(&self.tag)
    }
}

impl From<Element> for PresentationNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl PresentationNode {
    /// Concatenated text of this node and its descendants, raw markup excluded.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(text),
            Self::Raw(_) => {}
            Self::Element(element) => {
                for child in &element.children {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Depth-first search for elements of `kind`.
    pub fn find_all(&self, kind: NodeKind) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_kind(kind, &mut found);
        found
    }

    fn collect_kind<'a>(&'a self, kind: NodeKind, found: &mut Vec<&'a Element>) {
        if let Self::Element(element) = self {
            if element.kind == kind {
                found.push(element);
            }
            for child in &element.children {
                child.collect_kind(kind, found);
            }
        }
    }

    /// Append this node's HTML to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::Raw(html) => out.push_str(html),
            Self::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if !element.class.is_empty() {
                    out.push_str(" class=\"");
                    out.push_str(&escape_html(&element.class));
                    out.push('"');
                }
                for (name, value) in &element.attrs {
                    out.push(' ');
                    out.push_str(name);
                    if !value.is_empty() {
                        out.push_str("=\"");
                        out.push_str(&escape_html(value));
                        out.push('"');
                    }
                }
                out.push('>');
                if element.is_void() {
                    return;
                }
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str("</");
                out.push_str(element.tag);
                out.push('>');
            }
        }
    }
}

/// Serialize a sequence of nodes to HTML.
pub fn nodes_to_html(nodes: &[PresentationNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        node.write_html(&mut out);
    }
    out
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
