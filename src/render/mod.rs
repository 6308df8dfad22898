//! Markdown rendering to styled HTML.
//!
//! Markdown is parsed with comrak (CommonMark plus GFM tables,
//! strikethrough, autolinks and task lists; raw HTML is kept). Each node is
//! classified into a [`NodeKind`] and given the element and classes of the
//! active [`RuleTable`]. Kinds outside the table pass through unstyled.
//!
//! Code nodes are the one conditional case: a code block whose info string
//! names a language renders as a block with a language header bar, anything
//! else renders as an inline code span.

mod mapper;
mod style;
mod tree;

pub use style::{NodeKind, RenderRule, RuleTable, code_language};
pub use tree::{Element, PresentationNode, escape_html, nodes_to_html};

use crate::config::ThemeMode;

/// Rendering switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Which rule table to apply
    pub theme: ThemeMode,
    /// Syntax-highlight code blocks with a known language
    pub highlight: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            highlight: true,
        }
    }
}

/// Render markdown into a presentation tree.
pub fn to_tree(markdown: &str, options: &RenderOptions) -> Vec<PresentationNode> {
    mapper::map_markdown(markdown, options)
}

/// Render markdown into an HTML fragment.
///
/// # Example
///
/// ```
/// use docpress::render::{RenderOptions, to_html};
///
/// let html = to_html("# Hello", &RenderOptions::default());
/// assert!(html.starts_with("<h1 class="));
/// assert!(html.ends_with(">Hello</h1>"));
/// ```
pub fn to_html(markdown: &str, options: &RenderOptions) -> String {
    nodes_to_html(&to_tree(markdown, options))
}
