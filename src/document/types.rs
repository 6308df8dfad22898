//! Core document types.

use serde::{Deserialize, Serialize};

/// A logical section of a markdown document.
///
/// Sections are delimited by level 1 and level 2 headings and never nest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Heading text, or a positional placeholder such as `Section 3`
    pub title: String,
    /// Body text with surrounding whitespace trimmed
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Create a section with a positional placeholder title.
    ///
    /// `position` is 1-based.
    pub fn untitled(position: usize, content: impl Into<String>) -> Self {
        Self::new(placeholder_title(position), content)
    }
}

/// A fenced code block found in raw markdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeBlock {
    /// Language tag from the opening fence, `text` when absent
    pub language: String,
    /// Fence interior with surrounding whitespace trimmed
    pub code: String,
}

impl CodeBlock {
    /// Language used when the opening fence carries no tag.
    pub const DEFAULT_LANGUAGE: &'static str = "text";

    pub fn new(language: Option<&str>, code: &str) -> Self {
        Self {
            language: language
                .filter(|lang| !lang.is_empty())
                .unwrap_or(Self::DEFAULT_LANGUAGE)
                .to_string(),
            code: code.trim().to_string(),
        }
    }
}

pub(crate) fn placeholder_title(position: usize) -> String {
    format!("Section {position}")
}

/// Turn heading text into an anchor slug (`Getting Started!` -> `getting-started`).
pub fn normalize_anchor(s: &str) -> String {
    let mut out = String::new();
    let mut last_dash = false;
    for ch in s.chars() {
        let lower = ch.to_ascii_lowercase();
        if lower.is_ascii_alphanumeric() {
            out.push(lower);
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    out.trim_matches('-').to_string()
}
