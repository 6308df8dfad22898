//! Structured extraction from raw markdown.
//!
//! This module handles:
//! - Splitting a document into sections on level 1 and 2 headings
//! - Extracting fenced code blocks with their language tags
//!
//! Both operate on raw text with regular expressions; full markdown
//! parsing lives in [`crate::render`].

mod parser;
mod types;

pub use parser::{extract_code_blocks, parse_sections};
pub use types::{CodeBlock, Section, normalize_anchor};

/// File extensions treated as markdown sources.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd"];

/// Returns true if the file extension is a recognized markdown format.
pub fn is_markdown_file(path: &std::path::Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
