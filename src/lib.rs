// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. render::RenderOptions)
    clippy::module_name_repetitions
)]

//! # Docpress
//!
//! A markdown content pipeline for documentation sites.
//!
//! Docpress takes API references and SDK guides written in markdown and:
//! - Loads them by logical path from a startup registry or over HTTP
//! - Splits them into sections for tables of contents
//! - Extracts fenced code blocks for copy-to-clipboard features
//! - Renders them into styled HTML with highlighted code
//!
//! ## Modules
//!
//! - [`content`]: Document registry and loader
//! - [`document`]: Section and code block extraction
//! - [`render`]: Node-kind rule tables and HTML rendering
//! - [`highlight`]: Syntax highlighting
//! - [`config`]: Saved defaults and flag parsing

pub mod config;
pub mod content;
pub mod document;
pub mod highlight;
pub mod render;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::ThemeMode;
    pub use crate::content::{ContentLoader, Fetcher, LoadError, Registry};
    pub use crate::document::{CodeBlock, Section, extract_code_blocks, parse_sections};
    pub use crate::render::{RenderOptions, to_html, to_tree};
}
