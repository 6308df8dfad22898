//! Regex-level structure extraction over raw markdown text.
//!
//! Neither function runs a full markdown parse: sections are cut on heading
//! markers and code blocks are found by scanning for backtick fences.

use std::sync::LazyLock;

use regex::Regex;

use super::types::{CodeBlock, Section};

/// Level 1 or level 2 heading marker at the start of a line.
static SECTION_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^#{1,2}\s").expect("section boundary pattern"));

/// Opening fence with an optional language tag (blanks before it allowed),
/// then the interior up to the nearest closing fence.
static FENCED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[ \t]*([^\s`]+)?[^\n]*\n(.*?)```").expect("fenced code pattern")
});

/// Split markdown into sections on level 1 and level 2 headings.
///
/// Deeper headings stay inside the enclosing section's content. Text before
/// the first heading becomes a section with a placeholder title.
///
/// # Example
///
/// ```
/// use docpress::document::parse_sections;
///
/// let sections = parse_sections("# Intro\nHello\n## Usage\nRun it");
/// assert_eq!(sections.len(), 2);
/// assert_eq!(sections[1].title, "Usage");
/// assert_eq!(sections[1].content, "Run it");
/// ```
pub fn parse_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();

    for (index, fragment) in SECTION_BOUNDARY.split(text).enumerate() {
        if fragment.is_empty() {
            continue;
        }
        let position = sections.len() + 1;

        // Only fragments after a boundary start with heading text.
        if index == 0 {
            sections.push(Section::untitled(position, fragment.trim()));
            continue;
        }

        let (first_line, rest) = fragment.split_once('\n').unwrap_or((fragment, ""));
        let title = first_line.trim();
        if title.is_empty() {
            sections.push(Section::untitled(position, rest.trim()));
        } else {
            sections.push(Section::new(title, rest.trim()));
        }
    }

    sections
}

/// Find fenced code blocks in source order.
///
/// Unterminated fences produce no block.
///
/// # Example
///
/// ```
/// use docpress::document::extract_code_blocks;
///
/// let blocks = extract_code_blocks("```js\nconsole.log(1)\n```");
/// assert_eq!(blocks[0].language, "js");
/// assert_eq!(blocks[0].code, "console.log(1)");
/// ```
pub fn extract_code_blocks(text: &str) -> Vec<CodeBlock> {
    FENCED_CODE
        .captures_iter(text)
        .map(|caps| {
            let language = caps.get(1).map(|m| m.as_str());
            let code = caps.get(2).map_or("", |m| m.as_str());
            CodeBlock::new(language, code)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sections_empty_input() {
        assert!(parse_sections("").is_empty());
    }

    #[test]
    fn test_parse_sections_without_headings() {
        let sections = parse_sections("  just some prose\nover two lines  \n");
        assert_eq!(
            sections,
            vec![Section::new("Section 1", "just some prose\nover two lines")]
        );
    }

    #[test]
    fn test_parse_sections_single_heading() {
        let sections = parse_sections("# Title\n\nSome body text.\n\n");
        assert_eq!(sections, vec![Section::new("Title", "Some body text.")]);
    }

    #[test]
    fn test_parse_sections_levels_one_and_two() {
        let md = "# Overview\nIntro text\n## Install\ncargo install\n## Usage\nrun";
        let titles: Vec<_> = parse_sections(md).into_iter().map(|s| s.title).collect();
        assert_eq!(titles, vec!["Overview", "Install", "Usage"]);
    }

    #[test]
    fn test_parse_sections_keeps_deeper_headings_in_content() {
        let md = "## Endpoints\n### GET /items\nList items\n#### Params\nnone";
        let sections = parse_sections(md);
        assert_eq!(sections.len(), 1);
        assert_eq!(
            sections[0].content,
            "### GET /items\nList items\n#### Params\nnone"
        );
    }

    #[test]
    fn test_parse_sections_preamble_gets_placeholder() {
        let md = "Preamble line\n# First\nbody";
        let sections = parse_sections(md);
        assert_eq!(sections[0], Section::new("Section 1", "Preamble line"));
        assert_eq!(sections[1], Section::new("First", "body"));
    }

    #[test]
    fn test_parse_sections_blank_heading_gets_positional_title() {
        let md = "# One\na\n# \nb";
        let sections = parse_sections(md);
        assert_eq!(sections[1].title, "Section 2");
        assert_eq!(sections[1].content, "b");
    }

    #[test]
    fn test_parse_sections_keeps_duplicate_titles() {
        let md = "# Notes\na\n# Notes\nb";
        let sections = parse_sections(md);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].title, "Notes");
        assert_eq!(sections[1].title, "Notes");
    }

    #[test]
    fn test_parse_sections_hash_without_space_is_not_heading() {
        let sections = parse_sections("#hashtag\n##also");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "Section 1");
    }

    #[test]
    fn test_parse_sections_handles_crlf() {
        let sections = parse_sections("# Title\r\nBody\r\n");
        assert_eq!(sections, vec![Section::new("Title", "Body")]);
    }

    #[test]
    fn test_extract_code_blocks_none() {
        assert!(extract_code_blocks("no fences here").is_empty());
    }

    #[test]
    fn test_extract_code_blocks_with_language() {
        let blocks = extract_code_blocks("```js\nconsole.log(1)\n```");
        assert_eq!(blocks, vec![CodeBlock::new(Some("js"), "console.log(1)")]);
    }

    #[test]
    fn test_extract_code_blocks_without_language() {
        let blocks = extract_code_blocks("```\nplain\n```");
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].language, "text");
        assert_eq!(blocks[0].code, "plain");
    }

    #[test]
    fn test_extract_code_blocks_in_source_order() {
        let md = "Intro\n```python\nprint('a')\n```\nMiddle\n```bash\necho b\n```\n";
        let langs: Vec<_> = extract_code_blocks(md)
            .into_iter()
            .map(|b| b.language)
            .collect();
        assert_eq!(langs, vec!["python", "bash"]);
    }

    #[test]
    fn test_extract_code_blocks_language_case_preserved() {
        let blocks = extract_code_blocks("```Python\nx = 1\n```");
        assert_eq!(blocks[0].language, "Python");
    }

    #[test]
    fn test_extract_code_blocks_ignores_extra_info_words() {
        let blocks = extract_code_blocks("```rust ignore\nfn main() {}\n```");
        assert_eq!(blocks[0].language, "rust");
        assert_eq!(blocks[0].code, "fn main() {}");
    }

    #[test]
    fn test_extract_code_blocks_allows_blank_before_language() {
        let md = "``` js\nconsole.log(1)\n```";
        let blocks = extract_code_blocks(md);
        assert_eq!(blocks[0].language, "js");

        // Same label the renderer puts on the header bar.
        let tree = crate::render::to_tree(md, &crate::render::RenderOptions::default());
        let labelled = tree
            .iter()
            .flat_map(|n| n.find_all(crate::render::NodeKind::CodeBlock))
            .filter_map(|e| e.attr("data-language"))
            .collect::<Vec<_>>();
        assert_eq!(labelled, ["js"]);
    }

    #[test]
    fn test_extract_code_blocks_symbolic_language_tag() {
        let blocks = extract_code_blocks("```c++\nint x;\n```");
        assert_eq!(blocks[0].language, "c++");
    }

    #[test]
    fn test_extract_code_blocks_unterminated_fence() {
        assert!(extract_code_blocks("```js\nconsole.log(1)\n").is_empty());
    }

    #[test]
    fn test_extract_code_blocks_closes_at_nearest_fence() {
        let md = "```a\none\n```\n```b\ntwo\n```";
        let blocks = extract_code_blocks(md);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].code, "one");
        assert_eq!(blocks[1].code, "two");
    }

    #[test]
    fn test_extract_code_blocks_trims_interior() {
        let blocks = extract_code_blocks("```sh\n\n   ls -la   \n\n```");
        assert_eq!(blocks[0].code, "ls -la");
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn text_without_headings_is_one_section(t in "[a-zA-Z0-9 .,\n]{0,200}") {
                let sections = parse_sections(&t);
                if t.is_empty() {
                    prop_assert!(sections.is_empty());
                } else {
                    prop_assert_eq!(sections.len(), 1);
                    prop_assert_eq!(&sections[0].title, "Section 1");
                    prop_assert_eq!(sections[0].content.as_str(), t.trim());
                }
            }

            #[test]
            fn single_heading_yields_title_and_body(
                title in "[A-Za-z][A-Za-z0-9 ]{0,30}",
                body in "[a-z0-9 .\n]{0,120}",
            ) {
                let md = format!("# {title}\n{body}");
                let sections = parse_sections(&md);
                prop_assert_eq!(sections, vec![Section::new(title.trim(), body.trim())]);
            }

            #[test]
            fn counts_every_well_formed_block(
                bodies in prop::collection::vec("[a-z0-9 =;()\n]{0,40}", 0..8),
            ) {
                let md: String = bodies
                    .iter()
                    .map(|body| format!("prose\n```lang\n{body}\n```\n"))
                    .collect();
                let blocks = extract_code_blocks(&md);
                prop_assert_eq!(blocks.len(), bodies.len());
                for (block, body) in blocks.iter().zip(&bodies) {
                    prop_assert_eq!(block.code.as_str(), body.trim());
                }
            }

            #[test]
            fn extraction_is_idempotent(t in "\\PC{0,300}") {
                prop_assert_eq!(parse_sections(&t), parse_sections(&t));
                prop_assert_eq!(extract_code_blocks(&t), extract_code_blocks(&t));
            }
        }
    }
}
