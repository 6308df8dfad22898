//! Presentation rules for rendered markdown elements.
//!
//! Every supported node kind maps to one HTML element and a fixed class
//! list. Two tables exist, one per [`ThemeMode`]; both are compile-time
//! constants.

use comrak::nodes::{ListType, NodeValue};

use crate::config::ThemeMode;

/// Node kinds that carry a presentation rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Heading with level (1-4 are styled)
    Heading(u8),
    Paragraph,
    List { ordered: bool },
    ListItem,
    /// Inline code span, or a code block without a language
    InlineCode,
    /// Code block with a language annotation
    CodeBlock,
    /// Language label bar above a code block
    CodeHeader,
    /// Scrollable body of a code block
    CodeBody,
    Link,
    Table,
    TableHead,
    TableBody,
    TableRow,
    TableHeaderCell,
    TableCell,
    BlockQuote,
    Strong,
    Emphasis,
    /// Anything outside the enumeration; rendered unstyled
    Other,
}

impl NodeKind {
    /// Classify a parsed node.
    ///
    /// A code block becomes [`NodeKind::CodeBlock`] only when its info string
    /// names a language; otherwise it is treated as inline code. Table cells
    /// classify as [`NodeKind::TableCell`]; header cells are decided by the
    /// row they belong to.
    pub fn classify(value: &NodeValue) -> Self {
        match value {
            NodeValue::Heading(heading) if (1..=4).contains(&heading.level) => {
                Self::Heading(heading.level)
            }
            NodeValue::Paragraph => Self::Paragraph,
            NodeValue::List(list) => Self::List {
                ordered: matches!(list.list_type, ListType::Ordered),
            },
            NodeValue::Item(_) | NodeValue::TaskItem(_) => Self::ListItem,
            NodeValue::Code(_) => Self::InlineCode,
            NodeValue::CodeBlock(block) => {
                if code_language(&block.info).is_some() {
                    Self::CodeBlock
                } else {
                    Self::InlineCode
                }
            }
            NodeValue::Link(_) => Self::Link,
            NodeValue::Table(_) => Self::Table,
            NodeValue::TableRow(_) => Self::TableRow,
            NodeValue::TableCell => Self::TableCell,
            NodeValue::BlockQuote => Self::BlockQuote,
            NodeValue::Strong => Self::Strong,
            NodeValue::Emph => Self::Emphasis,
            _ => Self::Other,
        }
    }
}

/// First word of a fenced code block's info string.
pub fn code_language(info: &str) -> Option<&str> {
    info.split_whitespace().next().filter(|s| !s.is_empty())
}

/// HTML element and classes for one node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderRule {
    pub element: &'static str,
    pub class: &'static str,
}

impl RenderRule {
    /// Rule for kinds the table does not style.
    pub const UNSTYLED: Self = Self {
        element: "",
        class: "",
    };

    const fn new(element: &'static str, class: &'static str) -> Self {
        Self { element, class }
    }

    pub const fn is_unstyled(&self) -> bool {
        self.element.is_empty()
    }
}

/// Class lists for every styled node kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    /// Heading level 1
    pub h1: &'static str,
    /// Heading level 2
    pub h2: &'static str,
    /// Heading level 3
    pub h3: &'static str,
    /// Heading level 4
    pub h4: &'static str,
    pub paragraph: &'static str,
    pub unordered_list: &'static str,
    pub ordered_list: &'static str,
    pub list_item: &'static str,
    pub inline_code: &'static str,
    /// Wrapper around header bar and body
    pub code_block: &'static str,
    pub code_header: &'static str,
    pub code_body: &'static str,
    pub link: &'static str,
    pub table: &'static str,
    pub table_head: &'static str,
    pub table_body: &'static str,
    pub table_row: &'static str,
    pub table_header_cell: &'static str,
    pub table_cell: &'static str,
    pub blockquote: &'static str,
    pub strong: &'static str,
    pub emphasis: &'static str,
}

static DARK: RuleTable = RuleTable::dark();
static LIGHT: RuleTable = RuleTable::light();

impl Default for RuleTable {
    fn default() -> Self {
        Self::dark()
    }
}

impl RuleTable {
    /// The process-wide table for `mode`.
    pub fn for_theme(mode: ThemeMode) -> &'static Self {
        match mode {
            ThemeMode::Dark => &DARK,
            ThemeMode::Light => &LIGHT,
        }
    }

    /// Rules for dark page backgrounds.
    pub const fn dark() -> Self {
        Self {
            h1: "text-3xl font-bold text-white mt-8 mb-6",
            h2: "text-2xl font-semibold text-white mt-8 mb-4 pb-2 border-b border-gray-700",
            h3: "text-xl font-semibold text-gray-100 mt-6 mb-3",
            h4: "text-lg font-medium text-gray-200 mt-4 mb-2",
            paragraph: "text-gray-300 leading-7 mb-4",
            unordered_list: "list-disc pl-6 mb-4 space-y-1 text-gray-300",
            ordered_list: "list-decimal pl-6 mb-4 space-y-1 text-gray-300",
            list_item: "leading-7",
            inline_code: "bg-gray-800 text-pink-400 px-1.5 py-0.5 rounded text-sm font-mono",
            code_block: "my-4 rounded-lg overflow-hidden border border-gray-700",
            code_header: "flex items-center bg-gray-800 px-4 py-2 text-xs font-mono text-gray-400",
            code_body: "bg-gray-900 p-4 overflow-x-auto text-sm font-mono text-gray-100",
            link: "text-blue-400 hover:text-blue-300 underline",
            table: "w-full my-4 text-sm border-collapse",
            table_head: "bg-gray-800",
            table_body: "divide-y divide-gray-700",
            table_row: "border-b border-gray-700",
            table_header_cell: "px-4 py-2 text-left font-semibold text-gray-200",
            table_cell: "px-4 py-2 text-gray-300",
            blockquote: "border-l-4 border-blue-500 pl-4 my-4 italic text-gray-400",
            strong: "font-semibold text-white",
            emphasis: "italic",
        }
    }

    /// Rules for light page backgrounds.
    pub const fn light() -> Self {
        Self {
            h1: "text-3xl font-bold text-gray-900 mt-8 mb-6",
            h2: "text-2xl font-semibold text-gray-900 mt-8 mb-4 pb-2 border-b border-gray-200",
            h3: "text-xl font-semibold text-gray-800 mt-6 mb-3",
            h4: "text-lg font-medium text-gray-700 mt-4 mb-2",
            paragraph: "text-gray-700 leading-7 mb-4",
            unordered_list: "list-disc pl-6 mb-4 space-y-1 text-gray-700",
            ordered_list: "list-decimal pl-6 mb-4 space-y-1 text-gray-700",
            list_item: "leading-7",
            inline_code: "bg-gray-100 text-pink-600 px-1.5 py-0.5 rounded text-sm font-mono",
            code_block: "my-4 rounded-lg overflow-hidden border border-gray-200",
            code_header: "flex items-center bg-gray-100 px-4 py-2 text-xs font-mono text-gray-500",
            code_body: "bg-gray-50 p-4 overflow-x-auto text-sm font-mono text-gray-800",
            link: "text-blue-600 hover:text-blue-800 underline",
            table: "w-full my-4 text-sm border-collapse",
            table_head: "bg-gray-100",
            table_body: "divide-y divide-gray-200",
            table_row: "border-b border-gray-200",
            table_header_cell: "px-4 py-2 text-left font-semibold text-gray-800",
            table_cell: "px-4 py-2 text-gray-700",
            blockquote: "border-l-4 border-blue-400 pl-4 my-4 italic text-gray-600",
            strong: "font-semibold text-gray-900",
            emphasis: "italic",
        }
    }

    /// Look up the rule for `kind`.
    pub const fn rule(&self, kind: NodeKind) -> RenderRule {
        match kind {
            NodeKind::Heading(1) => RenderRule::new("h1", self.h1),
            NodeKind::Heading(2) => RenderRule::new("h2", self.h2),
            NodeKind::Heading(3) => RenderRule::new("h3", self.h3),
            NodeKind::Heading(4) => RenderRule::new("h4", self.h4),
            NodeKind::Paragraph => RenderRule::new("p", self.paragraph),
            NodeKind::List { ordered: false } => RenderRule::new("ul", self.unordered_list),
            NodeKind::List { ordered: true } => RenderRule::new("ol", self.ordered_list),
            NodeKind::ListItem => RenderRule::new("li", self.list_item),
            NodeKind::InlineCode => RenderRule::new("code", self.inline_code),
            NodeKind::CodeBlock => RenderRule::new("div", self.code_block),
            NodeKind::CodeHeader => RenderRule::new("div", self.code_header),
            NodeKind::CodeBody => RenderRule::new("pre", self.code_body),
            NodeKind::Link => RenderRule::new("a", self.link),
            NodeKind::Table => RenderRule::new("table", self.table),
            NodeKind::TableHead => RenderRule::new("thead", self.table_head),
            NodeKind::TableBody => RenderRule::new("tbody", self.table_body),
            NodeKind::TableRow => RenderRule::new("tr", self.table_row),
            NodeKind::TableHeaderCell => RenderRule::new("th", self.table_header_cell),
            NodeKind::TableCell => RenderRule::new("td", self.table_cell),
            NodeKind::BlockQuote => RenderRule::new("blockquote", self.blockquote),
            NodeKind::Strong => RenderRule::new("strong", self.strong),
            NodeKind::Emphasis => RenderRule::new("em", self.emphasis),
            NodeKind::Heading(_) | NodeKind::Other => RenderRule::UNSTYLED,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comrak::{Arena, Options, parse_document};

    fn kinds(markdown: &str) -> Vec<NodeKind> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &Options::default());
        root.descendants()
            .map(|node| NodeKind::classify(&node.data.borrow().value))
            .collect()
    }

    #[test]
    fn test_classify_code_block_with_language() {
        assert!(kinds("```rust\nfn main() {}\n```").contains(&NodeKind::CodeBlock));
        assert!(kinds("```python title=\"x\"\nx = 1\n```").contains(&NodeKind::CodeBlock));
    }

    #[test]
    fn test_classify_code_block_without_language_is_inline() {
        let fenced = kinds("```\nplain\n```");
        assert!(fenced.contains(&NodeKind::InlineCode));
        assert!(!fenced.contains(&NodeKind::CodeBlock));

        let indented = kinds("    indented code\n");
        assert!(indented.contains(&NodeKind::InlineCode));
        assert!(!indented.contains(&NodeKind::CodeBlock));
    }

    #[test]
    fn test_classify_inline_code() {
        assert_eq!(
            kinds("use `cargo`"),
            vec![
                NodeKind::Other,
                NodeKind::Paragraph,
                NodeKind::Other,
                NodeKind::InlineCode
            ]
        );
    }

    #[test]
    fn test_classify_heading_levels() {
        for level in 1..=6u8 {
            let markdown = format!("{} Title", "#".repeat(level as usize));
            let expected = if level <= 4 {
                NodeKind::Heading(level)
            } else {
                NodeKind::Other
            };
            assert_eq!(kinds(&markdown)[1], expected, "level {level}");
        }
    }

    #[test]
    fn test_classify_structural_kinds() {
        let found = kinds("> **bold** and *em* [link](https://example.com)\n\n1. one\n\n- two");
        for kind in [
            NodeKind::BlockQuote,
            NodeKind::Strong,
            NodeKind::Emphasis,
            NodeKind::Link,
            NodeKind::List { ordered: true },
            NodeKind::List { ordered: false },
            NodeKind::ListItem,
        ] {
            assert!(found.contains(&kind), "missing {kind:?}");
        }
    }

    #[test]
    fn test_classify_unlisted_kinds_are_other() {
        assert_eq!(kinds("---"), vec![NodeKind::Other, NodeKind::Other]);
    }

    #[test]
    fn test_rule_elements() {
        let table = RuleTable::dark();
        assert_eq!(table.rule(NodeKind::Heading(1)).element, "h1");
        assert_eq!(table.rule(NodeKind::Heading(4)).element, "h4");
        assert_eq!(table.rule(NodeKind::List { ordered: true }).element, "ol");
        assert_eq!(table.rule(NodeKind::List { ordered: false }).element, "ul");
        assert_eq!(table.rule(NodeKind::CodeBody).element, "pre");
        assert_eq!(table.rule(NodeKind::TableHeaderCell).element, "th");
        assert_eq!(table.rule(NodeKind::Emphasis).element, "em");
    }

    #[test]
    fn test_rule_unstyled_kinds() {
        let table = RuleTable::dark();
        assert!(table.rule(NodeKind::Heading(5)).is_unstyled());
        assert!(table.rule(NodeKind::Other).is_unstyled());
        assert!(!table.rule(NodeKind::Paragraph).is_unstyled());
    }

    #[test]
    fn test_for_theme_selects_table() {
        assert_eq!(RuleTable::for_theme(ThemeMode::Dark), &RuleTable::dark());
        assert_eq!(RuleTable::for_theme(ThemeMode::Light), &RuleTable::light());
        assert_ne!(
            RuleTable::for_theme(ThemeMode::Dark).h1,
            RuleTable::for_theme(ThemeMode::Light).h1
        );
    }

    #[test]
    fn test_code_language_first_word() {
        assert_eq!(code_language("rust ignore"), Some("rust"));
        assert_eq!(code_language(""), None);
    }
}
