//! Walks a comrak syntax tree and applies the rule table.

use std::cell::RefCell;
use std::collections::HashSet;

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};

use super::RenderOptions;
use super::style::{NodeKind, RuleTable, code_language};
use super::tree::{Element, PresentationNode};
use crate::document::normalize_anchor;

/// Parse markdown and map it onto presentation nodes.
pub fn map_markdown(source: &str, options: &RenderOptions) -> Vec<PresentationNode> {
    let arena = Arena::new();
    let mut comrak_options = Options::default();

    // GFM extensions used by the docs content
    comrak_options.extension.strikethrough = true;
    comrak_options.extension.table = true;
    comrak_options.extension.autolink = true;
    comrak_options.extension.tasklist = true;

    let root = parse_document(&arena, source, &comrak_options);
    Mapper::new(options).children(root)
}

struct Mapper<'o> {
    rules: &'static RuleTable,
    options: &'o RenderOptions,
    /// Heading anchors already handed out in this document
    anchors: RefCell<HashSet<String>>,
}

impl<'o> Mapper<'o> {
    fn new(options: &'o RenderOptions) -> Self {
        Self {
            rules: RuleTable::for_theme(options.theme),
            options,
            anchors: RefCell::new(HashSet::new()),
        }
    }

    /// Claim `slug` as a heading id, suffixing `-1`, `-2`, ... on repeats.
    fn unique_anchor(&self, slug: String) -> String {
        let mut anchors = self.anchors.borrow_mut();
        let mut candidate = slug.clone();
        let mut suffix = 0;
        while anchors.contains(&candidate) {
            suffix += 1;
            candidate = format!("{slug}-{suffix}");
        }
        anchors.insert(candidate.clone());
        candidate
    }

    /// Styled element for `kind`, or a bare `fallback` element when the
    /// table has no rule for it.
    fn element(&self, kind: NodeKind, fallback: &'static str) -> Element {
        let rule = self.rules.rule(kind);
        if rule.is_unstyled() {
            Element::new(NodeKind::Other, fallback, "")
        } else {
            Element::new(kind, rule.element, rule.class)
        }
    }

    fn children<'a>(&self, node: &'a AstNode<'a>) -> Vec<PresentationNode> {
        let mut out = Vec::new();
        for child in node.children() {
            self.map_node(child, &mut out);
        }
        out
    }

    fn map_node<'a>(&self, node: &'a AstNode<'a>, out: &mut Vec<PresentationNode>) {
        let data = node.data.borrow();
        let kind = NodeKind::classify(&data.value);

        match &data.value {
            NodeValue::Text(text) => out.push(PresentationNode::Text(text.clone())),
            NodeValue::SoftBreak => out.push(PresentationNode::Text("\n".to_string())),
            NodeValue::LineBreak => out.push(self.element(NodeKind::Other, "br").into()),
            NodeValue::HtmlBlock(html) => out.push(PresentationNode::Raw(html.literal.clone())),
            NodeValue::HtmlInline(html) => out.push(PresentationNode::Raw(html.clone())),

            NodeValue::Heading(heading) => {
                let mut element = self
                    .element(kind, heading_tag(heading.level))
                    .with_children(self.children(node));
                let anchor = normalize_anchor(&plain_text(node));
                if !anchor.is_empty() {
                    element = element.with_attr("id", self.unique_anchor(anchor));
                }
                out.push(element.into());
            }

            NodeValue::Paragraph => {
                // Tight list items render their text without a paragraph.
                if in_tight_list(node) {
                    out.extend(self.children(node));
                } else {
                    out.push(self.element(kind, "p").with_children(self.children(node)).into());
                }
            }

            NodeValue::Code(code) => out.push(self.inline_code(&code.literal)),
            NodeValue::CodeBlock(block) => match code_language(&block.info) {
                Some(language) => out.push(self.code_block(language, &block.literal)),
                None => out.push(self.inline_code(&block.literal)),
            },

            NodeValue::Link(link) => {
                let mut element = self.element(kind, "a").with_attr("href", link.url.clone());
                if !link.title.is_empty() {
                    element = element.with_attr("title", link.title.clone());
                }
                out.push(element.with_children(self.children(node)).into());
            }

            NodeValue::Image(link) => {
                let mut element = self
                    .element(kind, "img")
                    .with_attr("src", link.url.clone())
                    .with_attr("alt", plain_text(node));
                if !link.title.is_empty() {
                    element = element.with_attr("title", link.title.clone());
                }
                out.push(element.into());
            }

            NodeValue::List(list) => {
                let tag = match list.list_type {
                    ListType::Ordered => "ol",
                    ListType::Bullet => "ul",
                };
                let mut element = self.element(kind, tag);
                if matches!(list.list_type, ListType::Ordered) && list.start != 1 {
                    element = element.with_attr("start", list.start.to_string());
                }
                out.push(element.with_children(self.children(node)).into());
            }

            NodeValue::TaskItem(symbol) => {
                let mut checkbox = self
                    .element(NodeKind::Other, "input")
                    .with_attr("type", "checkbox")
                    .with_attr("disabled", "");
                if symbol.is_some() {
                    checkbox = checkbox.with_attr("checked", "");
                }
                let mut item = self.element(kind, "li");
                item.push(checkbox);
                item.push(PresentationNode::Text(" ".to_string()));
                out.push(item.with_children(self.children(node)).into());
            }

            NodeValue::Table(table) => out.push(self.table(node, &table.alignments)),

            NodeValue::Item(_) => {
                out.push(self.element(kind, "li").with_children(self.children(node)).into());
            }
            NodeValue::BlockQuote => {
                out.push(
                    self.element(kind, "blockquote")
                        .with_children(self.children(node))
                        .into(),
                );
            }
            NodeValue::Strong => {
                out.push(self.element(kind, "strong").with_children(self.children(node)).into());
            }
            NodeValue::Emph => {
                out.push(self.element(kind, "em").with_children(self.children(node)).into());
            }
            NodeValue::Strikethrough => {
                out.push(self.element(kind, "del").with_children(self.children(node)).into());
            }
            NodeValue::ThematicBreak => out.push(self.element(kind, "hr").into()),

            // Kinds without a mapping keep their content and lose their wrapper.
            _ => out.extend(self.children(node)),
        }
    }

    fn inline_code(&self, literal: &str) -> PresentationNode {
        self.element(NodeKind::InlineCode, "code")
            .with_children(vec![PresentationNode::Text(literal.to_string())])
            .into()
    }

    /// Header bar with the language label above the code body.
    fn code_block(&self, language: &str, literal: &str) -> PresentationNode {
        let code = literal.trim_end_matches('\n');
        let highlighted = if self.options.highlight {
            crate::highlight::highlight_html(language, code, self.options.theme)
        } else {
            None
        };
        let body = highlighted.map_or_else(
            || PresentationNode::Text(code.to_string()),
            PresentationNode::Raw,
        );

        let header = self
            .element(NodeKind::CodeHeader, "div")
            .with_children(vec![PresentationNode::Text(language.to_string())]);
        let code_element = Element::new(NodeKind::Other, "code", format!("language-{language}"))
            .with_children(vec![body]);
        let pre = self
            .element(NodeKind::CodeBody, "pre")
            .with_children(vec![code_element.into()]);

        self.element(NodeKind::CodeBlock, "div")
            .with_attr("data-language", language)
            .with_children(vec![header.into(), pre.into()])
            .into()
    }

    /// Regroup rows into a head for the header row and a body for the rest.
    fn table<'a>(&self, node: &'a AstNode<'a>, alignments: &[TableAlignment]) -> PresentationNode {
        let mut head = self.element(NodeKind::TableHead, "thead");
        let mut body = self.element(NodeKind::TableBody, "tbody");

        for row in node.children() {
            let is_header = matches!(row.data.borrow().value, NodeValue::TableRow(true));
            let (cell_kind, cell_tag) = if is_header {
                (NodeKind::TableHeaderCell, "th")
            } else {
                (NodeKind::TableCell, "td")
            };

            let mut tr = self.element(NodeKind::TableRow, "tr");
            for (index, cell) in row.children().enumerate() {
                let mut td = self.element(cell_kind, cell_tag);
                if let Some(align) = alignments.get(index).and_then(|a| alignment_style(*a)) {
                    td = td.with_attr("style", align);
                }
                tr.push(td.with_children(self.children(cell)));
            }

            if is_header {
                head.push(tr);
            } else {
                body.push(tr);
            }
        }

        let mut table = self.element(NodeKind::Table, "table");
        if !head.children.is_empty() {
            table.push(head);
        }
        if !body.children.is_empty() {
            table.push(body);
        }
        table.into()
    }
}

const fn heading_tag(level: u8) -> &'static str {
    match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    }
}

const fn alignment_style(alignment: TableAlignment) -> Option<&'static str> {
    match alignment {
        TableAlignment::Left => Some("text-align: left"),
        TableAlignment::Center => Some("text-align: center"),
        TableAlignment::Right => Some("text-align: right"),
        TableAlignment::None => None,
    }
}

fn in_tight_list<'a>(node: &'a AstNode<'a>) -> bool {
    node.parent()
        .and_then(|item| item.parent())
        .is_some_and(|list| matches!(&list.data.borrow().value, NodeValue::List(l) if l.tight))
}

fn plain_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    plain_text_recursive(node, &mut text);
    text
}

fn plain_text_recursive<'a>(node: &'a AstNode<'a>, text: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(t) => text.push_str(t),
        NodeValue::Code(c) => text.push_str(&c.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => text.push(' '),
        _ => {
            for child in node.children() {
                plain_text_recursive(child, text);
            }
        }
    }
}
