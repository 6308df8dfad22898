//! Syntax highlighting for code blocks.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions and
//! emits HTML spans with inline foreground colors.

use std::fmt::Write as _;
use std::sync::OnceLock;

use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;

use crate::config::ThemeMode;
use crate::render::escape_html;

/// Highlight `code` as `language`, returning HTML for the inside of a
/// `<code>` element.
///
/// Returns `None` when no syntax matches the language or highlighting fails,
/// so callers can fall back to plain escaped text.
pub fn highlight_html(language: &str, code: &str, mode: ThemeMode) -> Option<String> {
    let syntax_set = syntax_set();
    let syntax = syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language))?;

    let mut highlighter = HighlightLines::new(syntax, theme(mode)?);
    let mut html = String::new();
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter.highlight_line(line, syntax_set).ok()?;
        for (style, text) in ranges {
            let fg = adjust_fg_for_background(style.foreground, mode);
            let _ = write!(
                html,
                "<span style=\"color:#{:02x}{:02x}{:02x}",
                fg.r, fg.g, fg.b
            );
            if style.font_style.contains(FontStyle::BOLD) {
                html.push_str(";font-weight:bold");
            }
            if style.font_style.contains(FontStyle::ITALIC) {
                html.push_str(";font-style:italic");
            }
            html.push_str("\">");
            html.push_str(&escape_html(text));
            html.push_str("</span>");
        }
    }

    Some(html)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn theme(mode: ThemeMode) -> Option<&'static Theme> {
    static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();
    let theme_set = THEME_SET.get_or_init(ThemeSet::load_defaults);
    let preferred = match mode {
        ThemeMode::Dark => ["base16-ocean.dark", "base16-eighties.dark", "Solarized (dark)"].as_slice(),
        ThemeMode::Light => ["InspiredGitHub", "Solarized (light)", "base16-ocean.light"].as_slice(),
    };

    preferred
        .iter()
        .find_map(|name| theme_set.themes.get(*name))
        .or_else(|| theme_set.themes.values().next())
}

/// Darken bright foreground colors so they stay readable on light pages.
fn adjust_fg_for_background(color: Color, mode: ThemeMode) -> Color {
    match mode {
        ThemeMode::Dark => color,
        ThemeMode::Light => {
            let luma = (0.2126 * f32::from(color.r))
                + (0.7152 * f32::from(color.g))
                + (0.0722 * f32::from(color.b));
            if luma < 155.0 {
                return color;
            }

            Color {
                r: (f32::from(color.r) * 0.42).round() as u8,
                g: (f32::from(color.g) * 0.42).round() as u8,
                b: (f32::from(color.b) * 0.42).round() as u8,
                a: color.a,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_rust_produces_colored_spans() {
        let html = highlight_html("rust", "fn main() {\n    let x = 1;\n}\n", ThemeMode::Dark).unwrap();
        assert!(html.contains("<span style=\"color:#"));
        assert!(html.contains("main"));
    }

    #[test]
    fn test_highlight_unknown_language_is_none() {
        assert!(highlight_html("nope", "just text", ThemeMode::Dark).is_none());
    }

    #[test]
    fn test_highlight_finds_syntax_by_extension_token() {
        assert!(highlight_html("py", "print('x')", ThemeMode::Light).is_some());
    }

    #[test]
    fn test_highlight_escapes_markup() {
        let html = highlight_html("html", "<b>&</b>", ThemeMode::Dark).unwrap();
        assert!(!html.contains("<b>"));
        assert!(html.contains("&lt;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let bright = Color {
            r: 240,
            g: 230,
            b: 120,
            a: 255,
        };
        let adjusted = adjust_fg_for_background(bright, ThemeMode::Light);
        assert!(adjusted.r < bright.r);
        assert!(adjusted.g < bright.g);
        assert!(adjusted.b < bright.b);
    }

    #[test]
    fn test_dark_mode_keeps_fg() {
        let color = Color {
            r: 240,
            g: 230,
            b: 120,
            a: 255,
        };
        assert_eq!(adjust_fg_for_background(color, ThemeMode::Dark), color);
    }
}
