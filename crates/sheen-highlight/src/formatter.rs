//! HTML formatting of tokenized code blocks.
//!
//! The formatter is configured once and then shared across every block in
//! a render pass: inline style attributes by default, CSS classes
//! (optionally prefixed) when configured, and an optional standalone
//! document shell. Output is built in memory so a failing block writes
//! nothing at all.

use std::fmt::Write as _;

use sheen_renderer::escape_html;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Color, Theme};
use syntect::html::{
    ClassStyle, ClassedHTMLGenerator, IncludeBackground, css_for_theme_with_class_style,
    styled_line_to_highlighted_html,
};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::error::HighlightError;

/// HTML formatter for tokenized code.
///
/// Fixed at construction; holds no per-block state, so one instance
/// serves all code blocks of a render pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlFormatter {
    class_style: Option<ClassStyle>,
    standalone: bool,
}

impl HtmlFormatter {
    /// Formatter emitting inline style attributes, no document shell.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit CSS classes in the given style instead of inline attributes.
    #[must_use]
    pub fn with_class_style(mut self, style: ClassStyle) -> Self {
        self.class_style = Some(style);
        self
    }

    /// Wrap each formatted block in a complete HTML document shell.
    #[must_use]
    pub fn standalone(mut self, enabled: bool) -> Self {
        self.standalone = enabled;
        self
    }

    /// Format a code block into highlighted HTML.
    ///
    /// `lang` is the fence language token used for the `language-…` class
    /// on the inner `<code>` tag; highlighting itself follows `syntax`.
    /// The result is a complete `<pre><code>` fragment (or a full document
    /// in standalone mode). Nothing is emitted on error.
    pub fn format(
        &self,
        syntax: &SyntaxReference,
        syntaxes: &SyntaxSet,
        theme: &Theme,
        lang: Option<&str>,
        code: &str,
    ) -> Result<String, HighlightError> {
        let block = match self.class_style {
            Some(style) => format_classed(syntax, syntaxes, lang, code, style)?,
            None => format_styled(syntax, syntaxes, theme, lang, code)?,
        };
        if !self.standalone {
            return Ok(block);
        }

        let mut page = String::with_capacity(block.len() + 256);
        page.push_str("<html>\n");
        if let Some(style) = self.class_style {
            let css = css_for_theme_with_class_style(theme, style).map_err(HighlightError::Format)?;
            page.push_str("<style type=\"text/css\">\n");
            page.push_str(&css);
            page.push_str("</style>\n");
        }
        match theme.settings.background {
            // In class mode the theme CSS carries the background.
            Some(bg) if self.class_style.is_none() => {
                write!(page, r#"<body style="background-color:{}">"#, hex_color(bg)).unwrap();
            }
            _ => page.push_str("<body>"),
        }
        page.push('\n');
        page.push_str(&block);
        page.push_str("\n</body>\n</html>\n");
        Ok(page)
    }

    /// CSS rules for `theme`, matching the configured class style.
    ///
    /// In inline mode this falls back to spaced class names so the rules
    /// are still usable by callers who post-process the output.
    pub fn theme_css(&self, theme: &Theme) -> Result<String, HighlightError> {
        let style = self.class_style.unwrap_or(ClassStyle::Spaced);
        css_for_theme_with_class_style(theme, style).map_err(HighlightError::Format)
    }
}

fn format_styled(
    syntax: &SyntaxReference,
    syntaxes: &SyntaxSet,
    theme: &Theme,
    lang: Option<&str>,
    code: &str,
) -> Result<String, HighlightError> {
    let mut html = String::with_capacity(code.len() * 8);
    match theme.settings.background {
        Some(bg) => {
            write!(html, r#"<pre style="background-color:{}">"#, hex_color(bg)).unwrap();
        }
        None => html.push_str("<pre>"),
    }
    open_code_tag(&mut html, lang);

    let mut highlighter = HighlightLines::new(syntax, theme);
    for line in LinesWithEndings::from(code) {
        let regions = highlighter
            .highlight_line(line, syntaxes)
            .map_err(HighlightError::Tokenize)?;
        let rendered = styled_line_to_highlighted_html(&regions, IncludeBackground::No)
            .map_err(HighlightError::Format)?;
        html.push_str(&rendered);
    }

    html.push_str("</code></pre>");
    Ok(html)
}

fn format_classed(
    syntax: &SyntaxReference,
    syntaxes: &SyntaxSet,
    lang: Option<&str>,
    code: &str,
    style: ClassStyle,
) -> Result<String, HighlightError> {
    let mut html = String::with_capacity(code.len() * 8);
    if let ClassStyle::SpacedPrefixed { prefix } = style {
        write!(html, r#"<pre class="{prefix}code">"#).unwrap();
    } else {
        html.push_str(r#"<pre class="code">"#);
    }
    open_code_tag(&mut html, lang);

    let mut generator = ClassedHTMLGenerator::new_with_class_style(syntax, syntaxes, style);
    for line in LinesWithEndings::from(code) {
        generator
            .parse_html_for_line_which_includes_newline(line)
            .map_err(HighlightError::Tokenize)?;
    }
    html.push_str(&generator.finalize());

    html.push_str("</code></pre>");
    Ok(html)
}

fn open_code_tag(html: &mut String, lang: Option<&str>) {
    match lang {
        Some(lang) => write!(html, r#"<code class="language-{}">"#, escape_html(lang)).unwrap(),
        None => html.push_str("<code>"),
    }
}

fn hex_color(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r, color.g, color.b)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use syntect::highlighting::ThemeSet;

    use super::*;

    fn syntaxes() -> SyntaxSet {
        SyntaxSet::load_defaults_newlines()
    }

    fn theme() -> Theme {
        ThemeSet::load_defaults().themes["base16-ocean.dark"].clone()
    }

    #[test]
    fn test_styled_output_uses_inline_styles() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_by_token("rust").unwrap();
        let html = HtmlFormatter::new()
            .format(syntax, &ss, &theme(), Some("rust"), "fn main() {}\n")
            .unwrap();

        assert!(html.starts_with(r#"<pre style="background-color:#"#), "{html}");
        assert!(html.contains(r#"<code class="language-rust">"#), "{html}");
        assert!(html.contains("<span style=\"color:"), "{html}");
        assert!(html.ends_with("</code></pre>"), "{html}");
    }

    #[test]
    fn test_classed_output_uses_classes() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_by_token("rust").unwrap();
        let html = HtmlFormatter::new()
            .with_class_style(ClassStyle::Spaced)
            .format(syntax, &ss, &theme(), Some("rust"), "fn main() {}\n")
            .unwrap();

        assert!(html.starts_with(r#"<pre class="code">"#), "{html}");
        assert!(html.contains("<span class="), "{html}");
        assert!(!html.contains("<span style="), "{html}");
    }

    #[test]
    fn test_classed_prefix_applies_to_wrapper_and_spans() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_by_token("rust").unwrap();
        let html = HtmlFormatter::new()
            .with_class_style(ClassStyle::SpacedPrefixed { prefix: "hl-" })
            .format(syntax, &ss, &theme(), Some("rust"), "fn main() {}\n")
            .unwrap();

        assert!(html.starts_with(r#"<pre class="hl-code">"#), "{html}");
        assert!(html.contains("hl-source"), "{html}");
    }

    #[test]
    fn test_plain_text_content_is_escaped() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_plain_text();
        let html = HtmlFormatter::new()
            .format(syntax, &ss, &theme(), None, "<script>alert(1)</script>\n")
            .unwrap();

        assert!(html.contains("&lt;script&gt;"), "{html}");
        assert!(!html.contains("<script>"), "{html}");
    }

    #[test]
    fn test_no_language_token_omits_class() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_plain_text();
        let html = HtmlFormatter::new()
            .format(syntax, &ss, &theme(), None, "plain\n")
            .unwrap();

        assert!(html.contains("<code>"), "{html}");
        assert!(!html.contains("language-"), "{html}");
    }

    #[test]
    fn test_empty_code_still_produces_wrapper() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_plain_text();
        let html = HtmlFormatter::new()
            .format(syntax, &ss, &theme(), Some("text"), "")
            .unwrap();

        assert!(html.starts_with("<pre"), "{html}");
        assert!(html.ends_with("</code></pre>"), "{html}");
    }

    #[test]
    fn test_standalone_classed_includes_style_block() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_by_token("rust").unwrap();
        let html = HtmlFormatter::new()
            .with_class_style(ClassStyle::Spaced)
            .standalone(true)
            .format(syntax, &ss, &theme(), Some("rust"), "let x = 1;\n")
            .unwrap();

        assert!(html.starts_with("<html>\n"), "{html}");
        assert!(html.contains("<style type=\"text/css\">"), "{html}");
        assert!(html.ends_with("</body>\n</html>\n"), "{html}");
    }

    #[test]
    fn test_standalone_styled_sets_body_background() {
        let ss = syntaxes();
        let syntax = ss.find_syntax_by_token("rust").unwrap();
        let html = HtmlFormatter::new()
            .standalone(true)
            .format(syntax, &ss, &theme(), Some("rust"), "let x = 1;\n")
            .unwrap();

        assert!(html.contains(r#"<body style="background-color:#"#), "{html}");
        assert!(!html.contains("<style type="), "{html}");
    }

    #[test]
    fn test_theme_css_nonempty_for_both_styles() {
        let formatter = HtmlFormatter::new().with_class_style(ClassStyle::Spaced);
        let css = formatter.theme_css(&theme()).unwrap();
        assert!(css.contains("color:"), "{css}");

        // Inline mode still exports usable spaced-class CSS.
        let css_inline = HtmlFormatter::new().theme_css(&theme()).unwrap();
        assert_eq!(css, css_inline);
    }

    #[test]
    fn test_hex_color() {
        let color = Color {
            r: 0x2b,
            g: 0x30,
            b: 0x3b,
            a: 0xff,
        };
        assert_eq!(hex_color(color), "#2b303b");
    }
}
