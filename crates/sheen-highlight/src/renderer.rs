//! Code block highlighting as a renderer decorator.
//!
//! [`CodeBlockRenderer`] wraps any [`NodeRenderer`] and intercepts code
//! blocks, replacing them with syntax-highlighted HTML. Every other node
//! passes through to the wrapped renderer untouched, so the decorator can
//! sit in front of the stock HTML renderer or any custom one.
//!
//! Highlighting failures inside a block are absorbed: the block falls back
//! to the wrapped renderer and the pass continues. Only sink I/O errors
//! abort a render.

use std::io;
use std::sync::LazyLock;

use sheen_renderer::{HtmlRenderer, Node, NodeKind, NodeRenderer, WalkStatus, fence_language};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::ClassStyle;
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::error::HighlightError;
use crate::formatter::HtmlFormatter;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

static DEFAULT_SYNTAXES: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static DEFAULT_THEMES: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

fn default_theme() -> Theme {
    DEFAULT_THEMES
        .themes
        .get(DEFAULT_THEME)
        .cloned()
        .unwrap_or_default()
}

/// Renderer decorator that syntax-highlights fenced and indented code
/// blocks and delegates every other node to a base renderer.
///
/// The language comes from the first fence token when one is present and
/// registered. Otherwise, when autodetection is on (the default), the
/// first line of the block is inspected for shebangs and similar markers.
/// Blocks that still have no language are rendered as plain text through
/// the highlighter rather than handed back to the base renderer, so their
/// markup matches highlighted blocks.
///
/// # Examples
///
/// ```
/// use sheen_highlight::CodeBlockRenderer;
/// use sheen_renderer::markdown_to_html;
///
/// let renderer = CodeBlockRenderer::new();
/// let html = markdown_to_html("```rust\nlet x = 1;\n```", &renderer);
/// assert!(html.contains("<span"));
/// ```
pub struct CodeBlockRenderer {
    base: Box<dyn NodeRenderer + Send + Sync>,
    syntaxes: SyntaxSet,
    theme: Theme,
    autodetect: bool,
    embed_css: bool,
    formatter: HtmlFormatter,
}

impl CodeBlockRenderer {
    /// Decorator around the stock HTML renderer with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Start configuring a decorator.
    #[must_use]
    pub fn builder() -> CodeBlockRendererBuilder {
        CodeBlockRendererBuilder::default()
    }

    /// Highlight one code block and write the finished HTML to `out`.
    ///
    /// The block is formatted in memory first; on error nothing has been
    /// written.
    pub fn highlight(
        &self,
        out: &mut dyn io::Write,
        info: &str,
        literal: &str,
    ) -> Result<(), HighlightError> {
        let syntax = self.select_syntax(info, literal);
        let lang = fence_language(info);
        let html = self
            .formatter
            .format(syntax, &self.syntaxes, &self.theme, lang, literal)?;
        out.write_all(html.as_bytes())?;
        Ok(())
    }

    /// Write the CSS rules for the configured theme to `out`.
    ///
    /// Useful with class-based output, where the highlighted HTML carries
    /// no colors of its own.
    pub fn write_css(&self, out: &mut dyn io::Write) -> Result<(), HighlightError> {
        let css = self.formatter.theme_css(&self.theme)?;
        out.write_all(css.as_bytes())?;
        Ok(())
    }

    fn select_syntax(&self, info: &str, literal: &str) -> &SyntaxReference {
        if let Some(token) = fence_language(info) {
            if let Some(syntax) = self.syntaxes.find_syntax_by_token(token) {
                return syntax;
            }
            tracing::debug!(token = %token, "No syntax registered for fence token");
        }
        if self.autodetect {
            let first_line = literal.lines().next().unwrap_or("");
            if let Some(syntax) = self.syntaxes.find_syntax_by_first_line(first_line) {
                return syntax;
            }
            tracing::debug!("First-line detection found no syntax");
        }
        self.syntaxes.find_syntax_plain_text()
    }
}

impl Default for CodeBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeRenderer for CodeBlockRenderer {
    fn render_node(
        &self,
        out: &mut dyn io::Write,
        node: &Node,
        entering: bool,
    ) -> io::Result<WalkStatus> {
        match &node.kind {
            NodeKind::CodeBlock { info, literal } if entering => {
                match self.highlight(out, info, literal) {
                    Ok(()) => Ok(WalkStatus::SkipChildren),
                    Err(HighlightError::Io(err)) => Err(err),
                    Err(err) => {
                        tracing::debug!(
                            error = %err,
                            "Highlighting failed, falling back to base renderer"
                        );
                        self.base.render_node(out, node, entering)
                    }
                }
            }
            NodeKind::Document if entering && self.embed_css => {
                match self.formatter.theme_css(&self.theme) {
                    Ok(css) => {
                        out.write_all(b"<style>")?;
                        out.write_all(css.as_bytes())?;
                        out.write_all(b"</style>")?;
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, "Theme CSS could not be embedded");
                    }
                }
                self.base.render_node(out, node, entering)
            }
            _ => self.base.render_node(out, node, entering),
        }
    }

    fn render_header(&self, out: &mut dyn io::Write, root: &Node) -> io::Result<()> {
        self.base.render_header(out, root)
    }

    fn render_footer(&self, out: &mut dyn io::Write, root: &Node) -> io::Result<()> {
        self.base.render_footer(out, root)
    }
}

/// Builder for [`CodeBlockRenderer`].
///
/// Later calls override earlier ones, so `theme` and `with_theme` can be
/// mixed freely with last-call-wins semantics.
#[allow(clippy::struct_excessive_bools)]
pub struct CodeBlockRendererBuilder {
    theme: Theme,
    autodetect: bool,
    embed_css: bool,
    css_classes: bool,
    class_prefix: Option<&'static str>,
    standalone: bool,
    syntaxes: Option<SyntaxSet>,
    base: Option<Box<dyn NodeRenderer + Send + Sync>>,
}

impl Default for CodeBlockRendererBuilder {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            autodetect: true,
            embed_css: false,
            css_classes: false,
            class_prefix: None,
            standalone: false,
            syntaxes: None,
            base: None,
        }
    }
}

impl CodeBlockRendererBuilder {
    /// Select a theme by name from the built-in theme set.
    ///
    /// Unknown names are logged and leave the current theme in place.
    #[must_use]
    pub fn theme(mut self, name: &str) -> Self {
        match DEFAULT_THEMES.themes.get(name) {
            Some(theme) => self.theme = theme.clone(),
            None => tracing::warn!(theme = %name, "Unknown theme name, keeping default"),
        }
        self
    }

    /// Use a theme loaded elsewhere, such as a custom `.tmTheme` file.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Inspect the first line of unlabeled blocks for a language. On by
    /// default.
    #[must_use]
    pub fn autodetect(mut self, enabled: bool) -> Self {
        self.autodetect = enabled;
        self
    }

    /// Emit the theme CSS in a `<style>` tag at the start of the document.
    #[must_use]
    pub fn embed_css(mut self, enabled: bool) -> Self {
        self.embed_css = enabled;
        self
    }

    /// Emit CSS classes instead of inline style attributes.
    #[must_use]
    pub fn css_classes(mut self, enabled: bool) -> Self {
        self.css_classes = enabled;
        self
    }

    /// Prefix generated class names. Implies [`css_classes`].
    ///
    /// [`css_classes`]: Self::css_classes
    #[must_use]
    pub fn class_prefix(mut self, prefix: &'static str) -> Self {
        self.class_prefix = Some(prefix);
        self.css_classes = true;
        self
    }

    /// Wrap each highlighted block in a full HTML document shell.
    #[must_use]
    pub fn standalone(mut self, enabled: bool) -> Self {
        self.standalone = enabled;
        self
    }

    /// Replace the built-in syntax definitions, for example to add
    /// languages compiled from custom `.sublime-syntax` files.
    #[must_use]
    pub fn syntax_set(mut self, syntaxes: SyntaxSet) -> Self {
        self.syntaxes = Some(syntaxes);
        self
    }

    /// Wrap a renderer other than the stock HTML one.
    ///
    /// The base must be `Send + Sync` so the composed renderer stays
    /// shareable across threads.
    #[must_use]
    pub fn base(mut self, base: impl NodeRenderer + Send + Sync + 'static) -> Self {
        self.base = Some(Box::new(base));
        self
    }

    #[must_use]
    pub fn build(self) -> CodeBlockRenderer {
        let class_style = match (self.css_classes, self.class_prefix) {
            (false, _) => None,
            (true, Some(prefix)) => Some(ClassStyle::SpacedPrefixed { prefix }),
            (true, None) => Some(ClassStyle::Spaced),
        };
        let mut formatter = HtmlFormatter::new().standalone(self.standalone);
        if let Some(style) = class_style {
            formatter = formatter.with_class_style(style);
        }
        CodeBlockRenderer {
            base: self.base.unwrap_or_else(|| Box::new(HtmlRenderer::new())),
            syntaxes: self.syntaxes.unwrap_or_else(|| DEFAULT_SYNTAXES.clone()),
            theme: self.theme,
            autodetect: self.autodetect,
            embed_css: self.embed_css,
            formatter,
        }
    }
}
