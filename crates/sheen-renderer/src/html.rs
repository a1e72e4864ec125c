//! Base HTML renderer.
//!
//! Produces semantic HTML5 output suitable for web display.

use std::io::{self, Write};

use crate::node::{Alignment, Node, NodeKind, fence_language};
use crate::renderer::{NodeRenderer, WalkStatus};

/// Stateless HTML renderer covering the full node set.
///
/// Produces semantic HTML5 with:
/// - `<pre><code class="language-…">` for fenced code blocks
/// - `<blockquote>` for blockquotes
/// - `<img>` with title and alt attributes for images
/// - alignment styles on table cells
///
/// Holds no per-pass state, so a single instance can render any number of
/// documents, concurrently if needed. It is also the default delegate for
/// decorating renderers that only override a few node kinds.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    /// Create an HTML renderer.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl NodeRenderer for HtmlRenderer {
    fn render_node(
        &self,
        out: &mut dyn Write,
        node: &Node,
        entering: bool,
    ) -> io::Result<WalkStatus> {
        if entering {
            start_node(out, node)?;
        } else {
            end_node(out, node)?;
        }
        Ok(WalkStatus::Continue)
    }
}

fn start_node(out: &mut dyn Write, node: &Node) -> io::Result<()> {
    match &node.kind {
        NodeKind::Document => {}
        NodeKind::Paragraph => out.write_all(b"<p>")?,
        NodeKind::Heading { level } => write!(out, "<h{level}>")?,
        NodeKind::BlockQuote => out.write_all(b"<blockquote>")?,
        NodeKind::CodeBlock { info, literal } => {
            if let Some(lang) = fence_language(info) {
                write!(
                    out,
                    r#"<pre><code class="language-{}">{}</code></pre>"#,
                    escape_html(lang),
                    escape_html(literal)
                )?;
            } else {
                write!(out, "<pre><code>{}</code></pre>", escape_html(literal))?;
            }
        }
        NodeKind::List { start } => match start {
            Some(1) => out.write_all(b"<ol>")?,
            Some(n) => write!(out, r#"<ol start="{n}">"#)?,
            None => out.write_all(b"<ul>")?,
        },
        NodeKind::Item => out.write_all(b"<li>")?,
        NodeKind::Table { .. } => out.write_all(b"<table>")?,
        NodeKind::TableHead => out.write_all(b"<thead><tr>")?,
        NodeKind::TableRow => out.write_all(b"<tr>")?,
        NodeKind::TableCell { header, align } => {
            let tag = if *header { "th" } else { "td" };
            write!(out, "<{tag}{}>", alignment_style(*align))?;
        }
        NodeKind::Emphasis => out.write_all(b"<em>")?,
        NodeKind::Strong => out.write_all(b"<strong>")?,
        NodeKind::Strikethrough => out.write_all(b"<s>")?,
        NodeKind::Link { dest, title } => {
            if title.is_empty() {
                write!(out, r#"<a href="{}">"#, escape_html(dest))?;
            } else {
                write!(
                    out,
                    r#"<a href="{}" title="{}">"#,
                    escape_html(dest),
                    escape_html(title)
                )?;
            }
        }
        NodeKind::Image { dest, title, alt } => {
            let title_attr = if title.is_empty() {
                String::new()
            } else {
                format!(r#" title="{}""#, escape_html(title))
            };
            write!(
                out,
                r#"<img src="{}"{title_attr} alt="{}">"#,
                escape_html(dest),
                escape_html(alt)
            )?;
        }
        NodeKind::Text(text) => out.write_all(escape_html(text).as_bytes())?,
        NodeKind::Code(code) => write!(out, "<code>{}</code>", escape_html(code))?,
        NodeKind::Html(html) => out.write_all(html.as_bytes())?,
        NodeKind::SoftBreak => out.write_all(b"\n")?,
        NodeKind::HardBreak => out.write_all(b"<br>")?,
        NodeKind::Rule => out.write_all(b"<hr>")?,
        NodeKind::TaskListMarker { checked } => {
            if *checked {
                out.write_all(br#"<input type="checkbox" checked disabled> "#)?;
            } else {
                out.write_all(br#"<input type="checkbox" disabled> "#)?;
            }
        }
    }
    Ok(())
}

fn end_node(out: &mut dyn Write, node: &Node) -> io::Result<()> {
    match &node.kind {
        NodeKind::Document => {}
        NodeKind::Paragraph => out.write_all(b"</p>")?,
        NodeKind::Heading { level } => write!(out, "</h{level}>")?,
        NodeKind::BlockQuote => out.write_all(b"</blockquote>")?,
        NodeKind::List { start } => {
            out.write_all(if start.is_some() { b"</ol>" } else { b"</ul>" })?;
        }
        NodeKind::Item => out.write_all(b"</li>")?,
        NodeKind::Table { .. } => out.write_all(b"</tbody></table>")?,
        NodeKind::TableHead => out.write_all(b"</tr></thead><tbody>")?,
        NodeKind::TableRow => out.write_all(b"</tr>")?,
        NodeKind::TableCell { header, .. } => {
            out.write_all(if *header { b"</th>" } else { b"</td>" })?;
        }
        NodeKind::Emphasis => out.write_all(b"</em>")?,
        NodeKind::Strong => out.write_all(b"</strong>")?,
        NodeKind::Strikethrough => out.write_all(b"</s>")?,
        NodeKind::Link { .. } => out.write_all(b"</a>")?,
        // Leaf kinds get no exiting visit.
        NodeKind::CodeBlock { .. }
        | NodeKind::Image { .. }
        | NodeKind::Text(_)
        | NodeKind::Code(_)
        | NodeKind::Html(_)
        | NodeKind::SoftBreak
        | NodeKind::HardBreak
        | NodeKind::Rule
        | NodeKind::TaskListMarker { .. } => {}
    }
    Ok(())
}

fn alignment_style(align: Alignment) -> &'static str {
    match align {
        Alignment::Left => r#" style="text-align:left""#,
        Alignment::Center => r#" style="text-align:center""#,
        Alignment::Right => r#" style="text-align:right""#,
        Alignment::None => "",
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
