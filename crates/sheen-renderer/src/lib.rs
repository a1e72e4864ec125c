//! Tree-based markdown renderer with pluggable node renderers.
//!
//! This crate parses markdown into a [`Node`] tree and renders it through
//! the [`NodeRenderer`] trait, one node per call.
//!
//! # Architecture
//!
//! Parsing and rendering are separate passes. [`parse_document`] assembles
//! the pulldown-cmark event stream into a tree; [`render_document`] walks
//! that tree and hands every node to a [`NodeRenderer`], which returns a
//! [`WalkStatus`] steering the traversal. [`HtmlRenderer`] covers the full
//! node set with semantic HTML5, and custom renderers can decorate it by
//! handling a few kinds themselves and delegating the rest.
//!
//! For syntect-highlighted code blocks, use the `sheen-highlight` crate.
//!
//! # Example
//!
//! ```
//! use sheen_renderer::{HtmlRenderer, markdown_to_html};
//!
//! let html = markdown_to_html("# Hello\n\n**Bold** text", &HtmlRenderer::new());
//! assert_eq!(html, "<h1>Hello</h1><p><strong>Bold</strong> text</p>");
//! ```

mod html;
mod node;
mod parse;
mod renderer;

pub use html::{HtmlRenderer, escape_html};
pub use node::{Alignment, Node, NodeKind, fence_language};
pub use parse::{default_options, parse_document, parse_document_with_options};
pub use renderer::{NodeRenderer, WalkStatus, markdown_to_html, render_document, render_html, walk};

pub use pulldown_cmark::Options;
