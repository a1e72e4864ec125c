//! Syntax highlighting for `sheen-renderer` code blocks.
//!
//! The central type is [`CodeBlockRenderer`], a decorator that wraps any
//! node renderer and replaces code blocks with HTML highlighted by
//! [`syntect`]. Everything else passes through to the wrapped renderer,
//! so dropping the decorator in front of an existing pipeline changes
//! nothing but the code blocks.
//!
//! Output defaults to inline style attributes and needs no stylesheet.
//! Class-based output is available for sites that ship their own CSS,
//! together with [`CodeBlockRenderer::write_css`] to export the matching
//! rules.
//!
//! # Examples
//!
//! ```
//! use sheen_highlight::CodeBlockRenderer;
//! use sheen_renderer::markdown_to_html;
//!
//! let renderer = CodeBlockRenderer::builder()
//!     .theme("InspiredGitHub")
//!     .build();
//! let html = markdown_to_html("```rust\nfn main() {}\n```", &renderer);
//! assert!(html.contains("<span"));
//! ```

mod error;
mod formatter;
mod renderer;

pub use error::HighlightError;
pub use formatter::HtmlFormatter;
pub use renderer::{CodeBlockRenderer, CodeBlockRendererBuilder, DEFAULT_THEME};

// Custom themes and syntax sets are built with syntect's own types.
pub use syntect;
