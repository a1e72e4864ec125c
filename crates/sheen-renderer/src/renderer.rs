//! Node renderer trait and document tree walker.
//!
//! # Architecture
//!
//! Rendering is split from parsing: [`parse_document`](crate::parse_document)
//! builds the tree, a [`NodeRenderer`] decides markup node by node, and
//! [`walk`] drives the traversal. Renderers compose by delegation: a
//! specialized renderer handles the kinds it cares about and forwards the
//! rest to an inner renderer, so capabilities stack without the walker
//! knowing about any of them.
//!
//! # Example
//!
//! ```
//! use std::io::{self, Write};
//!
//! use sheen_renderer::{Node, NodeKind, NodeRenderer, WalkStatus, parse_document, render_html};
//!
//! /// Renders every heading one level deeper than written.
//! struct DemotedHeadings;
//!
//! impl NodeRenderer for DemotedHeadings {
//!     fn render_node(
//!         &self,
//!         out: &mut dyn Write,
//!         node: &Node,
//!         entering: bool,
//!     ) -> io::Result<WalkStatus> {
//!         match &node.kind {
//!             NodeKind::Heading { level } => {
//!                 let level = (*level + 1).min(6);
//!                 if entering {
//!                     write!(out, "<h{level}>")?;
//!                 } else {
//!                     write!(out, "</h{level}>")?;
//!                 }
//!             }
//!             NodeKind::Text(text) => {
//!                 if entering {
//!                     out.write_all(text.as_bytes())?;
//!                 }
//!             }
//!             _ => {}
//!         }
//!         Ok(WalkStatus::Continue)
//!     }
//! }
//!
//! let doc = parse_document("# Title");
//! assert_eq!(render_html(&doc, &DemotedHeadings), "<h2>Title</h2>");
//! ```

use std::io::{self, Write};

use crate::node::Node;
use crate::parse::parse_document;

/// Traversal signal returned by [`NodeRenderer::render_node`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WalkStatus {
    /// Continue the walk normally.
    Continue,
    /// Do not descend into the current node's children. The node's own
    /// exiting visit still fires.
    SkipChildren,
    /// Stop the walk. When returned from a container's entering visit,
    /// that container's exiting visit still fires; nothing else is
    /// closed as the walk unwinds.
    Terminate,
}

/// Per-node rendering capability driven by [`walk`].
///
/// Implementations take `&self`: a renderer holds configuration, not
/// per-pass state, so one instance can serve concurrent passes over
/// distinct sinks.
pub trait NodeRenderer {
    /// Render a single node.
    ///
    /// Container nodes are visited twice, once with `entering` true and
    /// once with it false; leaf nodes get only the entering visit. The
    /// returned [`WalkStatus`] steers the walker; sink errors abort the
    /// walk and propagate to the caller.
    fn render_node(
        &self,
        out: &mut dyn Write,
        node: &Node,
        entering: bool,
    ) -> io::Result<WalkStatus>;

    /// Write prologue markup before the tree walk. Default: nothing.
    fn render_header(&self, _out: &mut dyn Write, _root: &Node) -> io::Result<()> {
        Ok(())
    }

    /// Write epilogue markup after the tree walk. Default: nothing.
    fn render_footer(&self, _out: &mut dyn Write, _root: &Node) -> io::Result<()> {
        Ok(())
    }
}

enum Visit<'a> {
    Enter(&'a Node),
    Exit(&'a Node),
}

/// Walk a subtree depth-first, visiting each node through `renderer`.
///
/// Containers are entered, their children walked, then exited. A
/// [`SkipChildren`](WalkStatus::SkipChildren) from the entering visit
/// suppresses the children but not the exiting visit. A
/// [`Terminate`](WalkStatus::Terminate) stops the walk; if it came from a
/// container's entering visit, that container is still closed before the
/// walk unwinds.
///
/// The traversal keeps its own stack, so nesting depth is bounded by
/// memory rather than the call stack.
pub fn walk<R>(node: &Node, renderer: &R, out: &mut dyn Write) -> io::Result<WalkStatus>
where
    R: NodeRenderer + ?Sized,
{
    let mut stack = vec![Visit::Enter(node)];
    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(node) => {
                let is_container = node.is_container();
                let status = renderer.render_node(out, node, true)?;
                if status == WalkStatus::Terminate {
                    if is_container {
                        renderer.render_node(out, node, false)?;
                    }
                    return Ok(WalkStatus::Terminate);
                }
                if is_container {
                    stack.push(Visit::Exit(node));
                    if status != WalkStatus::SkipChildren {
                        stack.extend(node.children.iter().rev().map(Visit::Enter));
                    }
                }
            }
            Visit::Exit(node) => {
                if renderer.render_node(out, node, false)? == WalkStatus::Terminate {
                    return Ok(WalkStatus::Terminate);
                }
            }
        }
    }
    Ok(WalkStatus::Continue)
}

/// Render a document: header, full tree walk, footer.
pub fn render_document<R>(root: &Node, renderer: &R, out: &mut dyn Write) -> io::Result<()>
where
    R: NodeRenderer + ?Sized,
{
    renderer.render_header(out, root)?;
    walk(root, renderer, out)?;
    renderer.render_footer(out, root)
}

/// Render a document into a `String` via an in-memory sink.
///
/// Intended for renderers that only fail when the sink fails; with an
/// in-memory sink those writes are infallible.
#[must_use]
pub fn render_html<R>(root: &Node, renderer: &R) -> String
where
    R: NodeRenderer + ?Sized,
{
    let mut out = Vec::new();
    render_document(root, renderer, &mut out).unwrap();
    String::from_utf8_lossy(&out).into_owned()
}

/// Parse markdown and render it in one step with the default options.
#[must_use]
pub fn markdown_to_html<R>(markdown: &str, renderer: &R) -> String
where
    R: NodeRenderer + ?Sized,
{
    render_html(&parse_document(markdown), renderer)
}
