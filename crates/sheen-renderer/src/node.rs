//! Document tree produced by the markdown parser.
//!
//! Nodes are plain data: a [`NodeKind`] plus children. Renderers walk the
//! tree and decide markup per kind, so the tree itself carries no output
//! format assumptions.

/// Column alignment for table cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Alignment {
    /// No explicit alignment.
    #[default]
    None,
    /// Left-aligned column.
    Left,
    /// Center-aligned column.
    Center,
    /// Right-aligned column.
    Right,
}

/// A node in the document tree.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// What this node is.
    pub kind: NodeKind,
    /// Child nodes, empty for leaf kinds.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no children.
    #[must_use]
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            children: Vec::new(),
        }
    }

    /// Whether this node's kind holds children.
    #[must_use]
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }
}

impl Drop for Node {
    // The default recursive drop overflows the stack on deeply nested
    // trees, so the subtree is drained into a flat worklist instead.
    fn drop(&mut self) {
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// Kind of a document tree node.
///
/// Container kinds carry their content as child nodes; leaf kinds carry it
/// inline (e.g. [`CodeBlock`](Self::CodeBlock) holds its full literal, and
/// [`Image`](Self::Image) holds its flattened alt text).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeKind {
    /// Root of the tree.
    Document,
    /// Paragraph block.
    Paragraph,
    /// Heading with level 1-6.
    Heading {
        /// Heading level (1-6).
        level: u8,
    },
    /// Blockquote block.
    BlockQuote,
    /// Fenced or indented code block.
    ///
    /// `info` is the raw fence info string (empty for indented blocks);
    /// `literal` is the complete code content.
    CodeBlock {
        /// Raw fence info string (e.g. `rust,no_run`).
        info: String,
        /// Code content, newlines preserved.
        literal: String,
    },
    /// Ordered (`start` is `Some`) or unordered list.
    List {
        /// First item number for ordered lists.
        start: Option<u64>,
    },
    /// List item.
    Item,
    /// Table with per-column alignments.
    Table {
        /// Column alignments from the delimiter row.
        alignments: Vec<Alignment>,
    },
    /// Table header row container.
    TableHead,
    /// Table body row.
    TableRow,
    /// Table cell, annotated with its position.
    TableCell {
        /// Whether this cell sits in the header row.
        header: bool,
        /// Column alignment for this cell.
        align: Alignment,
    },
    /// Emphasis span.
    Emphasis,
    /// Strong span.
    Strong,
    /// Strikethrough span.
    Strikethrough,
    /// Link with destination and optional title.
    Link {
        /// Link destination URL.
        dest: String,
        /// Title attribute, empty when absent.
        title: String,
    },
    /// Image with destination, optional title, and flattened alt text.
    Image {
        /// Image source URL.
        dest: String,
        /// Title attribute, empty when absent.
        title: String,
        /// Alt text collected from the image's inline content.
        alt: String,
    },
    /// Plain text run.
    Text(String),
    /// Inline code span.
    Code(String),
    /// Raw block or inline HTML, passed through verbatim.
    Html(String),
    /// Soft line break.
    SoftBreak,
    /// Hard line break.
    HardBreak,
    /// Thematic break.
    Rule,
    /// Task list checkbox marker.
    TaskListMarker {
        /// Whether the checkbox is checked.
        checked: bool,
    },
}

impl NodeKind {
    /// Whether nodes of this kind hold child nodes.
    ///
    /// Container-ness is a property of the kind, not the current child
    /// count: an empty paragraph is still a container and gets both an
    /// entering and an exiting visit during a walk.
    #[must_use]
    pub fn is_container(&self) -> bool {
        match self {
            Self::Document
            | Self::Paragraph
            | Self::Heading { .. }
            | Self::BlockQuote
            | Self::List { .. }
            | Self::Item
            | Self::Table { .. }
            | Self::TableHead
            | Self::TableRow
            | Self::TableCell { .. }
            | Self::Emphasis
            | Self::Strong
            | Self::Strikethrough
            | Self::Link { .. } => true,
            Self::CodeBlock { .. }
            | Self::Image { .. }
            | Self::Text(_)
            | Self::Code(_)
            | Self::Html(_)
            | Self::SoftBreak
            | Self::HardBreak
            | Self::Rule
            | Self::TaskListMarker { .. } => false,
        }
    }
}

/// Extract the language token from a fence info string.
///
/// The language is the first token, split on whitespace or commas, so
/// annotated fences like `rust,no_run` or `python title="ex"` still
/// identify their language. Returns `None` for empty or blank info.
///
/// # Examples
///
/// ```
/// use sheen_renderer::fence_language;
///
/// assert_eq!(fence_language("rust"), Some("rust"));
/// assert_eq!(fence_language("rust,no_run"), Some("rust"));
/// assert_eq!(fence_language("c hl_lines=2"), Some("c"));
/// assert_eq!(fence_language(""), None);
/// ```
#[must_use]
pub fn fence_language(info: &str) -> Option<&str> {
    info.trim()
        .split([' ', '\t', ','])
        .next()
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_fence_language_plain() {
        assert_eq!(fence_language("rust"), Some("rust"));
    }

    #[test]
    fn test_fence_language_comma_annotations() {
        assert_eq!(fence_language("rust,no_run,ignore"), Some("rust"));
    }

    #[test]
    fn test_fence_language_space_annotations() {
        assert_eq!(fence_language("python title=\"example\""), Some("python"));
    }

    #[test]
    fn test_fence_language_surrounding_whitespace() {
        assert_eq!(fence_language("  go  "), Some("go"));
    }

    #[test]
    fn test_fence_language_empty() {
        assert_eq!(fence_language(""), None);
        assert_eq!(fence_language("   "), None);
    }

    #[test]
    fn test_container_kinds() {
        assert!(NodeKind::Document.is_container());
        assert!(NodeKind::Paragraph.is_container());
        assert!(NodeKind::Heading { level: 2 }.is_container());
        assert!(NodeKind::Link {
            dest: "https://example.com".to_owned(),
            title: String::new(),
        }
        .is_container());
        assert!(NodeKind::TableCell {
            header: false,
            align: Alignment::None,
        }
        .is_container());
    }

    #[test]
    fn test_leaf_kinds() {
        assert!(!NodeKind::Text("hi".to_owned()).is_container());
        assert!(
            !NodeKind::CodeBlock {
                info: "rust".to_owned(),
                literal: "fn main() {}\n".to_owned(),
            }
            .is_container()
        );
        assert!(
            !NodeKind::Image {
                dest: "a.png".to_owned(),
                title: String::new(),
                alt: "alt".to_owned(),
            }
            .is_container()
        );
        assert!(!NodeKind::Rule.is_container());
        assert!(!NodeKind::TaskListMarker { checked: true }.is_container());
    }

    #[test]
    fn test_empty_container_stays_container() {
        let node = Node::new(NodeKind::Paragraph);
        assert!(node.children.is_empty());
        assert!(node.is_container());
    }
}
