//! Markdown parsing into a document tree.
//!
//! Wraps the pulldown-cmark event stream and assembles it into a [`Node`]
//! tree rooted at [`NodeKind::Document`]. Code block content is buffered
//! into a single literal, image inline content is flattened into alt text,
//! and table cells are annotated with header position and column alignment
//! so renderers never need parser state of their own.

use pulldown_cmark::{
    Alignment as ParserAlignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd,
};

use crate::node::{Alignment, Node, NodeKind};

/// Default parser options: tables, strikethrough, and task lists.
#[must_use]
pub fn default_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Parse markdown into a document tree using [`default_options`].
#[must_use]
pub fn parse_document(markdown: &str) -> Node {
    parse_document_with_options(markdown, default_options())
}

/// Parse markdown into a document tree with explicit parser options.
#[must_use]
pub fn parse_document_with_options(markdown: &str, options: Options) -> Node {
    let mut builder = TreeBuilder::new();
    for event in Parser::new_ext(markdown, options) {
        builder.event(event);
    }
    builder.finish()
}

/// Image capture in progress between `Start(Image)` and `End(Image)`.
struct PendingImage {
    dest: String,
    title: String,
    alt: String,
    /// Nesting depth of images inside the description; only the
    /// outermost `End(Image)` closes the capture.
    depth: usize,
}

/// Assembles parser events into a tree.
///
/// `stack[0]` is the document root; `open` pushes a container, `close`
/// pops it into its parent's children.
struct TreeBuilder {
    stack: Vec<Node>,
    /// Open code block as (info, literal), buffered until its end tag.
    code: Option<(String, String)>,
    image: Option<PendingImage>,
    table_aligns: Vec<Alignment>,
    in_table_head: bool,
    table_col: usize,
    /// Nesting depth of containers whose content is dropped entirely.
    skip_depth: usize,
}

impl TreeBuilder {
    fn new() -> Self {
        Self {
            stack: vec![Node::new(NodeKind::Document)],
            code: None,
            image: None,
            table_aligns: Vec::new(),
            in_table_head: false,
            table_col: 0,
            skip_depth: 0,
        }
    }

    /// Append a finished node to the innermost open container.
    fn append(&mut self, node: Node) {
        if let Some(parent) = self.stack.last_mut() {
            parent.children.push(node);
        }
    }

    /// Open a new container.
    fn open(&mut self, kind: NodeKind) {
        self.stack.push(Node::new(kind));
    }

    /// Close the innermost container, attaching it to its parent.
    /// The document root is never closed.
    fn close(&mut self) {
        if self.stack.len() > 1 {
            if let Some(node) = self.stack.pop() {
                self.append(node);
            }
        }
    }

    fn event(&mut self, event: Event<'_>) {
        if self.skip_depth > 0 {
            match event {
                Event::Start(Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_)) => {
                    self.skip_depth += 1;
                }
                Event::End(TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_)) => {
                    self.skip_depth -= 1;
                }
                _ => {}
            }
            return;
        }

        // Inside an image, inline content flattens to alt text.
        if let Some(image) = self.image.as_mut() {
            match event {
                Event::Start(Tag::Image { .. }) => image.depth += 1,
                Event::End(TagEnd::Image) => {
                    if image.depth > 0 {
                        image.depth -= 1;
                    } else if let Some(PendingImage { dest, title, alt, .. }) = self.image.take() {
                        self.append(Node::new(NodeKind::Image { dest, title, alt }));
                    }
                }
                Event::Text(text) => image.alt.push_str(&text),
                Event::Code(code) => image.alt.push_str(&code),
                Event::SoftBreak | Event::HardBreak => image.alt.push(' '),
                _ => {}
            }
            return;
        }

        // Inside a code block, only text arrives; buffer it verbatim.
        if let Some((_, literal)) = self.code.as_mut() {
            match event {
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((info, literal)) = self.code.take() {
                        self.append(Node::new(NodeKind::CodeBlock { info, literal }));
                    }
                }
                Event::Text(text) => literal.push_str(&text),
                Event::SoftBreak => literal.push('\n'),
                _ => {}
            }
            return;
        }

        match event {
            Event::Start(tag) => self.start_tag(tag),
            Event::End(tag) => self.end_tag(tag),
            Event::Text(text) => self.append(Node::new(NodeKind::Text(text.into_string()))),
            Event::Code(code) => self.append(Node::new(NodeKind::Code(code.into_string()))),
            Event::Html(html) | Event::InlineHtml(html) => {
                self.append(Node::new(NodeKind::Html(html.into_string())));
            }
            Event::SoftBreak => self.append(Node::new(NodeKind::SoftBreak)),
            Event::HardBreak => self.append(Node::new(NodeKind::HardBreak)),
            Event::Rule => self.append(Node::new(NodeKind::Rule)),
            Event::TaskListMarker(checked) => {
                self.append(Node::new(NodeKind::TaskListMarker { checked }));
            }
            Event::FootnoteReference(_) | Event::InlineMath(_) | Event::DisplayMath(_) => {
                // Not supported
            }
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => self.open(NodeKind::Paragraph),
            Tag::Heading { level, .. } => self.open(NodeKind::Heading {
                level: heading_level_to_num(level),
            }),
            Tag::BlockQuote(_) => self.open(NodeKind::BlockQuote),
            Tag::CodeBlock(kind) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => info.into_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                self.code = Some((info, String::new()));
            }
            Tag::List(start) => self.open(NodeKind::List { start }),
            Tag::Item => self.open(NodeKind::Item),
            Tag::Table(alignments) => {
                let alignments: Vec<Alignment> =
                    alignments.iter().map(|a| convert_alignment(*a)).collect();
                self.table_aligns.clone_from(&alignments);
                self.open(NodeKind::Table { alignments });
            }
            Tag::TableHead => {
                self.in_table_head = true;
                self.table_col = 0;
                self.open(NodeKind::TableHead);
            }
            Tag::TableRow => {
                self.table_col = 0;
                self.open(NodeKind::TableRow);
            }
            Tag::TableCell => {
                let align = self
                    .table_aligns
                    .get(self.table_col)
                    .copied()
                    .unwrap_or_default();
                self.open(NodeKind::TableCell {
                    header: self.in_table_head,
                    align,
                });
            }
            Tag::Emphasis => self.open(NodeKind::Emphasis),
            Tag::Strong => self.open(NodeKind::Strong),
            Tag::Strikethrough => self.open(NodeKind::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => self.open(NodeKind::Link {
                dest: dest_url.into_string(),
                title: title.into_string(),
            }),
            Tag::Image {
                dest_url, title, ..
            } => {
                self.image = Some(PendingImage {
                    dest: dest_url.into_string(),
                    title: title.into_string(),
                    alt: String::new(),
                    depth: 0,
                });
            }
            Tag::FootnoteDefinition(_) | Tag::MetadataBlock(_) => {
                self.skip_depth = 1;
            }
            // Transparent: no node of their own, content flows to the parent.
            Tag::HtmlBlock
            | Tag::DefinitionList
            | Tag::DefinitionListTitle
            | Tag::DefinitionListDefinition
            | Tag::Superscript
            | Tag::Subscript => {}
        }
    }

    fn end_tag(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph
            | TagEnd::Heading(_)
            | TagEnd::BlockQuote(_)
            | TagEnd::List(_)
            | TagEnd::Item
            | TagEnd::Table
            | TagEnd::TableRow
            | TagEnd::Emphasis
            | TagEnd::Strong
            | TagEnd::Strikethrough
            | TagEnd::Link => self.close(),
            TagEnd::TableHead => {
                self.in_table_head = false;
                self.close();
            }
            TagEnd::TableCell => {
                self.close();
                self.table_col += 1;
            }
            // Consumed by the code block and image guards; a stray end
            // tag without a matching start is dropped.
            TagEnd::CodeBlock | TagEnd::Image => {}
            // Consumed by the skip guard.
            TagEnd::FootnoteDefinition | TagEnd::MetadataBlock(_) => {}
            TagEnd::HtmlBlock
            | TagEnd::DefinitionList
            | TagEnd::DefinitionListTitle
            | TagEnd::DefinitionListDefinition
            | TagEnd::Superscript
            | TagEnd::Subscript => {}
        }
    }

    /// Finish the tree, closing any containers left open by malformed input.
    fn finish(mut self) -> Node {
        if let Some((info, literal)) = self.code.take() {
            self.append(Node::new(NodeKind::CodeBlock { info, literal }));
        }
        if let Some(PendingImage { dest, title, alt, .. }) = self.image.take() {
            self.append(Node::new(NodeKind::Image { dest, title, alt }));
        }
        while self.stack.len() > 1 {
            self.close();
        }
        self.stack
            .pop()
            .unwrap_or_else(|| Node::new(NodeKind::Document))
    }
}

/// Convert heading level enum to number (1-6).
fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}

fn convert_alignment(align: ParserAlignment) -> Alignment {
    match align {
        ParserAlignment::None => Alignment::None,
        ParserAlignment::Left => Alignment::Left,
        ParserAlignment::Center => Alignment::Center,
        ParserAlignment::Right => Alignment::Right,
    }
}
