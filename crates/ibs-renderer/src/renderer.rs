//! Portable Text to HTML renderer.

use std::cmp::Reverse;

use ibs_content::{Block, ImageRef, ImageUrlBuilder, Node, Span};

use crate::html::{
    block_tags, decorator_tags, escape_html, image, link_start, list_end, list_start,
};
use crate::style::{BlockStyle, Decorator, ListKind};

/// Deepest list nesting rendered; deeper items are kept at this level.
const MAX_LIST_DEPTH: usize = 10;

/// Alt text used when an embedded image has none.
const DEFAULT_ALT: &str = "Image";

/// Result of rendering rich text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderResult {
    /// Rendered HTML fragment.
    pub html: String,
    /// Warnings generated during rendering (unsupported styles, marks, node types).
    pub warnings: Vec<String>,
}

/// A mark opened on the current inline run.
struct OpenMark<'a> {
    key: &'a str,
    close: &'static str,
}

/// Renders Portable Text nodes into an HTML fragment.
///
/// Blocks are emitted in input order. Consecutive list items are grouped into
/// `<ul>`/`<ol>` containers nested by their level. Unknown block styles fall
/// back to a paragraph, unknown marks leave their text unwrapped, and unknown
/// node types are skipped; each of these records a warning.
pub struct PortableTextRenderer<'a> {
    images: &'a ImageUrlBuilder,
    output: String,
    /// Open list containers, outermost first. Each one has an open `<li>`.
    list_stack: Vec<ListKind>,
    warnings: Vec<String>,
}

impl<'a> PortableTextRenderer<'a> {
    /// Create a renderer resolving embedded images with `images`.
    #[must_use]
    pub fn new(images: &'a ImageUrlBuilder) -> Self {
        Self {
            images,
            output: String::with_capacity(4096),
            list_stack: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Render a sequence of nodes.
    pub fn render(mut self, nodes: &[Node]) -> RenderResult {
        for node in nodes {
            match node {
                Node::Block(block) => match &block.list_item {
                    Some(kind) => self.list_item(kind, block),
                    None => {
                        self.close_lists(0);
                        self.text_block(block);
                    }
                },
                Node::Image(img) => {
                    self.close_lists(0);
                    self.image(img);
                }
                Node::Unknown(kind) => {
                    self.close_lists(0);
                    self.warn(format!("Unsupported content type skipped: {kind}"));
                }
            }
        }
        self.close_lists(0);

        RenderResult {
            html: self.output,
            warnings: self.warnings,
        }
    }

    fn text_block(&mut self, block: &Block) {
        let style = BlockStyle::parse(&block.style).unwrap_or_else(|| {
            self.warn(format!(
                "Unsupported block style '{}', rendered as paragraph",
                block.style
            ));
            BlockStyle::Normal
        });
        let (open, close) = block_tags(style);
        self.output.push_str(open);
        self.spans(block);
        self.output.push_str(close);
    }

    fn list_item(&mut self, kind: &str, block: &Block) {
        let kind = ListKind::parse(kind).unwrap_or_else(|| {
            self.warn(format!("Unsupported list type '{kind}', rendered as bullet list"));
            ListKind::Bullet
        });
        let level = usize::try_from(block.level.unwrap_or(1).max(1)).unwrap_or(MAX_LIST_DEPTH);
        let level = if level > MAX_LIST_DEPTH {
            self.warn(format!("List level {level} exceeds {MAX_LIST_DEPTH}, clamped"));
            MAX_LIST_DEPTH
        } else {
            level
        };

        self.close_lists(level);
        if self.list_stack.len() == level {
            if self.list_stack.last() == Some(&kind) {
                self.output.push_str("</li>");
            } else {
                self.close_lists(level - 1);
            }
        }
        while self.list_stack.len() < level {
            list_start(kind, &mut self.output);
            self.list_stack.push(kind);
            // Skipped levels get a bare item to hold the deeper list
            if self.list_stack.len() < level {
                self.output.push_str("<li>");
            }
        }

        self.output.push_str("<li>");
        self.spans(block);
    }

    /// Close open lists until at most `depth` remain.
    fn close_lists(&mut self, depth: usize) {
        while self.list_stack.len() > depth {
            if let Some(kind) = self.list_stack.pop() {
                self.output.push_str("</li>");
                list_end(kind, &mut self.output);
            }
        }
    }

    fn image(&mut self, img: &ImageRef) {
        match self.images.url(img) {
            Some(src) => {
                let alt = img.alt.as_deref().unwrap_or(DEFAULT_ALT);
                image(&src, alt, &mut self.output);
            }
            None => tracing::debug!("Embedded image without resolvable asset omitted"),
        }
    }

    /// Render the inline runs of a block.
    ///
    /// Marks shared by adjacent spans stay open across them; marks that last
    /// longer are opened first so they enclose shorter ones.
    fn spans(&mut self, block: &Block) {
        let mut open: Vec<OpenMark<'_>> = Vec::new();

        for (index, span) in block.children.iter().enumerate() {
            let keep = open
                .iter()
                .take_while(|mark| span.marks.iter().any(|m| m == mark.key))
                .count();
            while open.len() > keep {
                if let Some(mark) = open.pop() {
                    self.output.push_str(mark.close);
                }
            }

            let mut starting: Vec<&str> = span
                .marks
                .iter()
                .map(String::as_str)
                .filter(|m| !open.iter().any(|o| o.key == *m))
                .collect();
            starting.sort_by_key(|m| Reverse(run_length(&block.children[index..], m)));

            for key in starting {
                if let Some(close) = self.open_mark(block, key) {
                    open.push(OpenMark { key, close });
                }
            }

            self.output.push_str(&escape_html(&span.text));
        }

        while let Some(mark) = open.pop() {
            self.output.push_str(mark.close);
        }
    }

    /// Write the opening tag for a mark and return its closing tag.
    ///
    /// Returns `None` when the mark is not rendered.
    fn open_mark(&mut self, block: &Block, key: &str) -> Option<&'static str> {
        if let Some(def) = block.mark_defs.iter().find(|def| def.key == key) {
            if def.kind != "link" {
                self.warn(format!("Unsupported annotation '{}' ignored", def.kind));
                return None;
            }
            let Some(href) = def.href.as_deref() else {
                self.warn("Link without href rendered as plain text".to_owned());
                return None;
            };
            link_start(href, &mut self.output);
            return Some("</a>");
        }

        if let Some(decorator) = Decorator::parse(key) {
            let (open, close) = decorator_tags(decorator);
            self.output.push_str(open);
            return Some(close);
        }

        self.warn(format!("Unsupported mark '{key}' ignored"));
        None
    }

    fn warn(&mut self, warning: String) {
        if !self.warnings.contains(&warning) {
            tracing::warn!(%warning, "Rich text rendering");
            self.warnings.push(warning);
        }
    }
}

/// Number of consecutive spans, starting at the first, carrying `mark`.
fn run_length(spans: &[Span], mark: &str) -> usize {
    spans
        .iter()
        .take_while(|span| span.marks.iter().any(|m| m == mark))
        .count()
}

/// Render rich text with a fresh [`PortableTextRenderer`].
pub fn render_portable_text(nodes: &[Node], images: &ImageUrlBuilder) -> RenderResult {
    PortableTextRenderer::new(images).render(nodes)
}

/// Concatenated text of all text blocks, one paragraph per block.
///
/// Used for excerpts and meta descriptions.
pub fn plain_text(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        if let Node::Block(block) = node {
            if !out.is_empty() {
                out.push_str("\n\n");
            }
            for span in &block.children {
                out.push_str(&span.text);
            }
        }
    }
    out
}
