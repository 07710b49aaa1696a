//! HTML element writers.
//!
//! Produces the markup and utility classes used across the site's templates.

use std::fmt::Write;

use crate::style::{BlockStyle, Decorator, ListKind};

/// Escape text for use in HTML content and attribute values.
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

/// Opening and closing tags for a text block.
pub(crate) fn block_tags(style: BlockStyle) -> (&'static str, &'static str) {
    match style {
        BlockStyle::H1 => (r#"<h1 class="text-4xl font-bold mt-8 mb-4">"#, "</h1>"),
        BlockStyle::H2 => (r#"<h2 class="text-3xl font-bold mt-8 mb-4">"#, "</h2>"),
        BlockStyle::H3 => (r#"<h3 class="text-2xl font-bold mt-6 mb-4">"#, "</h3>"),
        BlockStyle::H4 => (r#"<h4 class="text-xl font-bold mt-6 mb-4">"#, "</h4>"),
        BlockStyle::Normal => (r#"<p class="mb-4 leading-relaxed">"#, "</p>"),
        BlockStyle::Blockquote => (
            r#"<blockquote class="border-l-4 border-blue-700 pl-4 my-6 italic">"#,
            "</blockquote>",
        ),
    }
}

/// Opening tag of a list container.
pub(crate) fn list_start(kind: ListKind, out: &mut String) {
    out.push_str(match kind {
        ListKind::Bullet => r#"<ul class="ml-6 mb-6 list-disc space-y-2">"#,
        ListKind::Number => r#"<ol class="ml-6 mb-6 list-decimal space-y-2">"#,
    });
}

/// Closing tag of a list container.
pub(crate) fn list_end(kind: ListKind, out: &mut String) {
    out.push_str(match kind {
        ListKind::Bullet => "</ul>",
        ListKind::Number => "</ol>",
    });
}

/// Opening and closing tags for a decorator mark.
pub(crate) fn decorator_tags(decorator: Decorator) -> (&'static str, &'static str) {
    match decorator {
        Decorator::Strong => ("<strong>", "</strong>"),
        Decorator::Em => ("<em>", "</em>"),
        Decorator::Code => ("<code>", "</code>"),
        Decorator::Underline => (r#"<span class="underline">"#, "</span>"),
        Decorator::StrikeThrough => ("<del>", "</del>"),
    }
}

/// Whether a link leaves the site and opens in a new browsing context.
pub(crate) fn is_external(href: &str) -> bool {
    href.starts_with("http")
}

/// Opening anchor tag for a link annotation.
pub(crate) fn link_start(href: &str, out: &mut String) {
    let target = if is_external(href) {
        r#" target="_blank" rel="noopener noreferrer""#
    } else {
        ""
    };
    write!(
        out,
        r#"<a href="{}"{target} class="text-blue-700 hover:underline">"#,
        escape_html(href)
    )
    .unwrap();
}

/// Embedded image with a resolved URL.
pub(crate) fn image(src: &str, alt: &str, out: &mut String) {
    write!(
        out,
        r#"<div class="relative w-full h-96 my-8"><img src="{}" alt="{}" class="object-cover rounded-lg" loading="lazy"></div>"#,
        escape_html(src),
        escape_html(alt)
    )
    .unwrap();
}
