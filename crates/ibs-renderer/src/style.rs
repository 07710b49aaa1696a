//! Closed sets of block styles, list kinds and decorators.
//!
//! Unrecognised names map to `None`; the renderer decides the fallback.

/// Text block style.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BlockStyle {
    H1,
    H2,
    H3,
    H4,
    Normal,
    Blockquote,
}

impl BlockStyle {
    pub(crate) fn parse(style: &str) -> Option<Self> {
        match style {
            "h1" => Some(Self::H1),
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            "normal" => Some(Self::Normal),
            "blockquote" => Some(Self::Blockquote),
            _ => None,
        }
    }
}

/// List container kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ListKind {
    Bullet,
    Number,
}

impl ListKind {
    pub(crate) fn parse(kind: &str) -> Option<Self> {
        match kind {
            "bullet" => Some(Self::Bullet),
            "number" => Some(Self::Number),
            _ => None,
        }
    }
}

/// Inline decorator mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Decorator {
    Strong,
    Em,
    Code,
    Underline,
    StrikeThrough,
}

impl Decorator {
    pub(crate) fn parse(mark: &str) -> Option<Self> {
        match mark {
            "strong" => Some(Self::Strong),
            "em" => Some(Self::Em),
            "code" => Some(Self::Code),
            "underline" => Some(Self::Underline),
            "strike-through" => Some(Self::StrikeThrough),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_style_closed_set() {
        assert_eq!(BlockStyle::parse("h2"), Some(BlockStyle::H2));
        assert_eq!(BlockStyle::parse("blockquote"), Some(BlockStyle::Blockquote));
        assert_eq!(BlockStyle::parse("h5"), None);
        assert_eq!(BlockStyle::parse("H2"), None);
    }

    #[test]
    fn test_list_and_decorator_names() {
        assert_eq!(ListKind::parse("number"), Some(ListKind::Number));
        assert_eq!(ListKind::parse("check"), None);
        assert_eq!(Decorator::parse("strike-through"), Some(Decorator::StrikeThrough));
        assert_eq!(Decorator::parse("highlight"), None);
    }
}
