//! Token-stream contract shared with the host tokenizer.

use serde::Serialize;

use super::attributes::Attributes;

/// Kind tags for the stream tokens this transform understands.
///
/// Block-level containers carry explicit open/close tokens; inline formatting
/// spans appear as open/close pairs among the children of an
/// [`Inline`](TokenKind::Inline) token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum TokenKind {
    Inline,
    Text,
    SoftBreak,
    HardBreak,
    CodeInline,
    Fence,
    ParagraphOpen,
    ParagraphClose,
    HeadingOpen,
    HeadingClose,
    BlockquoteOpen,
    BlockquoteClose,
    BulletListOpen,
    BulletListClose,
    OrderedListOpen,
    OrderedListClose,
    ListItemOpen,
    ListItemClose,
    StrongOpen,
    StrongClose,
    EmphasisOpen,
    EmphasisClose,
    StrikethroughOpen,
    StrikethroughClose,
    LinkOpen,
    LinkClose,
}

impl TokenKind {
    /// `true` for the opening token of a bullet or ordered list.
    #[must_use]
    pub fn is_list_open(self) -> bool {
        matches!(self, TokenKind::BulletListOpen | TokenKind::OrderedListOpen)
    }

    /// `true` for the closing token of a bullet or ordered list.
    #[must_use]
    pub fn is_list_close(self) -> bool {
        matches!(
            self,
            TokenKind::BulletListClose | TokenKind::OrderedListClose
        )
    }

    /// `true` for any block-level opening token.
    #[must_use]
    pub fn is_block_open(self) -> bool {
        matches!(
            self,
            TokenKind::ParagraphOpen
                | TokenKind::HeadingOpen
                | TokenKind::BlockquoteOpen
                | TokenKind::ListItemOpen
        ) || self.is_list_open()
    }

    /// `true` for the opening token of an inline formatting span.
    #[must_use]
    pub fn is_span_open(self) -> bool {
        matches!(
            self,
            TokenKind::StrongOpen
                | TokenKind::EmphasisOpen
                | TokenKind::StrikethroughOpen
                | TokenKind::LinkOpen
        )
    }

    /// `true` for the closing token of an inline formatting span.
    #[must_use]
    pub fn is_span_close(self) -> bool {
        matches!(
            self,
            TokenKind::StrongClose
                | TokenKind::EmphasisClose
                | TokenKind::StrikethroughClose
                | TokenKind::LinkClose
        )
    }
}

/// Source line span of a token, zero-based and end-exclusive, the way a
/// markdown-it token map records it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    #[must_use]
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Index of the last source line covered by this span.
    #[must_use]
    pub fn last_line(&self) -> usize {
        self.end.saturating_sub(1).max(self.start)
    }
}

/// One node of the host tokenizer's stream.
///
/// The transform never creates stream tokens; it reads `kind`, `hidden`, and
/// `lines`, and mutates `attrs`, `content`, `info`, and `children` when an
/// annotation is consumed.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    #[serde(skip_serializing_if = "Attributes::is_empty")]
    pub attrs: Attributes,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub content: String,
    /// The info string of a fenced code block (language plus anything after
    /// it); empty for every other kind.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub info: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Token>,
    /// Set on the invisible paragraph wrappers of tight list items.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<LineSpan>,
}

impl Token {
    #[must_use]
    pub fn new(kind: TokenKind) -> Self {
        Self {
            kind,
            attrs: Attributes::default(),
            content: String::new(),
            info: String::new(),
            children: Vec::new(),
            hidden: false,
            lines: None,
        }
    }

    #[must_use]
    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    #[must_use]
    pub fn with_info(mut self, info: impl Into<String>) -> Self {
        self.info = info.into();
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Token>) -> Self {
        self.children = children;
        self
    }

    #[must_use]
    pub fn with_lines(mut self, start: usize, end: usize) -> Self {
        self.lines = Some(LineSpan::new(start, end));
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn kind_classification() {
        assert!(TokenKind::BulletListOpen.is_list_open());
        assert!(TokenKind::OrderedListClose.is_list_close());
        assert!(TokenKind::HeadingOpen.is_block_open());
        assert!(TokenKind::EmphasisOpen.is_span_open());
        assert!(TokenKind::LinkClose.is_span_close());
        assert!(!TokenKind::CodeInline.is_span_close());
        assert!(!TokenKind::Text.is_block_open());
    }

    #[test]
    fn line_span_last_line() {
        assert_eq!(LineSpan::new(3, 5).last_line(), 4);
        assert_eq!(LineSpan::new(2, 2).last_line(), 2);
    }
}
