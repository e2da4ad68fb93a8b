//! Curly-brace attribute annotations for markdown token streams.
//!
//! A tokenized markdown document may carry trailing annotation spans in the
//! compact shorthand `{.class #id key=val}`. This crate parses those spans
//! and binds each one to the token it describes: the end of a paragraph or
//! heading, a just-closed inline formatting span, a fenced code block's info
//! string, a list item, or a (possibly nested) list. Tokenizing markdown and
//! rendering HTML stay with the host pipeline; the transform is one explicit
//! stage the host invokes in between.
//!
//! Every failure is local to the annotation that caused it. A span that does
//! not parse, or parses but has nothing to bind to, is left in (or dropped
//! from) the text without touching the rest of the document.
//!
//! ```
//! use curly_parser::{Options, Processor, Token, TokenKind};
//!
//! let src = "warning ahead {.red #alert}";
//! let mut tokens = vec![
//!     Token::new(TokenKind::ParagraphOpen).with_lines(0, 1),
//!     Token::new(TokenKind::Inline)
//!         .with_content(src)
//!         .with_children(vec![Token::new(TokenKind::Text).with_content(src)])
//!         .with_lines(0, 1),
//!     Token::new(TokenKind::ParagraphClose),
//! ];
//!
//! Processor::new(Options::default()).process(src, &mut tokens);
//!
//! assert_eq!(tokens[0].attrs.get("class"), Some("red"));
//! assert_eq!(tokens[0].attrs.get("id"), Some("alert"));
//! ```

mod error;
mod grammar;
mod merge;
mod model;
mod options;
mod resolver;
mod scanner;

pub use error::Error;
pub use grammar::parse_attrs;
pub use merge::merge;
pub use model::{AttributeList, AttributeName, Attributes, LineSpan, Token, TokenKind};
pub use options::{Options, OptionsBuilder};

use resolver::{ListStack, content_column, indent_width, resolve_trailing};
use scanner::{InlineTargets, PendingMerge};
use tracing::instrument;

/// The annotation transform, invoked by the host rendering pipeline after
/// block/inline tokenization and before rendering.
#[derive(Debug, Default)]
pub struct Processor {
    options: Options,
}

impl Processor {
    #[must_use]
    pub fn new(options: Options) -> Self {
        Self { options }
    }

    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Walk the token stream once, binding every recognized annotation and
    /// stripping its text.
    ///
    /// `src` is the markdown source the stream was tokenized from; it is
    /// consulted (through each token's [`LineSpan`]) to read the columns
    /// that disambiguate list bindings. Hosts without source positions can
    /// pass an empty string and get the documented innermost-list fallback.
    ///
    /// Infallible: malformed or unbindable annotations are handled where
    /// they occur and never abort the pass.
    #[instrument(skip_all)]
    pub fn process(&self, src: &str, tokens: &mut Vec<Token>) {
        tracing::trace!(
            typographer = self.options.typographer,
            count = tokens.len(),
            "annotation pass"
        );
        let lines: Vec<&str> = src.lines().collect();
        let mut lists = ListStack::default();
        for index in 0..tokens.len() {
            let Some(kind) = tokens.get(index).map(|token| token.kind) else {
                break;
            };
            if kind.is_list_open() {
                let marker = first_line(&lines, tokens.get(index)).map(indent_width);
                lists.open_list(index, marker);
            } else if kind.is_list_close() {
                lists.close_list();
            } else if kind == TokenKind::ListItemOpen {
                let column = first_line(&lines, tokens.get(index)).and_then(content_column);
                lists.open_item(index, column);
            } else if kind == TokenKind::Fence {
                if let Some(token) = tokens.get_mut(index) {
                    process_fence(token);
                }
            } else if kind == TokenKind::Inline {
                process_inline(&lines, tokens, index, &lists);
            }
        }
    }
}

fn first_line<'a>(lines: &[&'a str], token: Option<&Token>) -> Option<&'a str> {
    let span = token.and_then(|token| token.lines)?;
    lines.get(span.start).copied()
}

fn process_inline(lines: &[&str], tokens: &mut Vec<Token>, index: usize, lists: &ListStack) {
    let trailing = resolve_trailing(tokens, index, lists);
    let column = tokens
        .get(index)
        .and_then(|token| token.lines)
        .and_then(|span| lines.get(span.last_line()))
        .map(|line| indent_width(line));
    // Outside a list a standalone final line still belongs to its own
    // paragraph; inside one, the column decides between item and list.
    let (standalone, standalone_removes_break) = if lists.is_empty() {
        (trailing, false)
    } else {
        (lists.resolve_column(column), true)
    };
    let targets = InlineTargets {
        trailing,
        standalone,
        standalone_removes_break,
    };
    let pending = match tokens.get_mut(index) {
        Some(token) => scanner::scan_inline(&mut token.children, &targets),
        None => Vec::new(),
    };
    for PendingMerge { target, attrs } in pending {
        if let Some(token) = tokens.get_mut(target) {
            tracing::trace!(token = target, ?attrs, "binding annotation");
            merge(&mut token.attrs, &attrs);
        }
    }
}

/// An annotation in a fence's info string binds to the fence itself; a
/// language word before it additionally becomes a `language-*` class after
/// the explicit attributes.
fn process_fence(token: &mut Token) {
    let info = token.info.clone();
    let Some((open, close)) = scanner::trailing_span(&info) else {
        return;
    };
    match parse_attrs(&info, open, close) {
        Ok(attrs) => {
            token.info = info.get(..open).unwrap_or_default().trim_end().to_string();
            if attrs.is_empty() {
                tracing::trace!(
                    error = %Error::EmptyAttributeList,
                    "stripped empty fence annotation"
                );
                return;
            }
            merge(&mut token.attrs, &attrs);
            if let Some(language) = token.info.split_whitespace().next() {
                let class = ("class".to_string(), format!("language-{language}"));
                merge(&mut token.attrs, &[class]);
            }
        }
        Err(error) => {
            tracing::trace!(%error, "leaving unparseable fence annotation untouched");
        }
    }
}
