//! Location of annotation spans in text and inline children.
//!
//! The scanner only finds and strips spans; deciding which token receives
//! the parsed attributes happens in [`resolver`](crate::resolver), and the
//! caller hands the already-resolved targets in. A span that fails to parse
//! is left in the text exactly as written, and a span that was consumed is
//! never looked at again.

use crate::{
    Error,
    grammar::parse_attrs,
    merge::merge,
    model::{AttributeList, Token, TokenKind},
};

/// Binding targets for one inline token, resolved by the caller before the
/// children are rewritten.
#[derive(Debug, Default)]
pub(crate) struct InlineTargets {
    /// Target for an annotation trailing the last text segment.
    pub(crate) trailing: Option<usize>,
    /// Target for an annotation standing alone on the final line.
    pub(crate) standalone: Option<usize>,
    /// Consuming a standalone annotation inside a list removes the break
    /// before it; a paragraph binding keeps the break.
    pub(crate) standalone_removes_break: bool,
}

/// A merge decided during the children walk, applied by the caller once the
/// mutable borrow of the children ends.
#[derive(Debug)]
pub(crate) struct PendingMerge {
    pub(crate) target: usize,
    pub(crate) attrs: AttributeList,
}

enum StandaloneOutcome {
    /// No standalone annotation on the final line.
    NotFound,
    /// Found and either bound or stripped as an empty span.
    Consumed,
    /// Found and valid, but no target existed; the text stays literal and
    /// must not be re-tried by the trailing rule.
    Dropped,
}

/// Rightmost `{...}` span anchored at the very end of `text`, ignoring
/// trailing whitespace. Earlier unmatched `{` characters stay literal:
/// `{{.red}` yields the span over `{.red}` only.
pub(crate) fn trailing_span(text: &str) -> Option<(usize, usize)> {
    let trimmed = text.trim_end();
    if !trimmed.ends_with('}') {
        return None;
    }
    let close = trimmed.len() - 1;
    let open = trimmed.rfind('{')?;
    (open < close).then_some((open, close))
}

/// A span starting at the very first byte of `text`.
fn leading_span(text: &str) -> Option<(usize, usize)> {
    if !text.starts_with('{') {
        return None;
    }
    let close = text.find('}')?;
    Some((0, close))
}

/// A span that is the only thing on the line, apart from whitespace.
fn sole_span(text: &str) -> Option<(usize, usize)> {
    let (open, close) = trailing_span(text)?;
    text.get(..open)?
        .trim()
        .is_empty()
        .then_some((open, close))
}

/// Rewrite the children of one inline token, merging span-level annotations
/// in place and returning the block-level merges for the caller to apply.
pub(crate) fn scan_inline(children: &mut Vec<Token>, targets: &InlineTargets) -> Vec<PendingMerge> {
    let mut pending = Vec::new();
    if children.is_empty() {
        return pending;
    }
    bind_span_annotations(children);
    let standalone = bind_standalone_line(children, targets, &mut pending);
    if !matches!(standalone, StandaloneOutcome::Dropped) {
        bind_trailing_annotation(children, targets, &mut pending);
    }
    pending
}

/// Pass one: annotations immediately after the close of an inline
/// formatting span (or after inline code) bind to that span.
///
/// A stack of open span children stands in for parent pointers: the top of
/// the stack at each close token is the span an immediately-following
/// annotation belongs to, which is what lets chained annotations like
/// `**bold *italics*{.blue}**{.green}` land on different spans.
fn bind_span_annotations(children: &mut [Token]) {
    let mut open_spans: Vec<usize> = Vec::new();
    let mut closed_target: Option<usize> = None;
    for index in 0..children.len() {
        let Some(kind) = children.get(index).map(|child| child.kind) else {
            break;
        };
        let target = closed_target.take();
        if kind.is_span_open() {
            open_spans.push(index);
        } else if kind.is_span_close() {
            closed_target = open_spans.pop();
        } else if kind == TokenKind::CodeInline {
            closed_target = Some(index);
        } else if kind == TokenKind::Text
            && let Some(target) = target
        {
            bind_leading_annotation(children, index, target);
        }
    }
}

fn bind_leading_annotation(children: &mut [Token], index: usize, target: usize) {
    let Some(content) = children.get(index).map(|child| child.content.clone()) else {
        return;
    };
    let Some((open, close)) = leading_span(&content) else {
        return;
    };
    match parse_attrs(&content, open, close) {
        Ok(attrs) => {
            if let Some(child) = children.get_mut(index) {
                child.content = content.get(close + 1..).unwrap_or_default().to_string();
            }
            if attrs.is_empty() {
                tracing::trace!(error = %Error::EmptyAttributeList, "stripped empty span annotation");
            } else if let Some(span_open) = children.get_mut(target) {
                merge(&mut span_open.attrs, &attrs);
            }
        }
        Err(error) => {
            tracing::trace!(%error, "leaving unparseable span annotation untouched");
        }
    }
}

/// Pass two: a final line consisting of nothing but one span, preceded by a
/// soft or hard break.
fn bind_standalone_line(
    children: &mut Vec<Token>,
    targets: &InlineTargets,
    pending: &mut Vec<PendingMerge>,
) -> StandaloneOutcome {
    let count = children.len();
    let Some(last) = children.last() else {
        return StandaloneOutcome::NotFound;
    };
    if last.kind != TokenKind::Text || count < 2 {
        return StandaloneOutcome::NotFound;
    }
    let on_own_line = children
        .get(count - 2)
        .is_some_and(|before| matches!(before.kind, TokenKind::SoftBreak | TokenKind::HardBreak));
    if !on_own_line {
        return StandaloneOutcome::NotFound;
    }
    let content = last.content.clone();
    let Some((open, close)) = sole_span(&content) else {
        return StandaloneOutcome::NotFound;
    };
    match parse_attrs(&content, open, close) {
        Ok(attrs) => {
            let keep = if targets.standalone_removes_break {
                count - 2
            } else {
                count - 1
            };
            if attrs.is_empty() {
                children.truncate(keep);
                tracing::trace!(
                    error = %Error::EmptyAttributeList,
                    "stripped empty standalone annotation"
                );
                return StandaloneOutcome::Consumed;
            }
            let Some(target) = targets.standalone else {
                tracing::debug!(
                    error = %Error::NoBindingTarget(content),
                    "dropping standalone annotation"
                );
                return StandaloneOutcome::Dropped;
            };
            children.truncate(keep);
            pending.push(PendingMerge { target, attrs });
            StandaloneOutcome::Consumed
        }
        Err(error) => {
            tracing::trace!(%error, "leaving unparseable standalone annotation untouched");
            StandaloneOutcome::NotFound
        }
    }
}

/// Pass three: an annotation ending the last text segment, bound to the
/// enclosing block.
fn bind_trailing_annotation(
    children: &mut Vec<Token>,
    targets: &InlineTargets,
    pending: &mut Vec<PendingMerge>,
) {
    let Some(last) = children.last() else {
        return;
    };
    if last.kind != TokenKind::Text {
        return;
    }
    let content = last.content.clone();
    let Some((open, close)) = trailing_span(&content) else {
        return;
    };
    match parse_attrs(&content, open, close) {
        Ok(attrs) => {
            if attrs.is_empty() {
                strip_last_text(children, &content, open);
                tracing::trace!(
                    error = %Error::EmptyAttributeList,
                    "stripped empty trailing annotation"
                );
                return;
            }
            let Some(target) = targets.trailing else {
                tracing::debug!(
                    error = %Error::NoBindingTarget(content),
                    "dropping trailing annotation"
                );
                return;
            };
            strip_last_text(children, &content, open);
            pending.push(PendingMerge { target, attrs });
        }
        Err(error) => {
            tracing::trace!(%error, "leaving unparseable trailing annotation untouched");
        }
    }
}

/// Cut the span (and the whitespace run before it) off the last text child,
/// removing the child entirely when nothing remains.
fn strip_last_text(children: &mut Vec<Token>, content: &str, open: usize) {
    let stripped = content.get(..open).unwrap_or_default().trim_end();
    if stripped.is_empty() {
        children.pop();
    } else if let Some(last) = children.last_mut() {
        last.content = stripped.to_string();
    }
}
