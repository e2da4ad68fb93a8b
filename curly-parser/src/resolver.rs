//! Binding of located annotations to stream tokens.
//!
//! Lists are the hard case: the same standalone `{...}` line can belong to
//! the last item of a list or to the list itself, and with nesting, to any
//! enclosing level. Instead of parent pointers on tokens, an explicit stack
//! of open-list records is maintained during the single stream walk and the
//! annotation's source column is matched against each level's recorded
//! marker and content columns, innermost first.

use crate::model::{Token, TokenKind};

/// One open list observed during the stream walk. Popped when the matching
/// list-close token is seen.
#[derive(Debug)]
struct ListContext {
    open_idx: usize,
    /// Indentation of the line carrying the list's first marker.
    marker_column: usize,
    last_item: Option<ItemContext>,
}

#[derive(Clone, Copy, Debug)]
struct ItemContext {
    open_idx: usize,
    /// Column where the item's own content starts, `None` when the host
    /// supplied no usable source position for the item.
    content_column: Option<usize>,
}

/// Stack of currently-open lists, innermost last.
#[derive(Debug, Default)]
pub(crate) struct ListStack(Vec<ListContext>);

impl ListStack {
    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn open_list(&mut self, open_idx: usize, marker_column: Option<usize>) {
        self.0.push(ListContext {
            open_idx,
            marker_column: marker_column.unwrap_or(0),
            last_item: None,
        });
    }

    pub(crate) fn open_item(&mut self, open_idx: usize, content_column: Option<usize>) {
        if let Some(list) = self.0.last_mut() {
            list.last_item = Some(ItemContext {
                open_idx,
                content_column,
            });
        }
    }

    pub(crate) fn close_list(&mut self) {
        self.0.pop();
    }

    fn innermost_list(&self) -> Option<usize> {
        self.0.last().map(|list| list.open_idx)
    }

    pub(crate) fn innermost_item(&self) -> Option<usize> {
        self.0
            .last()
            .and_then(|list| list.last_item)
            .map(|item| item.open_idx)
    }

    /// Match an annotation's source column against the stack, innermost to
    /// outermost: a column at or past a level's item-content column binds
    /// that item, a column at or past the level's marker column binds the
    /// list, anything shallower moves one level out.
    ///
    /// Without a source column the innermost open list is the only
    /// reasonable target.
    pub(crate) fn resolve_column(&self, column: Option<usize>) -> Option<usize> {
        let Some(column) = column else {
            return self.innermost_list();
        };
        for list in self.0.iter().rev() {
            if let Some(item) = list.last_item
                && let Some(content_column) = item.content_column
                && column >= content_column
            {
                return Some(item.open_idx);
            }
            if column >= list.marker_column {
                return Some(list.open_idx);
            }
        }
        None
    }
}

/// Target for an annotation trailing the last text of the inline token at
/// `inline_idx`: the opening token of the enclosing block. The invisible
/// paragraph wrapper of a tight list item delegates to the item itself.
pub(crate) fn resolve_trailing(
    tokens: &[Token],
    inline_idx: usize,
    lists: &ListStack,
) -> Option<usize> {
    let open_idx = inline_idx.checked_sub(1)?;
    let open = tokens.get(open_idx)?;
    if !open.kind.is_block_open() {
        return None;
    }
    if open.kind == TokenKind::ParagraphOpen
        && open.hidden
        && let Some(item_idx) = lists.innermost_item()
    {
        return Some(item_idx);
    }
    Some(open_idx)
}

/// Count of leading whitespace characters; a tab counts one column.
pub(crate) fn indent_width(line: &str) -> usize {
    line.chars()
        .take_while(|ch| *ch == ' ' || *ch == '\t')
        .count()
}

/// Column where a list item's content starts on its first source line:
/// indentation, then a bullet (`-`, `*`, `+`) or an ordered marker (digits
/// plus `.` or `)`), then the whitespace run after the marker.
pub(crate) fn content_column(line: &str) -> Option<usize> {
    let chars: Vec<char> = line.chars().collect();
    let mut i = indent_width(line);
    match chars.get(i).copied() {
        Some('-' | '*' | '+') => i += 1,
        Some(ch) if ch.is_ascii_digit() => {
            while matches!(chars.get(i).copied(), Some(ch) if ch.is_ascii_digit()) {
                i += 1;
            }
            if matches!(chars.get(i).copied(), Some('.' | ')')) {
                i += 1;
            } else {
                return None;
            }
        }
        _ => return None,
    }
    if chars.get(i).is_none() {
        // Bare marker with nothing after it; content would start one past it.
        return Some(i + 1);
    }
    let content = (i..).find(|&j| !matches!(chars.get(j).copied(), Some(' ' | '\t')))?;
    (content > i).then_some(content)
}
