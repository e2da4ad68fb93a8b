//! Application of a parsed attribute list onto a token's attribute mapping.

use crate::model::{AttributeName, Attributes};

/// Merge `list` into `attrs`, in item order.
///
/// `class` items accumulate: an existing `class` value grows by a space plus
/// the new value, so `{.c1 .c2}` renders as `class="c1 c2"` and repeated
/// merges keep appending (merging is additive, not idempotent). Every other
/// name is last-write-wins; a later item in the same list overrides an
/// earlier one, and attributes already on the token that the list does not
/// mention are left alone. Values are used verbatim; escaping for HTML is
/// the renderer's concern.
pub fn merge(attrs: &mut Attributes, list: &[(AttributeName, String)]) {
    for (name, value) in list {
        if name == "class"
            && let Some(existing) = attrs.get("class")
        {
            let joined = format!("{existing} {value}");
            attrs.insert("class", joined);
        } else {
            attrs.insert(name.clone(), value.clone());
        }
    }
}
