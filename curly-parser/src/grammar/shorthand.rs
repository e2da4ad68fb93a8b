//! Grammar for the interior of a `{...}` annotation span.

use crate::{Error, model::AttributeList};

peg::parser! {
    grammar annotation() for str {
        /// The full interior of an annotation span, braces excluded.
        ///
        /// Items are separated by runs of spaces or tabs; leading and
        /// trailing whitespace is ignored. An interior with no items at all
        /// is valid and yields an empty list.
        pub(crate) rule attribute_list() -> AttributeList
            = whitespace()? items:(item() ** whitespace()) whitespace()? { items }

        rule item() -> (String, String)
            = class() / id() / named()

        rule class() -> (String, String)
            = "." name:word() { ("class".to_string(), name) }

        rule id() -> (String, String)
            = "#" name:word() { ("id".to_string(), name) }

        rule named() -> (String, String)
            = key:word() "=" value:value() { (key, value) }

        rule value() -> String
            = quoted() / word()

        /// Double-quoted value; may contain whitespace. No escape
        /// processing beyond finding the closing quote.
        rule quoted() -> String
            = "\"" value:$([^ '"']*) "\"" { value.to_string() }

        rule word() -> String
            = word:$([^ ' ' | '\t' | '{' | '}' | '"' | '=']+) { word.to_string() }

        rule whitespace() = [' ' | '\t']+
    }
}

/// Parse the annotation span of `text` delimited by the `{` at byte `open`
/// and the `}` at byte `close` into an ordered attribute list.
///
/// The caller locates the span; this function only validates the delimiters
/// and parses the interior. A malformed interior fails with
/// [`Error::MalformedAttributeList`]; a well-formed but item-less interior
/// (e.g. `{ }`) yields an empty list.
///
/// # Example
///
/// ```
/// use curly_parser::parse_attrs;
///
/// let src = "{.red #head key=val}";
/// let attrs = parse_attrs(src, 0, src.len() - 1).unwrap();
/// assert_eq!(attrs[0], ("class".to_string(), "red".to_string()));
/// assert_eq!(attrs[1], ("id".to_string(), "head".to_string()));
/// assert_eq!(attrs[2], ("key".to_string(), "val".to_string()));
/// ```
///
/// # Errors
///
/// [`Error::InvalidSpan`] if the indices do not point at braces,
/// [`Error::MalformedAttributeList`] if the interior does not parse.
pub fn parse_attrs(text: &str, open: usize, close: usize) -> Result<AttributeList, Error> {
    if open >= close
        || text.as_bytes().get(open) != Some(&b'{')
        || text.as_bytes().get(close) != Some(&b'}')
    {
        return Err(Error::InvalidSpan { open, close });
    }
    let interior = text
        .get(open + 1..close)
        .ok_or(Error::InvalidSpan { open, close })?;
    Ok(annotation::attribute_list(interior)?)
}
