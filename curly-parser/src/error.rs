use thiserror::Error as ThisError;

/// Failures local to a single annotation.
///
/// Every variant is recovered inside the transform pass: the worst outcome
/// for the document is one annotation left behind as literal text. Nothing
/// here aborts processing of the rest of the stream.
#[non_exhaustive]
#[derive(ThisError, Debug)]
pub enum Error {
    /// The interior of a `{...}` span did not parse as attribute items.
    /// The span is left in the output text untouched, braces included.
    #[error("malformed attribute list: {0}")]
    MalformedAttributeList(#[from] peg::error::ParseError<peg::str::LineCol>),

    /// A syntactically valid span with no items, e.g. `{ }`. The braces are
    /// stripped but no attributes are merged.
    #[error("empty attribute list")]
    EmptyAttributeList,

    /// A parsed annotation with no plausible token to bind to. The
    /// annotation is dropped without mutating any token.
    #[error("no binding target for annotation `{0}`")]
    NoBindingTarget(String),

    /// The caller-supplied byte range is not a `{`..`}` delimited span.
    #[error("invalid annotation span: `{{` expected at byte {open}, `}}` at byte {close}")]
    InvalidSpan { open: usize, close: usize },
}
