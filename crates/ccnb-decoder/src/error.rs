use ccnb_wire::{TagKind, WireError};

/// Why a stream failed to decode.
///
/// Every variant is fatal: once the decoder records one it stops consuming
/// input for good. Output already written for the failed stream stays
/// written; callers that need all-or-nothing output must buffer it and
/// discard it on error.
///
/// ```text
///   DecodeError
///   ├── Header(WireError)        ← malformed header bytes
///   ├── AttrWithoutOpenTag       ← ATTR after content, or outside any tag
///   ├── UnexpectedInAttribute    ← TAG/ATTR where an attribute value belongs
///   ├── InvalidName              ← zero byte inside an element/attribute name
///   ├── InvalidText              ← zero byte inside UTF-8 text
///   ├── CloseWithoutOpen         ← CLOSE with an empty stack
///   ├── CloseInAttribute         ← CLOSE before an attribute value
///   ├── DepthLimit / NameLimit   ← configured resource limit exceeded
///   ├── Output                   ← the output sink failed mid-item
///   ├── Inconsistent             ← internal bookkeeping mismatch
///   └── Truncated                ← stream ended mid-item (see `Decoder::finish`)
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    /// A header could not be decoded.
    #[error("malformed header: {0}")]
    Header(#[from] WireError),

    /// ATTR is only legal directly after an element name or another
    /// attribute, before any content.
    #[error("attribute header without an open start tag")]
    AttrWithoutOpenTag,

    /// An attribute name must be followed by a UDATA, BLOB or INTVAL value.
    #[error("{kind} header where an attribute value was expected")]
    UnexpectedInAttribute { kind: TagKind },

    /// The name bytes contain a zero byte, so the name's length does not
    /// match the declared length.
    #[error("{kind} name of declared length {declared} contains a zero byte")]
    InvalidName { kind: TagKind, declared: usize },

    /// UDATA content must not contain a zero byte.
    #[error("zero byte in text content")]
    InvalidText,

    #[error("close marker with no open element")]
    CloseWithoutOpen,

    #[error("close marker while an attribute value is pending")]
    CloseInAttribute,

    #[error("nesting depth exceeds the configured limit of {limit}")]
    DepthLimit { limit: usize },

    #[error("open names exceed the configured limit of {limit} bytes")]
    NameLimit { limit: usize },

    /// Writing to the output sink failed. The item being written may be
    /// half applied, so the stream cannot continue.
    #[error("output sink failed: {kind}")]
    Output { kind: std::io::ErrorKind },

    /// The decoder's own bookkeeping disagrees with its state, e.g. a name
    /// completed with no frame to hold it.
    #[error("inconsistent decoder state in {state}")]
    Inconsistent { state: &'static str },

    /// The input ended before the decoder returned to a clean item
    /// boundary with every element closed.
    #[error("input ended inside {state} with {open} open element(s)")]
    Truncated { state: &'static str, open: usize },
}

/// Failure of one of the stream adapters in [`crate::streaming`].
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The input failed to decode after `offset` bytes were consumed.
    #[error("decode failed after {offset} bytes: {error}")]
    Decode { error: DecodeError, offset: u64 },

    /// Reading input or writing output failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
