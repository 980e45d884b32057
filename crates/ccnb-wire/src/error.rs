use crate::tag::TagKind;

/// Errors raised while decoding a single item header.
///
/// Every variant is fatal to the stream the header came from: the header
/// decoder has no way to resynchronise once a byte has been misread.
///
/// ```text
///   WireError
///   ├── UnknownTagKind    ← terminal byte carries an unassigned nibble
///   ├── WideLength        ← overflowed header resolved to a non-INTVAL kind
///   ├── IntegerOverflow   ← value needs more than 128 bits
///   └── LengthTooLarge    ← length does not fit this platform's usize
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// The low nibble of a terminal byte is not one of the known tag kinds.
    #[error("unknown tag kind {nibble:#04X}")]
    UnknownTagKind { nibble: u8 },

    /// The header overflowed the narrow accumulator but did not resolve to
    /// an INTVAL. Wide values can never describe a name or payload length.
    #[error("{kind} header value exceeds 64 bits; only INTVAL may be that wide")]
    WideLength { kind: TagKind },

    /// The header value has more significant bits than the wide accumulator
    /// can hold.
    #[error("header value exceeds 128 bits")]
    IntegerOverflow,

    /// A name or payload length cannot be represented as `usize`.
    #[error("{kind} length {value} is too large for this platform")]
    LengthTooLarge { kind: TagKind, value: u64 },
}
