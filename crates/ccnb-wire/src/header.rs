use std::fmt;

use crate::error::WireError;
use crate::tag::{CONTINUATION_BIT, TagKind};

// Header layout, most significant bits first:
//
//   1vvvvvvv 1vvvvvvv ... 0vvvkkkk
//
// Each continuation byte (high bit set) shifts seven value bits in. The
// terminal byte (high bit clear) shifts the last three value bits in and
// carries the tag kind in its low nibble. A header is therefore never
// shorter than one byte, and a single terminal byte can express values 0-7.

/// Widest narrow value that can take seven more bits without losing any.
const NARROW_MAX_BEFORE_7: u64 = u64::MAX >> 7;

/// Widest narrow value that can take three more bits without losing any.
const NARROW_MAX_BEFORE_3: u64 = u64::MAX >> 3;

const WIDE_MAX_BEFORE_7: u128 = u128::MAX >> 7;

const WIDE_MAX_BEFORE_3: u128 = u128::MAX >> 3;

/// The numeric half of a decoded header.
///
/// `Wide` only ever appears on INTVAL headers: a value that did not fit
/// the narrow accumulator cannot be used as a length.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderValue {
    Narrow(u64),
    Wide(u128),
}

impl HeaderValue {
    /// The value as `u128`, regardless of which accumulator produced it.
    pub fn get(self) -> u128 {
        match self {
            Self::Narrow(v) => u128::from(v),
            Self::Wide(v) => v,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Narrow(v) => write!(f, "{v}"),
            Self::Wide(v) => write!(f, "{v}"),
        }
    }
}

/// One fully decoded header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Header {
    pub kind: TagKind,
    pub value: HeaderValue,
}

impl Header {
    /// Number of payload bytes that follow this header.
    ///
    /// For TAG and ATTR headers the value is stored as `length - 1`, so the
    /// returned length is never zero. INTVAL headers carry no payload and
    /// report 0.
    ///
    /// # Errors
    ///
    /// - [`WireError::WideLength`] if the header came from the wide path
    ///   (only reachable for hand-built headers; the decoder never yields
    ///   a wide non-INTVAL header).
    /// - [`WireError::LengthTooLarge`] if the length does not fit `usize`.
    pub fn payload_len(&self) -> Result<usize, WireError> {
        if self.kind == TagKind::Intval {
            return Ok(0);
        }
        let HeaderValue::Narrow(value) = self.value else {
            return Err(WireError::WideLength { kind: self.kind });
        };
        let too_large = WireError::LengthTooLarge {
            kind: self.kind,
            value,
        };
        let len = if self.kind.is_name() {
            value.checked_add(1).ok_or_else(|| too_large.clone())?
        } else {
            value
        };
        usize::try_from(len).map_err(|_| too_large)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Accumulator {
    Narrow(u64),
    Wide(u128),
}

/// Incremental decoder for one header at a time.
///
/// Bytes are pushed one by one; the decoder keeps its partial value
/// between pushes, so a header may be split across any number of input
/// chunks. After a header completes the decoder is ready for the next one.
///
/// The narrow path accumulates into a `u64`. When folding the next byte in
/// would shift significant bits out, the partial value moves to a `u128`
/// accumulator and the same byte is applied again there. From then on the
/// header can only finish as an INTVAL.
///
/// # Example
///
/// ```rust
/// use ccnb_wire::{HeaderDecoder, HeaderValue, TagKind};
///
/// // 42 = (5 << 3) | 2, kind INTVAL (7)
/// let mut decoder = HeaderDecoder::new();
/// assert_eq!(decoder.push(0x85), Ok(None));
/// let header = decoder.push(0x27).unwrap().unwrap();
/// assert_eq!(header.kind, TagKind::Intval);
/// assert_eq!(header.value, HeaderValue::Narrow(42));
/// ```
#[derive(Clone, Debug)]
pub struct HeaderDecoder {
    acc: Accumulator,
}

impl Default for HeaderDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            acc: Accumulator::Narrow(0),
        }
    }

    /// Discard any partially accumulated header.
    pub fn reset(&mut self) {
        self.acc = Accumulator::Narrow(0);
    }

    /// Whether the current header has escaped to the wide accumulator.
    pub fn is_wide(&self) -> bool {
        matches!(self.acc, Accumulator::Wide(_))
    }

    /// Feed one byte.
    ///
    /// Returns `Ok(None)` while more bytes are needed and `Ok(Some(header))`
    /// once a terminal byte completes the header.
    ///
    /// # Errors
    ///
    /// - [`WireError::UnknownTagKind`] if the terminal nibble is unassigned.
    /// - [`WireError::WideLength`] if a wide header ends in a non-INTVAL kind.
    /// - [`WireError::IntegerOverflow`] if the value needs more than 128 bits.
    pub fn push(&mut self, byte: u8) -> Result<Option<Header>, WireError> {
        match self.acc {
            Accumulator::Narrow(value) => self.push_narrow(value, byte),
            Accumulator::Wide(value) => self.push_wide(value, byte),
        }
    }

    fn push_narrow(&mut self, value: u64, byte: u8) -> Result<Option<Header>, WireError> {
        if byte & CONTINUATION_BIT != 0 {
            if value > NARROW_MAX_BEFORE_7 {
                return self.push_wide(u128::from(value), byte);
            }
            self.acc = Accumulator::Narrow((value << 7) | u64::from(byte & 0x7F));
            return Ok(None);
        }

        if value > NARROW_MAX_BEFORE_3 {
            return self.push_wide(u128::from(value), byte);
        }
        let kind = TagKind::from_nibble(byte)?;
        self.reset();
        Ok(Some(Header {
            kind,
            value: HeaderValue::Narrow((value << 3) | u64::from(byte >> 4)),
        }))
    }

    fn push_wide(&mut self, value: u128, byte: u8) -> Result<Option<Header>, WireError> {
        if byte & CONTINUATION_BIT != 0 {
            if value > WIDE_MAX_BEFORE_7 {
                return Err(WireError::IntegerOverflow);
            }
            self.acc = Accumulator::Wide((value << 7) | u128::from(byte & 0x7F));
            return Ok(None);
        }

        if value > WIDE_MAX_BEFORE_3 {
            return Err(WireError::IntegerOverflow);
        }
        let kind = TagKind::from_nibble(byte)?;
        if kind != TagKind::Intval {
            return Err(WireError::WideLength { kind });
        }
        self.reset();
        Ok(Some(Header {
            kind,
            value: HeaderValue::Wide((value << 3) | u128::from(byte >> 4)),
        }))
    }
}

/// Append the shortest header encoding `value` with the given kind.
///
/// For TAG and ATTR the caller passes the stored value, i.e. the name
/// length minus one.
///
/// # Returns
///
/// The number of bytes written (1–19).
///
/// # Wire format examples
///
/// | Value | Kind   | Encoded bytes  |
/// |-------|--------|----------------|
/// | 0     | TAG    | `[0x01]`       |
/// | 2     | TAG    | `[0x21]`       |
/// | 7     | UDATA  | `[0x76]`       |
/// | 8     | UDATA  | `[0x81, 0x06]` |
/// | 42    | INTVAL | `[0x85, 0x27]` |
pub fn encode_header(value: u128, kind: TagKind, buf: &mut Vec<u8>) -> usize {
    let start = buf.len();
    let mut rest = value >> 3;
    while rest != 0 {
        #[allow(clippy::cast_possible_truncation)]
        buf.push(CONTINUATION_BIT | (rest & 0x7F) as u8);
        rest >>= 7;
    }
    buf[start..].reverse();

    #[allow(clippy::cast_possible_truncation)]
    let low = (value & 0x07) as u8;
    buf.push((low << 4) | kind.nibble());
    buf.len() - start
}

/// Append the CLOSE marker.
pub fn encode_close(buf: &mut Vec<u8>) {
    buf.push(crate::tag::CLOSE);
}
