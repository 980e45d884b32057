use std::fmt;

use crate::error::WireError;

/// The out-of-band CLOSE marker.
///
/// Only meaningful as the first byte of a new item. Inside a header a zero
/// byte is an ordinary terminal byte whose kind nibble (0) is unassigned.
pub const CLOSE: u8 = 0x00;

/// Set on every header byte except the last one.
pub const CONTINUATION_BIT: u8 = 0x80;

/// Selects the tag-kind nibble of a terminal byte.
pub const KIND_MASK: u8 = 0x0F;

/// What the bytes following a header mean.
///
/// Carried in the low nibble of a header's terminal byte. The element,
/// attribute, blob and text kinds keep the type-tag values used by the ccnb
/// encoding; INTVAL takes the next free slot.
///
/// ```text
/// ┌────────┬────────┬──────────────────────────────────────────┐
/// │ Kind   │ Nibble │ Header value                             │
/// ├────────┼────────┼──────────────────────────────────────────┤
/// │ Tag    │ 1      │ element name length - 1                  │
/// │ Attr   │ 3      │ attribute name length - 1                │
/// │ Blob   │ 5      │ binary payload length                    │
/// │ Udata  │ 6      │ UTF-8 payload length                     │
/// │ Intval │ 7      │ the integer itself, nothing follows      │
/// └────────┴────────┴──────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum TagKind {
    Tag = 1,
    Attr = 3,
    Blob = 5,
    Udata = 6,
    Intval = 7,
}

impl TagKind {
    /// Every kind, in nibble order.
    pub const ALL: [Self; 5] = [Self::Tag, Self::Attr, Self::Blob, Self::Udata, Self::Intval];

    /// Map a terminal byte's low nibble to a kind.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnknownTagKind`] for unassigned nibbles.
    pub fn from_nibble(nibble: u8) -> Result<Self, WireError> {
        match nibble & KIND_MASK {
            1 => Ok(Self::Tag),
            3 => Ok(Self::Attr),
            5 => Ok(Self::Blob),
            6 => Ok(Self::Udata),
            7 => Ok(Self::Intval),
            other => Err(WireError::UnknownTagKind { nibble: other }),
        }
    }

    pub fn nibble(self) -> u8 {
        self as u8
    }

    /// Whether the header value of this kind is encoded as `length - 1`.
    pub fn is_name(self) -> bool {
        matches!(self, Self::Tag | Self::Attr)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Tag => "TAG",
            Self::Attr => "ATTR",
            Self::Blob => "BLOB",
            Self::Udata => "UDATA",
            Self::Intval => "INTVAL",
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nibbles_roundtrip() {
        for kind in TagKind::ALL {
            assert_eq!(TagKind::from_nibble(kind.nibble()), Ok(kind));
        }
    }

    #[test]
    fn unassigned_nibbles_rejected() {
        for nibble in [0u8, 2, 4, 8, 9, 15] {
            assert_eq!(
                TagKind::from_nibble(nibble),
                Err(WireError::UnknownTagKind { nibble })
            );
        }
    }

    #[test]
    fn close_is_not_a_kind() {
        assert!(TagKind::from_nibble(CLOSE & KIND_MASK).is_err());
    }

    #[test]
    fn only_tag_and_attr_are_names() {
        let names: Vec<_> = TagKind::ALL.into_iter().filter(|k| k.is_name()).collect();
        assert_eq!(names, vec![TagKind::Tag, TagKind::Attr]);
    }
}
