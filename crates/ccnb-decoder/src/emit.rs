use std::io::{self, Write};

use ccnb_wire::HeaderValue;

/// Standard base64 alphabet.
const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Render an INTVAL as unsigned decimal.
pub(crate) fn write_integer<W: Write + ?Sized>(out: &mut W, value: HeaderValue) -> io::Result<()> {
    write!(out, "{value}")
}

/// Entity for bytes that cannot appear verbatim in element text or
/// attribute values.
fn entity(byte: u8) -> Option<&'static [u8]> {
    match byte {
        b'&' => Some(b"&amp;"),
        b'<' => Some(b"&lt;"),
        b'>' => Some(b"&gt;"),
        b'"' => Some(b"&quot;"),
        _ => None,
    }
}

/// Write `text` with markup characters escaped, one entity per byte.
///
/// Runs of ordinary bytes are written in one call. The caller has already
/// rejected zero bytes.
pub(crate) fn write_escaped<W: Write + ?Sized>(out: &mut W, text: &[u8]) -> io::Result<()> {
    let mut run_start = 0;
    for (i, &byte) in text.iter().enumerate() {
        if let Some(escaped) = entity(byte) {
            out.write_all(&text[run_start..i])?;
            out.write_all(escaped)?;
            run_start = i + 1;
        }
    }
    out.write_all(&text[run_start..])
}

/// Where the streaming base64 encoder is within a 3-byte group.
///
/// ```text
///   byte:    aaaaaaaa bbbbbbbb cccccccc
///   output:  aaaaaa aabbbb bbbbcc cccccc
///   phase:   Zero    One    Two
/// ```
///
/// Each phase consumes one input byte. The bits of that byte that do not
/// fill a whole output character are carried into the next phase.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Base64Phase {
    /// Start of a group; nothing carried.
    #[default]
    Zero,
    /// Two bits carried from the first byte of the group.
    One,
    /// Four bits carried from the second byte of the group.
    Two,
}

/// Streaming base64 encoder state: the current phase plus carried bits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Base64Stream {
    phase: Base64Phase,
    bits: u8,
}

impl Base64Stream {
    pub(crate) fn phase(self) -> Base64Phase {
        self.phase
    }

    /// Encode `input`, appending complete output characters to `out`.
    pub(crate) fn encode(&mut self, input: &[u8], out: &mut Vec<u8>) {
        for &byte in input {
            match self.phase {
                Base64Phase::Zero => {
                    out.push(BASE64_ALPHABET[usize::from(byte >> 2)]);
                    self.bits = byte & 0x03;
                    self.phase = Base64Phase::One;
                }
                Base64Phase::One => {
                    out.push(BASE64_ALPHABET[usize::from((self.bits << 4) | (byte >> 4))]);
                    self.bits = byte & 0x0F;
                    self.phase = Base64Phase::Two;
                }
                Base64Phase::Two => {
                    out.push(BASE64_ALPHABET[usize::from((self.bits << 2) | (byte >> 6))]);
                    out.push(BASE64_ALPHABET[usize::from(byte & 0x3F)]);
                    self.bits = 0;
                    self.phase = Base64Phase::Zero;
                }
            }
        }
    }

    /// Flush the carried bits and pad the final group, then reset.
    ///
    /// A blob whose last byte opened a group leaves one character plus
    /// `==`; one whose last byte was second in its group leaves one
    /// character plus `=`; a completed group needs nothing.
    pub(crate) fn finish(&mut self, out: &mut Vec<u8>) {
        match self.phase {
            Base64Phase::Zero => {}
            Base64Phase::One => {
                out.push(BASE64_ALPHABET[usize::from(self.bits << 4)]);
                out.extend_from_slice(b"==");
            }
            Base64Phase::Two => {
                out.push(BASE64_ALPHABET[usize::from(self.bits << 2)]);
                out.push(b'=');
            }
        }
        *self = Self::default();
    }
}
