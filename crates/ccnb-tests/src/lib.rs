//! Fixtures shared by the integration tests and benchmarks.
//!
//! [`Payload`] frames items with [`ccnb_wire::encode_header`] so tests can
//! describe inputs as a sequence of items rather than hand-counted bytes.

use ccnb_decoder::{DecodeError, Decoder, DecoderConfig};
use ccnb_wire::{TagKind, encode_close, encode_header};

/// Builder for encoded ccnb byte streams.
///
/// ```rust
/// use ccnb_tests::Payload;
///
/// let bytes = Payload::new().tag("a").udata("X").close().build();
/// assert_eq!(bytes, [0x01, b'a', 0x16, b'X', 0x00]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct Payload {
    buf: Vec<u8>,
}

impl Payload {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an element. Names are encoded with length minus one.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[must_use]
    pub fn tag(self, name: &str) -> Self {
        self.named(TagKind::Tag, name.as_bytes())
    }

    /// Start an attribute; a value item must follow.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[must_use]
    pub fn attr(self, name: &str) -> Self {
        self.named(TagKind::Attr, name.as_bytes())
    }

    #[must_use]
    pub fn udata(self, text: &str) -> Self {
        self.bytes(TagKind::Udata, text.as_bytes())
    }

    #[must_use]
    pub fn blob(self, data: &[u8]) -> Self {
        self.bytes(TagKind::Blob, data)
    }

    #[must_use]
    pub fn int(mut self, value: u128) -> Self {
        encode_header(value, TagKind::Intval, &mut self.buf);
        self
    }

    #[must_use]
    pub fn close(mut self) -> Self {
        encode_close(&mut self.buf);
        self
    }

    /// Append bytes verbatim, for malformed inputs.
    #[must_use]
    pub fn raw(mut self, bytes: &[u8]) -> Self {
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Name item with arbitrary bytes, including ones the decoder rejects.
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    #[must_use]
    pub fn named(mut self, kind: TagKind, name: &[u8]) -> Self {
        assert!(!name.is_empty(), "names are at least one byte");
        encode_header((name.len() - 1) as u128, kind, &mut self.buf);
        self.buf.extend_from_slice(name);
        self
    }

    #[must_use]
    pub fn bytes(mut self, kind: TagKind, data: &[u8]) -> Self {
        encode_header(data.len() as u128, kind, &mut self.buf);
        self.buf.extend_from_slice(data);
        self
    }

    #[must_use]
    pub fn build(self) -> Vec<u8> {
        self.buf
    }
}

/// A message touching every item kind, rendered as
/// [`SAMPLE_RENDERED`]. The `ccnb selftest` command embeds the same bytes
/// and checks them against this builder in its tests.
#[must_use]
pub fn sample_message() -> Vec<u8> {
    Payload::new()
        .tag("Foo")
        .tag("a")
        .udata("X")
        .close()
        .tag("b")
        .attr("type")
        .udata("empty")
        .close()
        .tag("bin")
        .blob(&[0x01, 0x23, 0x45, 0x67])
        .close()
        .tag("int")
        .int(42)
        .close()
        .tag("int")
        .attr("type")
        .udata("BIG")
        .int(4_574_801_679_883_329)
        .close()
        .udata("Hi&bye")
        .close()
        .build()
}

pub const SAMPLE_RENDERED: &str = concat!(
    "<Foo><a>X</a><b type=\"empty\"/><bin>ASNFZw==</bin><int>42</int>",
    "<int type=\"BIG\">4574801679883329</int>Hi&amp;bye</Foo>",
);

/// Outcome of feeding one stream through a decoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub consumed: usize,
    pub result: Result<(), DecodeError>,
}

/// Decode `input` split at the given chunk lengths, then call `finish`.
///
/// Lengths past the end of the input are clamped and whatever is left
/// after the last length is fed as one final chunk.
///
/// # Panics
///
/// Panics if writing to the in-memory sink fails, which it cannot.
#[must_use]
pub fn render_chunks(input: &[u8], lengths: &[usize], config: DecoderConfig) -> Rendered {
    let mut decoder = Decoder::with_config(config);
    let mut out = Vec::new();
    let mut consumed = 0;
    let mut rest = input;
    let mut pieces = lengths.iter().copied().chain(std::iter::once(usize::MAX));
    while !rest.is_empty() && decoder.error().is_none() {
        let len = pieces.next().unwrap_or(usize::MAX).min(rest.len());
        let (chunk, tail) = rest.split_at(len);
        consumed += decoder.decode(chunk, &mut out).unwrap();
        rest = tail;
    }
    Rendered {
        text: String::from_utf8_lossy(&out).into_owned(),
        consumed,
        result: decoder.finish(),
    }
}

/// Decode `input` in one call.
#[must_use]
pub fn render(input: &[u8]) -> Rendered {
    render_chunks(input, &[], DecoderConfig::default())
}
