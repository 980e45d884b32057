use std::io::{self, Write};

use ccnb_wire::{CLOSE, Header, HeaderDecoder, TagKind};
use tracing::debug;

use crate::arena::NameArena;
use crate::config::DecoderConfig;
use crate::emit::{self, Base64Phase, Base64Stream};
use crate::error::DecodeError;
use crate::stack::{ContextStack, FrameKind};

/// Where the decoder is within the item grammar.
///
/// ```text
///                 ┌──────────── CLOSE ────────────┐
///                 v                               │
///   StartHeader ──┴─> NarrowHeader ──overflow──> WideHeader
///        ^                 │                          │
///        │     TAG / ATTR  │  UDATA     BLOB          │ INTVAL
///        │         v       v            v             │
///        ├── ElementName   Text     Blob(Zero→One→Two)│
///        ├── AttributeName  │          │              │
///        └──────────────────┴──────────┴──────────────┘
///
///   any state ──error──> Failed(DecodeError)   (terminal)
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecoderState {
    /// Between items: the next byte is CLOSE or the first header byte.
    StartHeader,
    /// Inside a header, still in the 64-bit accumulator.
    NarrowHeader,
    /// Inside a header that overflowed 64 bits; must end as INTVAL.
    WideHeader,
    /// Copying an element name into the name arena.
    ElementName,
    /// Copying an attribute name into the name arena.
    AttributeName,
    /// Escaping UDATA bytes.
    Text,
    /// Encoding BLOB bytes as base64.
    Blob(Base64Phase),
    /// A fatal error was hit; no further input is consumed.
    Failed(DecodeError),
}

impl DecoderState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::StartHeader => "start of item",
            Self::NarrowHeader | Self::WideHeader => "header",
            Self::ElementName => "element name",
            Self::AttributeName => "attribute name",
            Self::Text => "text",
            Self::Blob(_) => "blob",
            Self::Failed(_) => "failed state",
        }
    }
}

/// Progress of the most recent start tag.
///
/// A start tag's `>` is held back until the next item shows whether
/// another attribute follows (stay `Open`), content follows (write `>`),
/// or the element closes immediately (write `/>`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TagState {
    /// No start tag awaiting its `>`.
    #[default]
    Closed,
    /// `<name` (plus any attributes) written, `>` still pending.
    Open,
    /// ` name="` written; the attribute's value comes next.
    InAttribute,
}

/// A handler's reason for stopping early.
enum Fault {
    Io(io::Error),
    Decode { error: DecodeError, consumed: usize },
}

impl Fault {
    fn reject(error: impl Into<DecodeError>, consumed: usize) -> Self {
        Self::Decode {
            error: error.into(),
            consumed,
        }
    }
}

impl From<io::Error> for Fault {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

/// Incremental decoder from binary items to markup text.
///
/// One decoder serves one stream. Input may arrive in chunks of any size:
/// every piece of progress (the state, the open start tag, a half-read
/// header, name or payload, carried base64 bits, the open elements) is kept
/// in the decoder between [`decode`](Self::decode) calls, so splitting the
/// input differently never changes the output.
///
/// Output is written to the sink as soon as it is known. The only thing
/// held back is the `>` of a start tag, until it is clear whether the tag
/// takes more attributes or closes as `/>`.
///
/// # Example
///
/// ```rust
/// use ccnb_decoder::Decoder;
///
/// // <Foo/> split across two calls
/// let mut decoder = Decoder::new();
/// let mut out = Vec::new();
/// decoder.decode(&[0x21, b'F', b'o'], &mut out).unwrap();
/// decoder.decode(&[b'o', 0x00], &mut out).unwrap();
///
/// assert_eq!(out, b"<Foo/>");
/// assert!(decoder.finish().is_ok());
/// ```
#[derive(Debug)]
pub struct Decoder {
    state: DecoderState,
    tag_state: TagState,
    header: HeaderDecoder,
    /// Declared bytes still to read for the current name, text or blob.
    remaining: usize,
    base64: Base64Stream,
    stack: ContextStack,
    names: NameArena,
    /// Reused buffer for base64 output.
    scratch: Vec<u8>,
    config: DecoderConfig,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

impl Decoder {
    /// A fresh decoder with no resource limits.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(config: DecoderConfig) -> Self {
        Self {
            state: DecoderState::StartHeader,
            tag_state: TagState::Closed,
            header: HeaderDecoder::new(),
            remaining: 0,
            base64: Base64Stream::default(),
            stack: ContextStack::default(),
            names: NameArena::default(),
            scratch: Vec::new(),
            config,
        }
    }

    pub fn state(&self) -> &DecoderState {
        &self.state
    }

    pub fn tag_state(&self) -> TagState {
        self.tag_state
    }

    /// The error that stopped this stream, if any.
    pub fn error(&self) -> Option<&DecodeError> {
        match &self.state {
            DecoderState::Failed(error) => Some(error),
            _ => None,
        }
    }

    /// Number of open frames: elements plus a pending attribute.
    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Whether the decoder sits on a clean boundary between messages.
    pub fn is_idle(&self) -> bool {
        self.state == DecoderState::StartHeader
            && self.stack.is_empty()
            && self.tag_state == TagState::Closed
    }

    /// Check the decoder at end of input.
    ///
    /// A stream is complete only when the decoder is back between items
    /// with every element closed. Anything else means the input stopped
    /// mid-message.
    ///
    /// # Errors
    ///
    /// - The recorded error if the stream already failed.
    /// - [`DecodeError::Truncated`] if the input ended mid-message.
    pub fn finish(&self) -> Result<(), DecodeError> {
        match &self.state {
            DecoderState::Failed(error) => Err(error.clone()),
            _ if self.is_idle() => Ok(()),
            state => Err(DecodeError::Truncated {
                state: state.name(),
                open: self.stack.depth(),
            }),
        }
    }

    /// Return to the freshly created state, keeping allocated buffers.
    pub fn reset(&mut self) {
        self.state = DecoderState::StartHeader;
        self.tag_state = TagState::Closed;
        self.header.reset();
        self.remaining = 0;
        self.base64 = Base64Stream::default();
        self.stack.clear(&mut self.names);
    }

    /// Decode as much of `chunk` as possible, writing markup to `out`.
    ///
    /// Returns the number of bytes consumed. That is all of `chunk` unless
    /// a fatal error stops the stream, in which case the count includes
    /// the offending byte and [`error`](Self::error) reports why. A failed
    /// decoder consumes nothing on later calls.
    ///
    /// # Errors
    ///
    /// Only errors from writing to `out` are returned here. Part of the
    /// item being written may already have been applied, so a write error
    /// also fails the stream with [`DecodeError::Output`].
    pub fn decode<W: Write + ?Sized>(&mut self, chunk: &[u8], out: &mut W) -> io::Result<usize> {
        let mut pos = 0;
        while pos < chunk.len() {
            let input = &chunk[pos..];
            let step = match self.state {
                DecoderState::Failed(_) => break,
                DecoderState::StartHeader => self.start_item(input[0], out),
                DecoderState::NarrowHeader | DecoderState::WideHeader => {
                    self.header_byte(input[0], out)
                }
                DecoderState::ElementName | DecoderState::AttributeName => {
                    self.copy_name(input, out)
                }
                DecoderState::Text => self.emit_text(input, out),
                DecoderState::Blob(_) => self.emit_blob(input, out),
            };
            match step {
                Ok(consumed) => pos += consumed,
                Err(Fault::Io(err)) => {
                    self.fail(DecodeError::Output { kind: err.kind() });
                    return Err(err);
                }
                Err(Fault::Decode { error, consumed }) => {
                    pos += consumed;
                    self.fail(error);
                    break;
                }
            }
        }
        Ok(pos)
    }

    fn fail(&mut self, error: DecodeError) {
        debug!(%error, depth = self.stack.depth(), "decoder failed");
        self.state = DecoderState::Failed(error);
    }

    // ── Item boundaries ─────────────────────────────────────────────────

    fn start_item<W: Write + ?Sized>(&mut self, byte: u8, out: &mut W) -> Result<usize, Fault> {
        if byte == CLOSE {
            self.close_element(out)?;
            return Ok(1);
        }
        self.header.reset();
        self.header_byte(byte, out)
    }

    fn close_element<W: Write + ?Sized>(&mut self, out: &mut W) -> Result<(), Fault> {
        if self.tag_state == TagState::InAttribute {
            return Err(Fault::reject(DecodeError::CloseInAttribute, 1));
        }
        let Some((_, name)) = self.stack.top_name(&self.names) else {
            return Err(Fault::reject(DecodeError::CloseWithoutOpen, 1));
        };
        if self.tag_state == TagState::Open {
            out.write_all(b"/>")?;
        } else {
            out.write_all(b"</")?;
            out.write_all(name)?;
            out.write_all(b">")?;
        }
        self.tag_state = TagState::Closed;
        self.stack.pop(&mut self.names);
        Ok(())
    }

    /// Finish a UDATA, BLOB or INTVAL; closes the attribute it belonged to.
    fn value_complete<W: Write + ?Sized>(&mut self, out: &mut W) -> io::Result<()> {
        if self.tag_state == TagState::InAttribute {
            out.write_all(b"\"")?;
            self.stack.pop(&mut self.names);
            self.tag_state = TagState::Open;
        }
        self.state = DecoderState::StartHeader;
        Ok(())
    }

    // ── Headers ─────────────────────────────────────────────────────────

    fn header_byte<W: Write + ?Sized>(&mut self, byte: u8, out: &mut W) -> Result<usize, Fault> {
        match self.header.push(byte) {
            Ok(None) => {
                self.state = if self.header.is_wide() {
                    DecoderState::WideHeader
                } else {
                    DecoderState::NarrowHeader
                };
                Ok(1)
            }
            Ok(Some(header)) => {
                self.dispatch(header, out)?;
                Ok(1)
            }
            Err(err) => Err(Fault::reject(err, 1)),
        }
    }

    fn dispatch<W: Write + ?Sized>(&mut self, header: Header, out: &mut W) -> Result<(), Fault> {
        let kind = header.kind;
        match self.tag_state {
            TagState::InAttribute if kind.is_name() => {
                return Err(Fault::reject(
                    DecodeError::UnexpectedInAttribute { kind },
                    1,
                ));
            }
            TagState::Open if kind != TagKind::Attr => {
                out.write_all(b">")?;
                self.tag_state = TagState::Closed;
            }
            TagState::Closed if kind == TagKind::Attr => {
                return Err(Fault::reject(DecodeError::AttrWithoutOpenTag, 1));
            }
            _ => {}
        }

        match kind {
            TagKind::Intval => {
                emit::write_integer(out, header.value)?;
                self.value_complete(out)?;
            }
            TagKind::Udata | TagKind::Blob => {
                let len = header.payload_len().map_err(|err| Fault::reject(err, 1))?;
                if len == 0 {
                    self.value_complete(out)?;
                } else {
                    self.remaining = len;
                    self.state = if kind == TagKind::Udata {
                        DecoderState::Text
                    } else {
                        DecoderState::Blob(Base64Phase::Zero)
                    };
                }
            }
            TagKind::Tag => self.open_frame(FrameKind::Element, &header)?,
            TagKind::Attr => self.open_frame(FrameKind::Attribute, &header)?,
        }
        Ok(())
    }

    // ── Names ───────────────────────────────────────────────────────────

    fn open_frame(&mut self, kind: FrameKind, header: &Header) -> Result<(), Fault> {
        let len = header.payload_len().map_err(|err| Fault::reject(err, 1))?;
        if let Some(limit) = self.config.depth_exceeded(self.stack.depth() + 1) {
            return Err(Fault::reject(DecodeError::DepthLimit { limit }, 1));
        }
        if let Some(limit) = self.config.names_exceeded(self.names.len().saturating_add(len)) {
            return Err(Fault::reject(DecodeError::NameLimit { limit }, 1));
        }
        self.stack.push(kind, &self.names);
        self.remaining = len;
        self.state = match kind {
            FrameKind::Element => DecoderState::ElementName,
            FrameKind::Attribute => DecoderState::AttributeName,
        };
        Ok(())
    }

    fn copy_name<W: Write + ?Sized>(&mut self, input: &[u8], out: &mut W) -> Result<usize, Fault> {
        let take = self.remaining.min(input.len());
        self.names.extend(&input[..take]);
        self.remaining -= take;
        if self.remaining == 0 {
            self.complete_name(take, out)?;
        }
        Ok(take)
    }

    fn complete_name<W: Write + ?Sized>(&mut self, consumed: usize, out: &mut W) -> Result<(), Fault> {
        let Some((kind, name)) = self.stack.top_name(&self.names) else {
            let state = self.state.name();
            return Err(Fault::reject(DecodeError::Inconsistent { state }, consumed));
        };
        if name.contains(&0) {
            let kind = match kind {
                FrameKind::Element => TagKind::Tag,
                FrameKind::Attribute => TagKind::Attr,
            };
            let declared = name.len();
            return Err(Fault::reject(DecodeError::InvalidName { kind, declared }, consumed));
        }
        match kind {
            FrameKind::Element => {
                out.write_all(b"<")?;
                out.write_all(name)?;
                self.tag_state = TagState::Open;
            }
            FrameKind::Attribute => {
                out.write_all(b" ")?;
                out.write_all(name)?;
                out.write_all(b"=\"")?;
                self.tag_state = TagState::InAttribute;
            }
        }
        self.state = DecoderState::StartHeader;
        Ok(())
    }

    // ── Payloads ────────────────────────────────────────────────────────

    fn emit_text<W: Write + ?Sized>(&mut self, input: &[u8], out: &mut W) -> Result<usize, Fault> {
        let take = self.remaining.min(input.len());
        let text = &input[..take];
        if let Some(nul) = text.iter().position(|&byte| byte == 0) {
            emit::write_escaped(out, &text[..nul])?;
            return Err(Fault::reject(DecodeError::InvalidText, nul + 1));
        }
        emit::write_escaped(out, text)?;
        self.remaining -= take;
        if self.remaining == 0 {
            self.value_complete(out)?;
        }
        Ok(take)
    }

    fn emit_blob<W: Write + ?Sized>(&mut self, input: &[u8], out: &mut W) -> Result<usize, Fault> {
        let take = self.remaining.min(input.len());
        self.scratch.clear();
        self.base64.encode(&input[..take], &mut self.scratch);
        self.remaining -= take;
        if self.remaining == 0 {
            self.base64.finish(&mut self.scratch);
            out.write_all(&self.scratch)?;
            self.value_complete(out)?;
        } else {
            out.write_all(&self.scratch)?;
            self.state = DecoderState::Blob(self.base64.phase());
        }
        Ok(take)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccnb_wire::encode_header;

    fn feed(decoder: &mut Decoder, bytes: &[u8]) -> (usize, String) {
        let mut out = Vec::new();
        let consumed = decoder.decode(bytes, &mut out).unwrap();
        (consumed, String::from_utf8(out).unwrap())
    }

    fn render(bytes: &[u8]) -> String {
        let mut decoder = Decoder::new();
        let (consumed, out) = feed(&mut decoder, bytes);
        assert_eq!(consumed, bytes.len(), "stopped early: {:?}", decoder.state());
        decoder.finish().unwrap();
        out
    }

    fn render_err(bytes: &[u8]) -> (usize, DecodeError) {
        let mut decoder = Decoder::new();
        let (consumed, _) = feed(&mut decoder, bytes);
        (consumed, decoder.error().cloned().expect("decoder should have failed"))
    }

    #[test]
    fn self_closing_element() {
        assert_eq!(render(&[0x21, b'F', b'o', b'o', 0x00]), "<Foo/>");
    }

    #[test]
    fn nested_text_child() {
        let bytes = [0x21, b'F', b'o', b'o', 0x01, b'a', 0x16, b'X', 0x00, 0x00];
        assert_eq!(render(&bytes), "<Foo><a>X</a></Foo>");
    }

    #[test]
    fn text_escapes_markup() {
        let bytes = [0x01, b't', 0x46, b'&', b'<', b'>', b'"', 0x00];
        assert_eq!(render(&bytes), "<t>&amp;&lt;&gt;&quot;</t>");
    }

    #[test]
    fn attribute_on_empty_element() {
        let mut bytes = vec![0x01, b'b', 0x33];
        bytes.extend_from_slice(b"type");
        bytes.push(0x56);
        bytes.extend_from_slice(b"empty");
        bytes.push(0x00);
        assert_eq!(render(&bytes), r#"<b type="empty"/>"#);
    }

    #[test]
    fn attribute_then_child_text() {
        let bytes = [0x01, b'b', 0x03, b'k', 0x16, b'v', 0x16, b'c', 0x00];
        assert_eq!(render(&bytes), r#"<b k="v">c</b>"#);
    }

    #[test]
    fn two_attributes() {
        let bytes = [0x01, b'e', 0x03, b'x', 0x16, b'1', 0x03, b'y', 0x16, b'2', 0x00];
        assert_eq!(render(&bytes), r#"<e x="1" y="2"/>"#);
    }

    #[test]
    fn integer_and_blob_attribute_values() {
        let bytes = [0x01, b'e', 0x03, b'n', 0x85, 0x27, 0x03, b'b', 0x15, 0xFF, 0x00];
        assert_eq!(render(&bytes), r#"<e n="42" b="/w=="/>"#);
    }

    #[test]
    fn empty_attribute_value() {
        assert_eq!(render(&[0x01, b'a', 0x03, b'k', 0x06, 0x00]), r#"<a k=""/>"#);
    }

    #[test]
    fn empty_text_child_opens_tag() {
        assert_eq!(render(&[0x01, b'a', 0x06, 0x00]), "<a></a>");
        assert_eq!(render(&[0x01, b'a', 0x05, 0x00]), "<a></a>");
    }

    #[test]
    fn blob_base64() {
        let bytes = [0x21, b'b', b'i', b'n', 0x45, 0x01, 0x23, 0x45, 0x67, 0x00];
        assert_eq!(render(&bytes), "<bin>ASNFZw==</bin>");
    }

    #[test]
    fn integer_content() {
        assert_eq!(render(&[0x01, b'i', 0x85, 0x27, 0x00]), "<i>42</i>");
        assert_eq!(render(&[0x01, b'i', 0x80, 0x85, 0x27, 0x00]), "<i>42</i>");
        assert_eq!(render(&[0x01, b'i', 0x07, 0x00]), "<i>0</i>");
    }

    #[test]
    fn wide_integer_content() {
        let value = u128::from(u64::MAX) * 1000 + 7;
        let mut bytes = vec![0x01, b'i'];
        encode_header(value, TagKind::Intval, &mut bytes);
        bytes.push(0x00);
        assert_eq!(render(&bytes), format!("<i>{value}</i>"));
    }

    #[test]
    fn wide_state_visible_mid_header() {
        let mut bytes = Vec::new();
        encode_header(1 << 90, TagKind::Intval, &mut bytes);
        let mut decoder = Decoder::new();
        feed(&mut decoder, &bytes[..bytes.len() - 1]);
        assert_eq!(decoder.state(), &DecoderState::WideHeader);
        let (_, out) = feed(&mut decoder, &bytes[bytes.len() - 1..]);
        assert_eq!(out, (1u128 << 90).to_string());
        assert!(decoder.is_idle());
    }

    #[test]
    fn start_tag_survives_chunk_boundary() {
        let mut decoder = Decoder::new();
        let (_, first) = feed(&mut decoder, &[0x01, b'a']);
        assert_eq!(first, "<a");
        assert_eq!(decoder.tag_state(), TagState::Open);
        let (_, second) = feed(&mut decoder, &[0x00]);
        assert_eq!(second, "/>");
    }

    #[test]
    fn attribute_survives_chunk_boundary() {
        let mut decoder = Decoder::new();
        let (_, first) = feed(&mut decoder, &[0x01, b'a', 0x03, b'k']);
        assert_eq!(first, r#"<a k=""#);
        assert_eq!(decoder.tag_state(), TagState::InAttribute);
        let (_, second) = feed(&mut decoder, &[0x16, b'v', 0x00]);
        assert_eq!(second, r#"v"/>"#);
    }

    #[test]
    fn blob_phase_visible_between_chunks() {
        let mut decoder = Decoder::new();
        feed(&mut decoder, &[0x01, b'b', 0x45, 0x01]);
        assert_eq!(decoder.state(), &DecoderState::Blob(Base64Phase::One));
        feed(&mut decoder, &[0x23]);
        assert_eq!(decoder.state(), &DecoderState::Blob(Base64Phase::Two));
        feed(&mut decoder, &[0x45]);
        assert_eq!(decoder.state(), &DecoderState::Blob(Base64Phase::Zero));
    }

    #[test]
    fn consecutive_messages() {
        let bytes = [0x01, b'a', 0x00, 0x01, b'b', 0x00];
        assert_eq!(render(&bytes), "<a/><b/>");
    }

    #[test]
    fn close_with_empty_stack() {
        let (consumed, error) = render_err(&[0x00, 0x01, b'a', 0x00]);
        assert_eq!(consumed, 1);
        assert_eq!(error, DecodeError::CloseWithoutOpen);
    }

    #[test]
    fn failed_decoder_consumes_nothing() {
        let mut decoder = Decoder::new();
        feed(&mut decoder, &[0x00]);
        let (consumed, out) = feed(&mut decoder, &[0x01, b'a', 0x00]);
        assert_eq!(consumed, 0);
        assert!(out.is_empty());
        assert_eq!(decoder.finish(), Err(DecodeError::CloseWithoutOpen));
    }

    /// Accepts a fixed number of writes, then fails every later one.
    struct FailingSink {
        writes_left: usize,
        written: Vec<u8>,
    }

    impl Write for FailingSink {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.writes_left == 0 {
                return Err(io::ErrorKind::BrokenPipe.into());
            }
            self.writes_left -= 1;
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_mid_blob_fails_stream() {
        let mut decoder = Decoder::new();
        let mut sink = FailingSink {
            writes_left: 3,
            written: Vec::new(),
        };
        let err = decoder.decode(&[0x01, b'a', 0x45, 0x01, 0x02], &mut sink).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(sink.written, b"<a>");

        let output = DecodeError::Output {
            kind: io::ErrorKind::BrokenPipe,
        };
        assert_eq!(decoder.error(), Some(&output));

        let (consumed, out) = feed(&mut decoder, &[0x01, 0x02, 0x03, 0x04, 0x00]);
        assert_eq!(consumed, 0);
        assert!(out.is_empty());
        assert_eq!(decoder.finish(), Err(output));

        decoder.reset();
        let (_, out) = feed(&mut decoder, &[0x01, b'a', 0x00]);
        assert_eq!(out, "<a/>");
    }

    #[test]
    fn attr_without_open_tag() {
        let (consumed, error) = render_err(&[0x33, b't', b'y', b'p', b'e']);
        assert_eq!(consumed, 1);
        assert_eq!(error, DecodeError::AttrWithoutOpenTag);
    }

    #[test]
    fn attr_after_content() {
        let (consumed, error) = render_err(&[0x01, b'a', 0x16, b'X', 0x03, b'k']);
        assert_eq!(consumed, 5);
        assert_eq!(error, DecodeError::AttrWithoutOpenTag);
    }

    #[test]
    fn tag_where_attribute_value_expected() {
        let (_, error) = render_err(&[0x01, b'a', 0x03, b'k', 0x01, b'b']);
        assert_eq!(
            error,
            DecodeError::UnexpectedInAttribute {
                kind: TagKind::Tag
            }
        );
    }

    #[test]
    fn close_while_attribute_pending() {
        let (consumed, error) = render_err(&[0x01, b'a', 0x03, b'k', 0x00]);
        assert_eq!(consumed, 5);
        assert_eq!(error, DecodeError::CloseInAttribute);
    }

    #[test]
    fn zero_byte_in_text() {
        let mut decoder = Decoder::new();
        let (consumed, out) = feed(&mut decoder, &[0x01, b'a', 0x36, b'h', 0x00, b'i', 0x00]);
        assert_eq!(consumed, 5);
        assert_eq!(out, "<a>h");
        assert_eq!(decoder.error(), Some(&DecodeError::InvalidText));
    }

    #[test]
    fn zero_byte_in_name() {
        let (consumed, error) = render_err(&[0x21, b'a', 0x00, b'b', 0x00]);
        assert_eq!(consumed, 4);
        assert_eq!(
            error,
            DecodeError::InvalidName {
                kind: TagKind::Tag,
                declared: 3
            }
        );
    }

    #[test]
    fn unknown_tag_kind() {
        let (consumed, error) = render_err(&[0x02]);
        assert_eq!(consumed, 1);
        assert_eq!(
            error,
            DecodeError::Header(ccnb_wire::WireError::UnknownTagKind { nibble: 2 })
        );
    }

    #[test]
    fn wide_value_as_length() {
        let mut bytes = Vec::new();
        encode_header(1 << 70, TagKind::Udata, &mut bytes);
        let (consumed, error) = render_err(&bytes);
        assert_eq!(consumed, bytes.len());
        assert_eq!(
            error,
            DecodeError::Header(ccnb_wire::WireError::WideLength {
                kind: TagKind::Udata
            })
        );
    }

    #[test]
    fn depth_limit() {
        let config = DecoderConfig {
            max_depth: Some(2),
            ..DecoderConfig::default()
        };
        let mut decoder = Decoder::with_config(config);
        let mut out = Vec::new();
        let bytes = [0x01, b'a', 0x01, b'b', 0x01, b'c'];
        let consumed = decoder.decode(&bytes, &mut out).unwrap();
        assert_eq!(consumed, 5);
        assert_eq!(decoder.error(), Some(&DecodeError::DepthLimit { limit: 2 }));
    }

    #[test]
    fn name_limit() {
        let config = DecoderConfig {
            max_name_bytes: Some(4),
            ..DecoderConfig::default()
        };
        let mut decoder = Decoder::with_config(config);
        let mut out = Vec::new();
        let bytes = [0x21, b'a', b'b', b'c', 0x11, b'd', b'e'];
        let consumed = decoder.decode(&bytes, &mut out).unwrap();
        assert_eq!(consumed, 5);
        assert_eq!(decoder.error(), Some(&DecodeError::NameLimit { limit: 4 }));
    }

    #[test]
    fn finish_reports_truncation() {
        let mut decoder = Decoder::new();
        feed(&mut decoder, &[0x21, b'F', b'o']);
        assert_eq!(
            decoder.finish(),
            Err(DecodeError::Truncated {
                state: "element name",
                open: 1
            })
        );

        let mut decoder = Decoder::new();
        feed(&mut decoder, &[0x21, b'F', b'o', b'o']);
        assert_eq!(
            decoder.finish(),
            Err(DecodeError::Truncated {
                state: "start of item",
                open: 1
            })
        );
    }

    #[test]
    fn reset_returns_to_fresh_state() {
        let mut decoder = Decoder::new();
        feed(&mut decoder, &[0x01, b'a', 0x03]);
        decoder.reset();
        assert!(decoder.is_idle());
        assert_eq!(decoder.depth(), 0);
        let (_, out) = feed(&mut decoder, &[0x01, b'z', 0x00]);
        assert_eq!(out, "<z/>");
    }

    #[test]
    fn depth_counts_pending_attribute() {
        let mut decoder = Decoder::new();
        feed(&mut decoder, &[0x01, b'a', 0x03, b'k']);
        assert_eq!(decoder.depth(), 2);
        feed(&mut decoder, &[0x06]);
        assert_eq!(decoder.depth(), 1);
    }
}
