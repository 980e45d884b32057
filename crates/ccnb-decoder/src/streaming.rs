use std::io::{self, Read, Write};

use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, trace};

use crate::config::DecoderConfig;
use crate::decoder::Decoder;
use crate::error::{DecodeError, StreamError};

/// Read size used when the caller does not pick one.
pub const DEFAULT_CHUNK_SIZE: usize = 8 * 1024;

/// Byte counts for a completed stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Encoded bytes consumed.
    pub bytes_in: u64,
    /// Markup bytes written.
    pub bytes_out: u64,
}

/// Sink wrapper that counts what passes through it.
struct Counting<'a, W: ?Sized> {
    inner: &'a mut W,
    written: u64,
}

impl<W: Write + ?Sized> Write for Counting<'_, W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.written += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Decode everything `reader` yields into `writer`, `chunk_size` bytes at
/// a time.
///
/// The whole stream must be complete: it ends with every element closed.
/// Output written before an error stays written.
///
/// # Errors
///
/// - [`StreamError::Io`] if reading or writing fails.
/// - [`StreamError::Decode`] if the input is malformed or truncated. The
///   offset counts the bytes consumed up to and including the bad one.
pub fn decode_reader<R, W>(
    mut reader: R,
    writer: &mut W,
    config: DecoderConfig,
    chunk_size: usize,
) -> Result<DecodeSummary, StreamError>
where
    R: Read,
    W: Write + ?Sized,
{
    let mut decoder = Decoder::with_config(config);
    let mut buf = vec![0u8; chunk_size.max(1)];
    let mut out = Counting {
        inner: writer,
        written: 0,
    };
    let mut offset = 0u64;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        let consumed = decoder.decode(&buf[..n], &mut out)?;
        offset += consumed as u64;
        trace!(read = n, consumed, "decoded chunk");
        if let Some(error) = decoder.error() {
            return Err(StreamError::Decode {
                error: error.clone(),
                offset,
            });
        }
    }

    out.flush()?;
    decoder
        .finish()
        .map_err(|error| StreamError::Decode { error, offset })?;

    let summary = DecodeSummary {
        bytes_in: offset,
        bytes_out: out.written,
    };
    debug!(bytes_in = summary.bytes_in, bytes_out = summary.bytes_out, "stream decoded");
    Ok(summary)
}

/// Decode a complete in-memory stream to a string.
///
/// Element text is copied through unchanged, so invalid UTF-8 in the
/// input is replaced with U+FFFD here.
///
/// # Errors
///
/// Returns [`StreamError::Decode`] if the input is malformed or truncated.
pub fn decode_to_string(input: &[u8], config: DecoderConfig) -> Result<String, StreamError> {
    let mut out = Vec::with_capacity(input.len() * 2);
    decode_reader(input, &mut out, config, input.len())?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// Asynchronous decoder over any `AsyncRead` source.
///
/// Each call to [`next`](Self::next) reads once from the source and yields
/// the markup that read produced. Nothing is read until the caller asks
/// for more, so a slow consumer holds back the source.
///
/// ```text
///   Some(Ok(markup))     one per read that produced output
///   Some(Err(error))     once, then the stream is done
///   None                 after end of input with every element closed
/// ```
///
/// # Example
///
/// ```rust,no_run
/// use ccnb_decoder::StreamingDecoder;
/// use tokio::io::AsyncRead;
///
/// async fn print_all(reader: impl AsyncRead + Unpin) {
///     let mut stream = StreamingDecoder::new(reader);
///     while let Some(markup) = stream.next().await.transpose().unwrap() {
///         print!("{}", String::from_utf8_lossy(&markup));
///     }
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    decoder: Decoder,
    buf: Vec<u8>,
    offset: u64,
    done: bool,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self::with_config(reader, DecoderConfig::default())
    }

    #[must_use]
    pub fn with_config(reader: R, config: DecoderConfig) -> Self {
        Self {
            reader,
            decoder: Decoder::with_config(config),
            buf: vec![0u8; DEFAULT_CHUNK_SIZE],
            offset: 0,
            done: false,
        }
    }

    /// Encoded bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read and decode until some markup is produced, the input ends, or
    /// an error stops the stream.
    pub async fn next(&mut self) -> Option<Result<Vec<u8>, StreamError>> {
        if self.done {
            return None;
        }
        loop {
            let n = match self.reader.read(&mut self.buf).await {
                Ok(n) => n,
                Err(err) => return Some(Err(self.stop(err.into()))),
            };
            if n == 0 {
                self.done = true;
                return match self.decoder.finish() {
                    Ok(()) => None,
                    Err(error) => Some(Err(self.decode_error(error))),
                };
            }

            let mut markup = Vec::new();
            let consumed = match self.decoder.decode(&self.buf[..n], &mut markup) {
                Ok(consumed) => consumed,
                Err(err) => return Some(Err(self.stop(err.into()))),
            };
            self.offset += consumed as u64;
            if let Some(error) = self.decoder.error().cloned() {
                self.done = true;
                return Some(Err(self.decode_error(error)));
            }
            if !markup.is_empty() {
                return Some(Ok(markup));
            }
        }
    }

    fn stop(&mut self, err: StreamError) -> StreamError {
        self.done = true;
        err
    }

    fn decode_error(&self, error: DecodeError) -> StreamError {
        StreamError::Decode {
            error,
            offset: self.offset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NESTED: &[u8] = &[0x21, b'F', b'o', b'o', 0x01, b'a', 0x16, b'X', 0x00, 0x00];

    async fn collect(input: &'static [u8]) -> (String, Option<StreamError>) {
        let mut stream = StreamingDecoder::new(input);
        let mut out = Vec::new();
        while let Some(item) = stream.next().await {
            match item {
                Ok(markup) => out.extend_from_slice(&markup),
                Err(err) => return (String::from_utf8(out).unwrap(), Some(err)),
            }
        }
        (String::from_utf8(out).unwrap(), None)
    }

    #[test]
    fn reader_matches_any_chunk_size() {
        for chunk_size in [1, 2, 3, 7, 64] {
            let mut out = Vec::new();
            let summary =
                decode_reader(NESTED, &mut out, DecoderConfig::default(), chunk_size).unwrap();
            assert_eq!(out, b"<Foo><a>X</a></Foo>", "chunk size {chunk_size}");
            assert_eq!(summary.bytes_in, NESTED.len() as u64);
            assert_eq!(summary.bytes_out, out.len() as u64);
        }
    }

    #[test]
    fn reader_reports_offset_of_bad_byte() {
        let input = [0x01, b'a', 0x00, 0x00, 0x01];
        let err = decode_reader(&input[..], &mut Vec::new(), DecoderConfig::default(), 2)
            .unwrap_err();
        match err {
            StreamError::Decode { error, offset } => {
                assert_eq!(error, DecodeError::CloseWithoutOpen);
                assert_eq!(offset, 4);
            }
            StreamError::Io(err) => panic!("unexpected io error: {err}"),
        }
    }

    #[test]
    fn reader_rejects_truncated_input() {
        let err = decode_to_string(&[0x01, b'a'], DecoderConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            StreamError::Decode {
                error: DecodeError::Truncated { open: 1, .. },
                offset: 2
            }
        ));
    }

    #[test]
    fn reader_reports_sink_failure_as_io() {
        let input = [0x01, b'a', 0x00];
        let mut buf = [0u8; 1];
        let mut sink = &mut buf[..];
        let err = decode_reader(&input[..], &mut sink, DecoderConfig::default(), 1).unwrap_err();
        assert!(matches!(err, StreamError::Io(ref e) if e.kind() == io::ErrorKind::WriteZero));
    }

    #[test]
    fn empty_input_is_an_empty_document() {
        assert_eq!(decode_to_string(&[], DecoderConfig::default()).unwrap(), "");
    }

    #[test]
    fn to_string_replaces_invalid_utf8() {
        let out = decode_to_string(&[0x01, b't', 0x16, 0xFF, 0x00], DecoderConfig::default())
            .unwrap();
        assert_eq!(out, "<t>\u{FFFD}</t>");
    }

    #[tokio::test]
    async fn async_stream_yields_markup() {
        let (out, err) = collect(NESTED).await;
        assert!(err.is_none());
        assert_eq!(out, "<Foo><a>X</a></Foo>");
    }

    #[tokio::test]
    async fn async_stream_reports_truncation_at_eof() {
        let (out, err) = collect(&[0x21, b'F', b'o', b'o']).await;
        assert_eq!(out, "<Foo");
        assert!(matches!(
            err,
            Some(StreamError::Decode {
                error: DecodeError::Truncated { .. },
                offset: 4
            })
        ));
    }

    #[tokio::test]
    async fn async_stream_stops_after_error() {
        let mut stream = StreamingDecoder::new(&[0x00, 0x01, b'a', 0x00][..]);
        assert!(matches!(stream.next().await, Some(Err(StreamError::Decode { .. }))));
        assert!(stream.next().await.is_none());
        assert_eq!(stream.offset(), 1);
    }

    #[tokio::test]
    async fn async_stream_applies_depth_limit() {
        let config = DecoderConfig {
            max_depth: Some(1),
            ..DecoderConfig::default()
        };
        let input = &[0x01, b'a', 0x03, b'k', 0x16, b'v', 0x00][..];
        let mut stream = StreamingDecoder::with_config(input, config);
        assert!(matches!(
            stream.next().await,
            Some(Err(StreamError::Decode {
                error: DecodeError::DepthLimit { limit: 1 },
                offset: 3
            }))
        ));
        assert!(stream.next().await.is_none());
        assert_eq!(stream.offset(), 3);
    }
}
