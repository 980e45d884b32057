#![warn(clippy::pedantic)]

pub mod error;
pub mod header;
pub mod tag;

pub use error::WireError;
pub use header::{Header, HeaderDecoder, HeaderValue, encode_close, encode_header};
pub use tag::{CLOSE, TagKind};
