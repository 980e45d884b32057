#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod streaming;

mod arena;
mod emit;
mod stack;

pub use config::DecoderConfig;
pub use decoder::{Decoder, DecoderState, TagState};
pub use emit::Base64Phase;
pub use error::{DecodeError, StreamError};
pub use streaming::{
    DEFAULT_CHUNK_SIZE, DecodeSummary, StreamingDecoder, decode_reader, decode_to_string,
};
