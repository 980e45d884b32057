#![no_main]

use libfuzzer_sys::fuzz_target;
use ccnb_decoder::{Decoder, DecoderConfig};

// Fuzz target: full decoder over arbitrary bytes.
//
// Catches panics in the state machine, arena bookkeeping, and emitters.
// A stream that stops early must have recorded an error, and `finish`
// must agree with it.
fuzz_target!(|data: &[u8]| {
    let config = DecoderConfig {
        max_depth: Some(256),
        max_name_bytes: Some(64 * 1024),
    };
    let mut decoder = Decoder::with_config(config);
    let mut out = Vec::new();
    let consumed = decoder.decode(data, &mut out).unwrap();
    if consumed < data.len() {
        assert!(decoder.error().is_some());
    }
    match decoder.error() {
        Some(error) => assert_eq!(decoder.finish(), Err(error.clone())),
        None => {
            let _ = decoder.finish();
        }
    }
});
