#![no_main]

use libfuzzer_sys::fuzz_target;
use ccnb_wire::{HeaderDecoder, TagKind};

// Fuzz target: incremental header decoder.
//
// Every byte either continues the header, completes it, or fails it.
// A completed header resets the decoder, and a wide header can only be
// an INTVAL.
fuzz_target!(|data: &[u8]| {
    let mut decoder = HeaderDecoder::new();
    for &byte in data {
        match decoder.push(byte) {
            Ok(Some(header)) => {
                assert!(!decoder.is_wide());
                if header.value.get() > u128::from(u64::MAX) {
                    assert_eq!(header.kind, TagKind::Intval);
                }
                let _ = header.payload_len();
            }
            Ok(None) => {}
            Err(_) => decoder.reset(),
        }
    }
});
