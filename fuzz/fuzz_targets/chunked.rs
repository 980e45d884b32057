#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use ccnb_decoder::{DecodeError, Decoder};

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    data: Vec<u8>,
    splits: Vec<u16>,
}

fn run(data: &[u8], splits: &[u16]) -> (Vec<u8>, usize, Result<(), DecodeError>) {
    let mut decoder = Decoder::new();
    let mut out = Vec::new();
    let mut consumed = 0;
    let mut rest = data;
    let mut splits = splits.iter();
    while !rest.is_empty() && decoder.error().is_none() {
        let len = splits
            .next()
            .map_or(rest.len(), |&s| usize::from(s) % (rest.len() + 1));
        let (chunk, tail) = rest.split_at(len);
        consumed += decoder.decode(chunk, &mut out).unwrap();
        rest = tail;
    }
    (out, consumed, decoder.finish())
}

// Fuzz target: chunk invariance.
//
// Decoding the same bytes in one call or split at arbitrary points must
// produce identical output, consumed count, and final result.
fuzz_target!(|input: FuzzInput| {
    let whole = run(&input.data, &[]);
    let split = run(&input.data, &input.splits);
    assert_eq!(whole, split);
});
