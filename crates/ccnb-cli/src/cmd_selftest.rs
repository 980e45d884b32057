/// Implementation of `ccnb selftest`.
///
/// Decodes a built-in message that touches every item kind (nested
/// elements, an attribute, text with an entity, a blob, a small integer and
/// one too wide for 64 bits), prints the rendering, and fails if it differs
/// from the known-good text.
use anyhow::{Result, bail};
use ccnb_decoder::{DecoderConfig, decode_to_string};

/// Same bytes as `ccnb_tests::sample_message`; the unit test below keeps
/// the two in step.
#[rustfmt::skip]
const SAMPLE: &[u8] = &[
    0x21, b'F', b'o', b'o',
        0x01, b'a',
            0x16, b'X',
        0x00,
        0x01, b'b',
            0x33, b't', b'y', b'p', b'e',
            0x56, b'e', b'm', b'p', b't', b'y',
        0x00,
        0x21, b'b', b'i', b'n',
            0x45, 0x01, 0x23, 0x45, 0x67,
        0x00,
        0x21, b'i', b'n', b't',
            0x85, 0x27,
        0x00,
        0x21, b'i', b'n', b't',
            0x33, b't', b'y', b'p', b'e',
            0x36, b'B', b'I', b'G',
            0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x17,
        0x00,
        0x66, b'H', b'i', b'&', b'b', b'y', b'e',
    0x00,
];

const EXPECTED: &str = concat!(
    "<Foo><a>X</a><b type=\"empty\"/><bin>ASNFZw==</bin><int>42</int>",
    "<int type=\"BIG\">4574801679883329</int>Hi&amp;bye</Foo>",
);

/// Run the `ccnb selftest` command.
///
/// # Errors
///
/// Returns an error if the sample fails to decode or renders differently.
pub fn run() -> Result<()> {
    let rendered = decode_to_string(SAMPLE, DecoderConfig::default())?;
    println!("{rendered}");
    if rendered != EXPECTED {
        bail!("sample rendered incorrectly, expected:\n{EXPECTED}");
    }
    println!("✓ selftest passed ({} bytes in, {} bytes out)", SAMPLE.len(), rendered.len());
    Ok(())
}
