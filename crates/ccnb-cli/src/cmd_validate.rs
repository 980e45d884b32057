/// Implementation of `ccnb validate`.
///
/// Decodes every input into a discarding sink and reports one line each:
///
/// ```text
/// ✓ good.ccnb: 52 bytes, 118 bytes of markup
/// ✗ bad.ccnb: failed after 3 of 9 bytes: attribute header without an open start tag
/// ```
///
/// All inputs are checked even after a failure; the command fails if any
/// input did.
use std::io;

use anyhow::{Result, bail};
use ccnb_decoder::{StreamError, decode_reader};

use crate::ValidateArgs;
use crate::input;

/// Run the `ccnb validate` command.
///
/// # Errors
///
/// Returns an error if an input cannot be read or any input is invalid.
pub fn run(args: &ValidateArgs) -> Result<()> {
    let config = args.limits.config();
    let paths = input::paths(&args.files);
    let mut failed = 0usize;

    for path in &paths {
        let input = input::read(path)?;
        let total = input.bytes.len();
        match decode_reader(&input.bytes[..], &mut io::sink(), config, args.limits.chunk_size) {
            Ok(summary) => println!(
                "✓ {}: {} bytes, {} bytes of markup",
                input.name, summary.bytes_in, summary.bytes_out
            ),
            Err(StreamError::Decode { error, offset }) => {
                failed += 1;
                println!(
                    "✗ {}: failed after {offset} of {total} bytes: {error}",
                    input.name
                );
            }
            Err(StreamError::Io(err)) => return Err(err.into()),
        }
    }

    if failed > 0 {
        bail!("{failed} of {} input(s) failed validation", paths.len());
    }
    Ok(())
}
