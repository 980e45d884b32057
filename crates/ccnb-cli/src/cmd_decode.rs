/// Implementation of `ccnb decode`.
///
/// Reads each input, feeds it to a fresh decoder in `--chunk-size` pieces,
/// and writes the markup to stdout or to `-o <file>`, one line per input.
///
/// ```text
/// $ ccnb decode message.ccnb
/// <Foo><a>X</a><b type="empty"/>...</Foo>
///
/// $ ccnb decode broken.ccnb
/// error: broken.ccnb: decode failed after 5 of 9 bytes: close marker with no open element
/// ```
///
/// Output for an input that fails part way is still written up to the
/// failure point; the newline is only written after a clean decode.
use std::fs::File;
use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result, anyhow};
use ccnb_decoder::{StreamError, decode_reader};

use crate::DecodeArgs;
use crate::input;

/// Run the `ccnb decode` command.
///
/// # Errors
///
/// Returns an error if an input cannot be read, the output cannot be
/// written, or an input fails to decode.
pub fn run(args: &DecodeArgs) -> Result<()> {
    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("cannot write {}", path.display()))?,
        )),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let config = args.limits.config();
    for path in input::paths(&args.files) {
        let input = input::read(&path)?;
        let total = input.bytes.len();
        match decode_reader(&input.bytes[..], &mut sink, config, args.limits.chunk_size) {
            Ok(_) => sink.write_all(b"\n").context("cannot write output")?,
            Err(StreamError::Decode { error, offset }) => {
                sink.flush().context("cannot write output")?;
                return Err(anyhow!(
                    "{}: decode failed after {offset} of {total} bytes: {error}",
                    input.name
                ));
            }
            Err(StreamError::Io(err)) => return Err(err).context("cannot write output"),
        }
    }

    sink.flush().context("cannot write output")?;
    Ok(())
}
