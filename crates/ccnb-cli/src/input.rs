use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::info;

/// One input named on the command line, read fully into memory.
pub struct Input {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// The paths to read, with no paths meaning stdin.
pub fn paths(files: &[PathBuf]) -> Vec<PathBuf> {
    if files.is_empty() {
        vec![PathBuf::from("-")]
    } else {
        files.to_vec()
    }
}

/// Read `path`, or stdin when `path` is `-`.
///
/// # Errors
///
/// Returns an error if the file or stdin cannot be read.
pub fn read(path: &Path) -> Result<Input> {
    let (name, bytes) = if path.as_os_str() == "-" {
        let mut bytes = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut bytes)
            .context("cannot read stdin")?;
        ("<stdin>".to_string(), bytes)
    } else {
        let bytes =
            fs::read(path).with_context(|| format!("cannot read {}", path.display()))?;
        (path.display().to_string(), bytes)
    };
    info!(input = %name, bytes = bytes.len(), "read input");
    Ok(Input { name, bytes })
}
