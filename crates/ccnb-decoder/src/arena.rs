/// Shared backing store for every open element and attribute name.
///
/// Names are appended at the tail while they are being read and released
/// by truncating back to the length recorded before they were written.
/// The arena never compacts and never writes anywhere but the tail, so a
/// name's bytes stay put for as long as its frame is live.
///
/// ```text
///   buf:  [ F o o | b | t y p e ]
///           ^       ^   ^
///           |       |   └─ attribute frame, checkpoint 4
///           |       └───── element frame,   checkpoint 3
///           └───────────── element frame,   checkpoint 0
/// ```
#[derive(Debug, Default)]
pub(crate) struct NameArena {
    buf: Vec<u8>,
}

impl NameArena {
    pub(crate) fn len(&self) -> usize {
        self.buf.len()
    }

    pub(crate) fn extend(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Everything from `offset` to the tail.
    pub(crate) fn tail(&self, offset: usize) -> &[u8] {
        &self.buf[offset..]
    }

    /// Roll back to a previously recorded length.
    pub(crate) fn truncate(&mut self, checkpoint: usize) {
        debug_assert!(checkpoint <= self.buf.len(), "checkpoint past arena tail");
        self.buf.truncate(checkpoint);
    }

    pub(crate) fn clear(&mut self) {
        self.buf.clear();
    }
}
