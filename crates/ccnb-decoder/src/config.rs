/// Resource limits for a [`Decoder`](crate::Decoder).
///
/// The encoding itself puts no bound on nesting depth or name length, so
/// a decoder fed untrusted input grows as far as that input asks. These
/// limits let a caller cap the two structures that grow with the input.
///
/// ```text
/// ┌────────────────┬─────────────────────────────────────────────────┐
/// │ Field          │ Bounds                                          │
/// ├────────────────┼─────────────────────────────────────────────────┤
/// │ max_depth      │ open elements plus a pending attribute          │
/// │ max_name_bytes │ total bytes of all currently open names         │
/// └────────────────┴─────────────────────────────────────────────────┘
/// ```
///
/// Exceeding a limit fails the stream with
/// [`DecodeError::DepthLimit`](crate::DecodeError::DepthLimit) or
/// [`DecodeError::NameLimit`](crate::DecodeError::NameLimit).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Maximum number of simultaneously open frames. `None` is unbounded.
    pub max_depth: Option<usize>,

    /// Maximum combined length of all open names. `None` is unbounded.
    pub max_name_bytes: Option<usize>,
}

impl DecoderConfig {
    /// The depth limit, if `depth` frames would exceed it.
    pub(crate) fn depth_exceeded(&self, depth: usize) -> Option<usize> {
        self.max_depth.filter(|&max| depth > max)
    }

    /// The name limit, if `len` arena bytes would exceed it.
    pub(crate) fn names_exceeded(&self, len: usize) -> Option<usize> {
        self.max_name_bytes.filter(|&max| len > max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unbounded() {
        let config = DecoderConfig::default();
        assert_eq!(config.max_depth, None);
        assert_eq!(config.max_name_bytes, None);
        assert_eq!(config.depth_exceeded(usize::MAX), None);
        assert_eq!(config.names_exceeded(usize::MAX), None);
    }

    #[test]
    fn limits_are_inclusive() {
        let config = DecoderConfig {
            max_depth: Some(2),
            max_name_bytes: Some(8),
        };
        assert_eq!(config.depth_exceeded(2), None);
        assert_eq!(config.depth_exceeded(3), Some(2));
        assert_eq!(config.names_exceeded(8), None);
        assert_eq!(config.names_exceeded(9), Some(8));
    }
}
