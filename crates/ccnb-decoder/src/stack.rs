use crate::arena::NameArena;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameKind {
    Element,
    Attribute,
}

/// One open element or attribute.
///
/// The frame does not own its name. The name lives in the [`NameArena`]
/// from `name_offset` up to the start of the next frame's name (or the
/// arena tail for the top frame).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) kind: FrameKind,
    /// Arena length before this frame's name was written.
    pub(crate) checkpoint: usize,
    pub(crate) name_offset: usize,
}

/// Strict LIFO of open frames, mirroring the nesting of open tags.
///
/// Depth is always the number of unclosed elements plus at most one
/// attribute whose name or value is still being read. Frames are indices
/// into the arena rather than owners of their names, so popping a frame
/// and reclaiming its name is a single truncate.
#[derive(Debug, Default)]
pub(crate) struct ContextStack {
    frames: Vec<Frame>,
}

impl ContextStack {
    /// Open a new frame whose name will be written at the arena tail.
    pub(crate) fn push(&mut self, kind: FrameKind, names: &NameArena) {
        let checkpoint = names.len();
        self.frames.push(Frame {
            kind,
            checkpoint,
            name_offset: checkpoint,
        });
    }

    /// Close the top frame and release its name.
    ///
    /// Anything that needs the name must read it before calling this.
    pub(crate) fn pop(&mut self, names: &mut NameArena) -> Option<Frame> {
        let frame = self.frames.pop()?;
        names.truncate(frame.checkpoint);
        Some(frame)
    }

    /// Kind and name of the top frame.
    pub(crate) fn top_name<'a>(&self, names: &'a NameArena) -> Option<(FrameKind, &'a [u8])> {
        self.frames
            .last()
            .map(|frame| (frame.kind, names.tail(frame.name_offset)))
    }

    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drop every frame and every name.
    pub(crate) fn clear(&mut self, names: &mut NameArena) {
        self.frames.clear();
        names.clear();
    }
}
