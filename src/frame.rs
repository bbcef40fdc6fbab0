use crate::error::{DecodeError, DecodeResult};

/// Timeframe context symbol leaves are resolved in.
///
/// Plain symbols read `current`, next-state symbols read `next`. For a
/// current/next map the frame is always [`Frame::phases`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
    pub current: usize,
    pub next: usize,
}

impl Frame {
    pub fn new(current: usize, next: usize) -> Self {
        Self { current, next }
    }

    /// The transition `t -> t+1`.
    pub fn step(t: usize) -> Self {
        Self::new(t, t + 1)
    }

    /// Phase 0 is current, phase 1 is next.
    pub fn phases() -> Self {
        Self::new(0, 1)
    }

    /// Both timeframes moved `offset` steps forward.
    pub fn shifted(self, offset: usize) -> DecodeResult<Self> {
        let overflow = |base| DecodeError::TimeframeOverflow { base, offset };
        Ok(Self {
            current: self
                .current
                .checked_add(offset)
                .ok_or_else(|| overflow(self.current))?,
            next: self
                .next
                .checked_add(offset)
                .ok_or_else(|| overflow(self.next))?,
        })
    }
}
