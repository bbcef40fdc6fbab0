use thiserror::Error;

/// Failure while lowering an expression to literals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("expected one-bit result")]
    ExpectedOneBit,

    #[error("failed to convert sva_cycle_delay offset")]
    CycleDelayOffset,

    #[error("failed to convert sva_cycle_delay offsets")]
    CycleDelayOffsets,

    #[error("timeframe {base} shifted by {offset} overflows")]
    TimeframeOverflow { base: usize, offset: usize },

    #[error("unsupported expression `{kind}' in {context} context")]
    Unsupported {
        kind: &'static str,
        context: &'static str,
    },

    #[error("`{kind}' expects {expected} operand(s), got {got}")]
    Operands {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("operand width mismatch: expected {expected}, got {got}")]
    WidthMismatch { expected: usize, got: usize },

    #[error("`{0}' has no fixed bit width")]
    ZeroWidth(String),

    #[error("bit index {index} out of range for width {width}")]
    OutOfRange { index: i128, width: usize },

    #[error("`{0}' requires a constant operand")]
    NonConstant(&'static str),
}

pub type DecodeResult<T> = Result<T, DecodeError>;
