/// Configuration options for encoding
#[derive(Clone, Debug)]
pub struct EncoderConfig {
    /// Number of timeframes the driver allocates literals for
    pub timeframes: usize,

    /// Run the SAT solver after encoding instead of printing DIMACS
    pub solve: bool,

    /// Enable constant folding in gate construction (e.g., x & true -> x)
    pub enable_const_prop: bool,

    /// Enable structural hashing of gates (identical gates share a literal)
    pub enable_gate_sharing: bool,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            timeframes: 2,
            solve: false,
            enable_const_prop: true,
            enable_gate_sharing: true,
        }
    }
}

impl EncoderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config with all gate-level optimizations disabled
    pub fn no_opts() -> Self {
        Self {
            enable_const_prop: false,
            enable_gate_sharing: false,
            ..Self::default()
        }
    }

    pub fn with_timeframes(mut self, timeframes: usize) -> Self {
        self.timeframes = timeframes;
        self
    }
}
