//! Pre-populated symbol maps consulted when lowering symbol leaves.
//!
//! A map never allocates literals while an expression is encoded. A lookup
//! for a key the caller did not populate is a contract violation and panics.

pub mod bmc_map;
pub mod var_map;

pub use bmc_map::BmcMap;
pub use var_map::VarMap;

use crate::solver::Literal;

pub trait SymbolResolver {
    /// Whether timeframes beyond the current/next pair can be resolved,
    /// i.e. whether multi-step temporal operators can be encoded.
    const MULTI_STEP: bool;

    fn resolve(&self, identifier: &str, bit: usize, timeframe: usize) -> Literal;
}

/// Phase of a symbol reference relative to one transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Current,
    Next,
}

impl Phase {
    pub fn from_timeframe(timeframe: usize) -> Option<Phase> {
        match timeframe {
            0 => Some(Phase::Current),
            1 => Some(Phase::Next),
            _ => None,
        }
    }
}
