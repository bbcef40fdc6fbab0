use std::collections::HashMap;

use super::{Phase, SymbolResolver};
use crate::solver::{Literal, Prop};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct BitPair {
    current: Literal,
    next: Literal,
}

/// Current/next literal pair per state variable bit: one transition step,
/// independent of absolute timeframe numbers.
#[derive(Debug, Default, Clone)]
pub struct VarMap {
    vars: HashMap<String, Vec<Option<BitPair>>>,
}

impl VarMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocate<'v, P, I>(prop: &mut P, vars: I) -> Self
    where
        P: Prop + ?Sized,
        I: IntoIterator<Item = (&'v str, usize)>,
    {
        let mut map = Self::new();
        for (name, width) in vars {
            for bit in 0..width {
                let current = prop.new_variable();
                let next = prop.new_variable();
                map.set(name, bit, current, next);
            }
        }
        map
    }

    pub fn set(&mut self, identifier: &str, bit: usize, current: Literal, next: Literal) {
        let bits = self.vars.entry(identifier.to_string()).or_default();
        if bits.len() <= bit {
            bits.resize(bit + 1, None);
        }
        bits[bit] = Some(BitPair { current, next });
    }

    pub fn try_get(&self, identifier: &str, bit: usize, phase: Phase) -> Option<Literal> {
        let pair = self.vars.get(identifier)?.get(bit).copied().flatten()?;
        Some(match phase {
            Phase::Current => pair.current,
            Phase::Next => pair.next,
        })
    }

    pub fn get(&self, identifier: &str, bit: usize, phase: Phase) -> Literal {
        match self.try_get(identifier, bit, phase) {
            Some(l) => l,
            None => panic!(
                "var map has no {:?} literal for `{}' bit {}",
                phase, identifier, bit
            ),
        }
    }

    pub fn get_current(&self, identifier: &str, bit: usize) -> Literal {
        self.get(identifier, bit, Phase::Current)
    }

    pub fn get_next(&self, identifier: &str, bit: usize) -> Literal {
        self.get(identifier, bit, Phase::Next)
    }
}

impl SymbolResolver for VarMap {
    const MULTI_STEP: bool = false;

    fn resolve(&self, identifier: &str, bit: usize, timeframe: usize) -> Literal {
        match Phase::from_timeframe(timeframe) {
            Some(phase) => self.get(identifier, bit, phase),
            None => panic!(
                "var map cannot resolve `{}' in timeframe {}, only current and next exist",
                identifier, timeframe
            ),
        }
    }
}
