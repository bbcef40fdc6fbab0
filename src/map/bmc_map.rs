use std::collections::HashMap;
use tracing::debug;

use super::SymbolResolver;
use crate::solver::{Literal, Prop};

/// Literals of every state variable bit, per timeframe of an unrolling.
#[derive(Debug, Default, Clone)]
pub struct BmcMap {
    // timeframe -> symbol -> bits
    timeframes: Vec<HashMap<String, Vec<Option<Literal>>>>,
}

impl BmcMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh literals for `vars` (name, width) in timeframes `0..timeframes`.
    pub fn allocate<'v, P, I>(prop: &mut P, vars: I, timeframes: usize) -> Self
    where
        P: Prop + ?Sized,
        I: IntoIterator<Item = (&'v str, usize)> + Clone,
    {
        let mut map = Self::new();
        for t in 0..timeframes {
            for (name, width) in vars.clone() {
                for bit in 0..width {
                    let l = prop.new_variable();
                    map.set(t, name, bit, l);
                }
            }
        }
        debug!(timeframes, "allocated bmc map");
        map
    }

    pub fn set(&mut self, timeframe: usize, identifier: &str, bit: usize, lit: Literal) {
        if self.timeframes.len() <= timeframe {
            self.timeframes.resize_with(timeframe + 1, HashMap::new);
        }
        let bits = self.timeframes[timeframe]
            .entry(identifier.to_string())
            .or_default();
        if bits.len() <= bit {
            bits.resize(bit + 1, None);
        }
        bits[bit] = Some(lit);
    }

    pub fn set_vector(&mut self, timeframe: usize, identifier: &str, bits: &[Literal]) {
        for (bit, l) in bits.iter().enumerate() {
            self.set(timeframe, identifier, bit, *l);
        }
    }

    pub fn try_get(&self, timeframe: usize, identifier: &str, bit: usize) -> Option<Literal> {
        self.timeframes
            .get(timeframe)?
            .get(identifier)?
            .get(bit)
            .copied()
            .flatten()
    }

    pub fn get(&self, timeframe: usize, identifier: &str, bit: usize) -> Literal {
        match self.try_get(timeframe, identifier, bit) {
            Some(l) => l,
            None => panic!(
                "bmc map has no literal for `{}' bit {} in timeframe {}",
                identifier, bit, timeframe
            ),
        }
    }

    /// All bits of a symbol in one timeframe, if fully populated.
    pub fn get_vector(&self, timeframe: usize, identifier: &str) -> Option<Vec<Literal>> {
        self.timeframes
            .get(timeframe)?
            .get(identifier)?
            .iter()
            .copied()
            .collect()
    }

    pub fn timeframes(&self) -> usize {
        self.timeframes.len()
    }
}

impl SymbolResolver for BmcMap {
    const MULTI_STEP: bool = true;

    fn resolve(&self, identifier: &str, bit: usize, timeframe: usize) -> Literal {
        self.get(timeframe, identifier, bit)
    }
}
