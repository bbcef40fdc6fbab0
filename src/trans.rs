use std::collections::BTreeMap;

use anyhow::{anyhow, Result};

use crate::expr::{Expr, Type};
use crate::namespace::Namespace;

/// State variables plus initial-state and transition constraints of one
/// module.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionSystem {
    pub module: String,
    pub state_vars: Vec<(String, Type)>,
    pub init: Expr,
    pub trans: Expr,
}

impl TransitionSystem {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            state_vars: Vec::new(),
            init: Expr::bool_const(true),
            trans: Expr::bool_const(true),
        }
    }

    pub fn add_state_var(&mut self, name: impl Into<String>, ty: Type) {
        self.state_vars.push((name.into(), ty));
    }

    pub fn state_var(&self, name: &str) -> Option<&Type> {
        self.state_vars
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, ty)| ty)
    }

    /// `(name, width)` of every state variable with a fixed bit encoding.
    pub fn var_widths(&self, ns: &Namespace) -> Vec<(&str, usize)> {
        self.state_vars
            .iter()
            .map(|(name, ty)| (name.as_str(), ns.boolbv_width(ty)))
            .filter(|(_, w)| *w > 0)
            .collect()
    }
}

/// Transition systems of a design, by module name.
#[derive(Clone, Debug, Default)]
pub struct Design {
    modules: BTreeMap<String, TransitionSystem>,
}

impl Design {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, ts: TransitionSystem) {
        self.modules.insert(ts.module.clone(), ts);
    }

    pub fn get_trans(&self, module: &str) -> Result<&TransitionSystem> {
        self.modules
            .get(module)
            .ok_or_else(|| anyhow!("module `{}' not found", module))
    }

    pub fn get_trans_mut(&mut self, module: &str) -> Result<&mut TransitionSystem> {
        self.modules
            .get_mut(module)
            .ok_or_else(|| anyhow!("module `{}' not found", module))
    }
}
