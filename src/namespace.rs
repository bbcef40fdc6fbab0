use std::collections::HashMap;

use crate::expr::Type;

// Guards against cyclic typedefs
const MAX_FOLLOW_DEPTH: usize = 64;

/// Named types of a design.
#[derive(Debug, Default, Clone)]
pub struct Namespace {
    types: HashMap<String, Type>,
}

impl Namespace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_type(&mut self, name: impl Into<String>, ty: Type) {
        self.types.insert(name.into(), ty);
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.types.get(name)
    }

    /// Resolves `Named` references; unknown names stay as they are.
    pub fn follow<'a>(&'a self, ty: &'a Type) -> &'a Type {
        let mut current = ty;
        for _ in 0..MAX_FOLLOW_DEPTH {
            match current {
                Type::Named(name) => match self.types.get(name) {
                    Some(next) => current = next,
                    None => return current,
                },
                _ => return current,
            }
        }
        current
    }

    /// Number of bits of the type, 0 if it has no fixed encoding.
    pub fn boolbv_width(&self, ty: &Type) -> usize {
        match self.follow(ty) {
            Type::Bool => 1,
            Type::Unsignedbv(w) | Type::Signedbv(w) | Type::Bitvector(w) => *w,
            Type::Integer | Type::Natural | Type::Empty | Type::Named(_) => 0,
        }
    }

    pub fn is_signed(&self, ty: &Type) -> bool {
        matches!(self.follow(ty), Type::Signedbv(_))
    }

    pub fn is_bool(&self, ty: &Type) -> bool {
        matches!(self.follow(ty), Type::Bool)
    }
}
