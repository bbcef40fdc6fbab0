//! Timeframe-aware bit-blasting of transition-system expressions for bounded
//! model checking.

pub mod boolbv;
pub mod config;
pub mod diagnostics;
pub mod driver;
pub mod error;
pub mod expr;
pub mod frame;
pub mod instantiate;
pub mod map;
pub mod namespace;
pub mod script;
pub mod sexpr;
pub mod solver;
pub mod trans;

pub use config::EncoderConfig;
pub use error::{DecodeError, DecodeResult};
pub use expr::{Expr, ExprKind, Type};
pub use frame::Frame;
pub use map::{BmcMap, Phase, SymbolResolver, VarMap};
pub use namespace::Namespace;
pub use solver::{Bv, Cnf, CnfProp, Literal, Prop};
