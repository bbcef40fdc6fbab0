//! Elaboration of driver scripts into transition systems, constraints and
//! named conversions.
//!
//! ```text
//! (module counter)
//! (declare-var x (unsigned 4))
//! (init (= x 0))
//! (trans (= (next x) (+ x 1)))
//! (constraint (|-> (= x 1) (## 1 (= x 2))))
//! (convert x_at_1 x 1 2)
//! ```
//!
//! `;` starts a line comment. The one exception is `;;` written as the head
//! of a list, as in `(;; a b)`, which is sequence concatenation. Anywhere
//! else `;;` is a comment, so `(and a ;; b)` is `(and a)`.

use anyhow::{anyhow, bail, Context, Result};
use tracing::debug;

use crate::expr::{Expr, ExprKind, Type};
use crate::frame::Frame;
use crate::namespace::Namespace;
use crate::sexpr::{parse_all, SExpr};
use crate::trans::{Design, TransitionSystem};

const DEFAULT_MODULE: &str = "main";

/// A named expression whose literals the driver reports.
#[derive(Clone, Debug, PartialEq)]
pub struct Conversion {
    pub name: String,
    pub expr: Expr,
    pub frame: Frame,
}

#[derive(Clone, Debug)]
pub struct Script {
    pub design: Design,
    pub ns: Namespace,
    /// Module the last `module` command selected.
    pub module: String,
    pub constraints: Vec<(Expr, Frame)>,
    pub conversions: Vec<Conversion>,
}

impl Script {
    pub fn parse(input: &str) -> Result<Script> {
        let mut script = Script {
            design: Design::new(),
            ns: Namespace::new(),
            module: DEFAULT_MODULE.to_string(),
            constraints: Vec::new(),
            conversions: Vec::new(),
        };
        script.design.add(TransitionSystem::new(DEFAULT_MODULE));

        for cmd in parse_all(input)? {
            script
                .command(&cmd)
                .with_context(|| format!("in command {}", cmd))?;
        }
        debug!(
            module = %script.module,
            constraints = script.constraints.len(),
            conversions = script.conversions.len(),
            "script elaborated"
        );
        Ok(script)
    }

    pub fn transition_system(&self) -> Result<&TransitionSystem> {
        self.design.get_trans(&self.module)
    }

    fn command(&mut self, cmd: &SExpr) -> Result<()> {
        let items = cmd.as_list().ok_or_else(|| anyhow!("expected command list"))?;
        let (head, args) = match items.split_first() {
            Some((head, args)) => (atom(head)?, args),
            None => bail!("empty command"),
        };

        match head {
            "module" => {
                let [name] = args else { bail!("module expects a name") };
                let name = atom(name)?;
                if self.design.get_trans(name).is_err() {
                    self.design.add(TransitionSystem::new(name));
                }
                self.module = name.to_string();
            }
            "typedef" => {
                let [name, ty] = args else { bail!("typedef expects a name and a type") };
                let ty = self.parse_type(ty)?;
                self.ns.add_type(atom(name)?, ty);
            }
            "declare-var" => {
                let [name, ty] = args else { bail!("declare-var expects a name and a type") };
                let name = atom(name)?;
                let ty = self.parse_type(ty)?;
                let ts = self.design.get_trans_mut(&self.module)?;
                if ts.state_var(name).is_some() {
                    bail!("variable `{}' already declared", name);
                }
                ts.add_state_var(name, ty);
            }
            "init" | "trans" => {
                let [e] = args else { bail!("{} expects one expression", head) };
                let e = self.bool_expr(e)?;
                let ts = self.design.get_trans_mut(&self.module)?;
                let slot = if head == "init" { &mut ts.init } else { &mut ts.trans };
                *slot = conjoin(std::mem::replace(slot, Expr::bool_const(true)), e);
            }
            "constraint" => {
                let (e, frame) = match args {
                    [e] => (e, Frame::step(0)),
                    [e, cur, next] => (e, Frame::new(timeframe(cur)?, timeframe(next)?)),
                    _ => bail!("constraint expects an expression and an optional frame"),
                };
                let e = self.bool_expr(e)?;
                self.constraints.push((e, frame));
            }
            "convert" => {
                let (name, e, frame) = match args {
                    [name, e] => (name, e, Frame::step(0)),
                    [name, e, cur, next] => {
                        (name, e, Frame::new(timeframe(cur)?, timeframe(next)?))
                    }
                    _ => bail!("convert expects a name, an expression and an optional frame"),
                };
                let conversion = Conversion {
                    name: atom(name)?.to_string(),
                    expr: self.expr(e)?,
                    frame,
                };
                self.conversions.push(conversion);
            }
            other => bail!("unknown command `{}'", other),
        }
        Ok(())
    }

    fn parse_type(&self, s: &SExpr) -> Result<Type> {
        match s {
            SExpr::Atom(a) => match a.as_str() {
                "bool" => Ok(Type::Bool),
                "integer" => Ok(Type::Integer),
                "natural" => Ok(Type::Natural),
                name if self.ns.lookup(name).is_some() => Ok(Type::Named(name.to_string())),
                name => bail!("unknown type `{}'", name),
            },
            SExpr::List(items) => {
                let [kind, width] = items.as_slice() else { bail!("malformed type {}", s) };
                let width: usize = atom(width)?
                    .parse()
                    .with_context(|| format!("bad width in type {}", s))?;
                if width == 0 {
                    bail!("zero-width type {}", s);
                }
                match atom(kind)? {
                    "unsigned" => Ok(Type::Unsignedbv(width)),
                    "signed" => Ok(Type::Signedbv(width)),
                    "bv" => Ok(Type::Bitvector(width)),
                    other => bail!("unknown type constructor `{}'", other),
                }
            }
        }
    }

    fn bool_expr(&self, s: &SExpr) -> Result<Expr> {
        let e = self.expr(s)?;
        if !self.ns.is_bool(&e.ty) {
            bail!("expected a boolean expression, got {}", e);
        }
        Ok(e)
    }

    fn width(&self, e: &Expr) -> usize {
        self.ns.boolbv_width(&e.ty)
    }

    fn expr(&self, s: &SExpr) -> Result<Expr> {
        let items = match s {
            SExpr::Atom(a) => return self.leaf(a),
            SExpr::List(items) => items,
        };
        let (head, args) = match items.split_first() {
            Some((head, args)) => (atom(head)?, args),
            None => bail!("empty expression"),
        };
        let ops = args
            .iter()
            .map(|a| self.expr(a))
            .collect::<Result<Vec<_>>>()?;

        let e = match (head, ops.len()) {
            ("next", 1) => {
                let id = ops[0]
                    .identifier()
                    .ok_or_else(|| anyhow!("next expects a state variable"))?;
                Expr::next_symbol(id, ops[0].ty.clone())
            }
            ("not", 1) => Expr::not(into_one(ops)),
            ("and", _) => Expr::and(ops),
            ("or", _) => Expr::or(ops),
            ("xor", _) => Expr::new(ExprKind::Xor, Type::Bool, ops),
            ("=>", 2) => {
                let [a, b] = into_two(ops);
                Expr::implies(a, b)
            }
            ("=", 2) | ("!=", 2) => {
                let [a, b] = self.unify(into_two(ops));
                let kind = if head == "=" { ExprKind::Equal } else { ExprKind::NotEqual };
                Expr::new(kind, Type::Bool, vec![a, b])
            }
            ("ite", 3) => {
                let [c, t, e] = into_array(ops);
                let [t, e] = self.unify([t, e]);
                let ty = t.ty.clone();
                Expr::new(ExprKind::IfThenElse, ty, vec![c, t, e])
            }
            ("~", 1) => {
                let a = into_one(ops);
                Expr::new(ExprKind::BitNot, a.ty.clone(), vec![a])
            }
            ("-", 1) => {
                let a = into_one(ops);
                Expr::new(ExprKind::UnaryMinus, a.ty.clone(), vec![a])
            }
            ("&" | "|" | "^" | "+" | "-" | "*", 2) => {
                let kind = match head {
                    "&" => ExprKind::BitAnd,
                    "|" => ExprKind::BitOr,
                    "^" => ExprKind::BitXor,
                    "+" => ExprKind::Plus,
                    "-" => ExprKind::Minus,
                    _ => ExprKind::Mult,
                };
                let [a, b] = self.unify(into_two(ops));
                Expr::binary(kind, a, b)
            }
            ("<" | "<=" | ">" | ">=", 2) => {
                let kind = match head {
                    "<" => ExprKind::Lt,
                    "<=" => ExprKind::Le,
                    ">" => ExprKind::Gt,
                    _ => ExprKind::Ge,
                };
                let [a, b] = self.unify(into_two(ops));
                Expr::new(kind, Type::Bool, vec![a, b])
            }
            ("bit", 2) => Expr::new(ExprKind::Extractbit, Type::Bool, ops),
            ("extract", 3) => {
                let upper = constant(&ops[1])?;
                let lower = constant(&ops[2])?;
                if lower > upper {
                    bail!("extract bounds [{}:{}] are reversed", upper, lower);
                }
                let width = usize::try_from(upper - lower + 1)?;
                Expr::new(ExprKind::Extractbits, Type::Unsignedbv(width), ops)
            }
            ("concat", n) if n > 0 => {
                let width: usize = ops.iter().map(|o| self.width(o)).sum();
                Expr::new(ExprKind::Concatenation, Type::Unsignedbv(width), ops)
            }
            ("|->", 2) => {
                let [a, b] = into_two(ops);
                Expr::overlapped_implication(a, b)
            }
            ("|=>", 2) => {
                let [a, b] = into_two(ops);
                Expr::non_overlapped_implication(a, b)
            }
            ("##", 2) => {
                let [from, body] = into_two(ops);
                Expr::cycle_delay(from, None, body)
            }
            ("##", 3) => {
                let [from, to, body] = into_array(ops);
                Expr::cycle_delay(from, Some(to), body)
            }
            (";;", 2) => {
                let [a, b] = into_two(ops);
                Expr::sequence_concatenation(a, b)
            }
            (op, n) => bail!("unknown operator `{}' with {} operand(s)", op, n),
        };
        Ok(e)
    }

    fn leaf(&self, a: &str) -> Result<Expr> {
        match a {
            "true" => return Ok(Expr::bool_const(true)),
            "false" => return Ok(Expr::bool_const(false)),
            _ => {}
        }
        if let Ok(v) = a.parse::<i128>() {
            return Ok(Expr::integer(v));
        }
        let ts = self.transition_system()?;
        match ts.state_var(a) {
            Some(ty) => Ok(Expr::symbol(a, ty.clone())),
            None => bail!("unknown symbol `{}'", a),
        }
    }

    /// Gives integer constants the type of the other operand.
    fn unify(&self, [a, b]: [Expr; 2]) -> [Expr; 2] {
        let retype = |c: Expr, other: &Expr| match c.kind {
            ExprKind::Constant(v) if c.ty == Type::Integer && self.width(other) > 0 => {
                Expr::constant(v, other.ty.clone())
            }
            _ => c,
        };
        let a = retype(a, &b);
        let b = retype(b, &a);
        [a, b]
    }
}

fn atom(s: &SExpr) -> Result<&str> {
    s.as_atom().ok_or_else(|| anyhow!("expected atom, got {}", s))
}

fn constant(e: &Expr) -> Result<i128> {
    e.to_integer()
        .ok_or_else(|| anyhow!("expected an integer constant, got {}", e))
}

fn timeframe(s: &SExpr) -> Result<usize> {
    atom(s)?
        .parse()
        .with_context(|| format!("bad timeframe {}", s))
}

fn into_one(ops: Vec<Expr>) -> Expr {
    let [a] = into_array(ops);
    a
}

fn into_two(ops: Vec<Expr>) -> [Expr; 2] {
    into_array(ops)
}

// callers match on the operand count first
fn into_array<const N: usize>(ops: Vec<Expr>) -> [Expr; N] {
    match ops.try_into() {
        Ok(arr) => arr,
        Err(ops) => unreachable!("expected {} operands, got {}", N, ops.len()),
    }
}

fn conjoin(acc: Expr, e: Expr) -> Expr {
    match acc.kind {
        ExprKind::True => e,
        ExprKind::And => {
            let mut ops = acc.operands;
            ops.push(e);
            Expr::and(ops)
        }
        _ => Expr::and(vec![acc, e]),
    }
}
