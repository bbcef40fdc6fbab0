//! Script driver: unrolls the selected transition system into CNF and either
//! prints it as DIMACS or solves it.

use anyhow::{bail, Context, Result};
use std::fmt::Write as _;
use tracing::{debug, info};

use crate::config::EncoderConfig;
use crate::diagnostics::MessageHandler;
use crate::expr::{Expr, ExprKind};
use crate::frame::Frame;
use crate::instantiate::{
    delay_offset, instantiate_constraint, instantiate_convert_bv, try_instantiate_constraint,
    try_instantiate_convert_bv,
};
use crate::map::BmcMap;
use crate::namespace::Namespace;
use crate::script::Script;
use crate::solver::sat::solve_cnf;
use crate::solver::{Bv, CnfProp};

/// What happens when an expression cannot be encoded.
enum OnError<'m> {
    /// Return the error to the caller.
    Propagate,
    /// Report through the handler and exit with status 1.
    Exit(&'m mut dyn MessageHandler),
}

/// Result of unrolling a script.
pub struct Encoding {
    pub prop: CnfProp,
    pub map: BmcMap,
    /// Literals of every `convert` command, in script order.
    pub conversions: Vec<(String, Expr, Bv)>,
}

struct Encoder<'s, 'm> {
    prop: CnfProp,
    map: BmcMap,
    ns: &'s Namespace,
    timeframes: usize,
    on_error: OnError<'m>,
}

impl<'s, 'm> Encoder<'s, 'm> {
    /// Rejects expressions that would read a timeframe the map has no
    /// literals for.
    fn check_reach(&self, expr: &Expr, frame: Frame, what: &str) -> Result<()> {
        match reach(expr, frame) {
            Some(t) if t >= self.timeframes => bail!(
                "{} reaches timeframe {}, but only {} timeframe(s) are allocated",
                what,
                t,
                self.timeframes
            ),
            _ => Ok(()),
        }
    }

    fn constraint(&mut self, expr: &Expr, frame: Frame, what: &str) -> Result<()> {
        self.check_reach(expr, frame, what)?;
        match &mut self.on_error {
            OnError::Propagate => {
                try_instantiate_constraint(&mut self.prop, &self.map, expr, frame, self.ns)
                    .with_context(|| format!("failed to encode {} at {:?}", what, frame))
            }
            OnError::Exit(messages) => {
                instantiate_constraint(
                    &mut self.prop,
                    &self.map,
                    expr,
                    frame.current,
                    frame.next,
                    self.ns,
                    &mut **messages,
                );
                Ok(())
            }
        }
    }

    fn convert(&mut self, expr: &Expr, frame: Frame, name: &str) -> Result<Bv> {
        self.check_reach(expr, frame, &format!("conversion `{}'", name))?;
        match &mut self.on_error {
            OnError::Propagate => {
                try_instantiate_convert_bv(&mut self.prop, &self.map, expr, frame, self.ns)
                    .with_context(|| format!("failed to convert `{}'", name))
            }
            OnError::Exit(messages) => Ok(instantiate_convert_bv(
                &mut self.prop,
                &self.map,
                expr,
                frame.current,
                frame.next,
                self.ns,
                &mut **messages,
            )),
        }
    }
}

/// Latest timeframe a symbol leaf of `expr` is read in, following cycle
/// delays. Delays with non-constant bounds are left for the encoder to
/// report.
fn reach(expr: &Expr, frame: Frame) -> Option<usize> {
    match &expr.kind {
        ExprKind::Symbol(_) => Some(frame.current),
        ExprKind::NextSymbol(_) => Some(frame.next),
        ExprKind::SvaCycleDelay if expr.operands.len() == 3 => {
            let (from, to, body) = (&expr.operands[0], &expr.operands[1], &expr.operands[2]);
            let last = if to.is_nil() {
                delay_offset(from)
            } else {
                // half-open range; an empty one reads nothing
                match (delay_offset(from), delay_offset(to)) {
                    (Some(from), Some(to)) if to > from => Some(to - 1),
                    (Some(_), Some(_)) => return None,
                    _ => None,
                }
            };
            let shifted = Frame::new(
                frame.current.saturating_add(last.unwrap_or(0)),
                frame.next.saturating_add(last.unwrap_or(0)),
            );
            reach(body, shifted)
        }
        _ => expr.operands.iter().filter_map(|op| reach(op, frame)).max(),
    }
}

fn unroll(script: &Script, config: &EncoderConfig, on_error: OnError<'_>) -> Result<Encoding> {
    if config.timeframes == 0 {
        bail!("at least one timeframe is required");
    }
    let ts = script.transition_system()?;

    let mut prop = CnfProp::new_with_config(config.clone());
    let map = BmcMap::allocate(&mut prop, ts.var_widths(&script.ns), config.timeframes);
    let mut enc = Encoder {
        prop,
        map,
        ns: &script.ns,
        timeframes: config.timeframes,
        on_error,
    };

    enc.constraint(&ts.init, Frame::step(0), "init")?;
    for t in 0..config.timeframes - 1 {
        debug!(t, "unrolling transition");
        enc.constraint(&ts.trans, Frame::step(t), "trans")?;
    }
    for (i, (expr, frame)) in script.constraints.iter().enumerate() {
        enc.constraint(expr, *frame, &format!("constraint #{}", i + 1))?;
    }

    let mut conversions = Vec::with_capacity(script.conversions.len());
    for c in &script.conversions {
        let bits = enc.convert(&c.expr, c.frame, &c.name)?;
        conversions.push((c.name.clone(), c.expr.clone(), bits));
    }

    info!(
        module = %ts.module,
        timeframes = config.timeframes,
        vars = enc.prop.num_vars(),
        clauses = enc.prop.cnf().clauses.len(),
        "encoding done"
    );
    Ok(Encoding {
        prop: enc.prop,
        map: enc.map,
        conversions,
    })
}

/// Unrolls `script`, returning encoding errors to the caller.
pub fn encode(script: &Script, config: &EncoderConfig) -> Result<Encoding> {
    unroll(script, config, OnError::Propagate)
}

/// Unrolls `script`. Encoding errors are reported through `messages` and
/// terminate the process with status 1.
pub fn encode_or_exit(
    script: &Script,
    config: &EncoderConfig,
    messages: &mut dyn MessageHandler,
) -> Result<Encoding> {
    unroll(script, config, OnError::Exit(messages))
}

pub fn run_script(input: &str, config: &EncoderConfig) -> Result<String> {
    let script = Script::parse(input)?;
    let encoding = encode(&script, config)?;
    render(&script, encoding, config)
}

pub fn run_script_or_exit(
    input: &str,
    config: &EncoderConfig,
    messages: &mut dyn MessageHandler,
) -> Result<String> {
    let script = Script::parse(input)?;
    let encoding = encode_or_exit(&script, config, messages)?;
    render(&script, encoding, config)
}

fn render(script: &Script, encoding: Encoding, config: &EncoderConfig) -> Result<String> {
    let mut out = String::new();
    if !config.solve {
        for (name, _, bits) in &encoding.conversions {
            let _ = write!(out, "c convert {}", name);
            for l in bits {
                let _ = write!(out, " {}", l.to_dimacs());
            }
            out.push('\n');
        }
        out.push_str(&encoding.prop.cnf().to_dimacs());
        return Ok(out);
    }

    match solve_cnf(encoding.prop.cnf()).context("SAT check failed")? {
        None => out.push_str("unsat\n"),
        Some(model) => {
            out.push_str("sat\n");
            for (name, expr, bits) in &encoding.conversions {
                let _ = writeln!(out, "{} {}", name, value(script, expr, bits, &model));
            }
        }
    }
    Ok(out)
}

/// `true`/`false` for booleans, `#b` binary (most significant bit first)
/// otherwise.
fn value(script: &Script, expr: &Expr, bits: &Bv, model: &[bool]) -> String {
    if script.ns.is_bool(&expr.ty) && bits.len() == 1 {
        return bits[0].eval(model).to_string();
    }
    let digits: String = bits
        .iter()
        .rev()
        .map(|l| if l.eval(model) { '1' } else { '0' })
        .collect();
    format!("#b{}", digits)
}
