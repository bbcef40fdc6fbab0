use anyhow::{anyhow, Context, Result};
use tracing::debug;
use varisat::cnf::CnfFormula;
use varisat::lit::Lit;
use varisat::solver::Solver;
use varisat::ExtendFormula;

use super::cnf::Cnf;

/// Solve a CNF; returns the model indexed by variable when satisfiable.
pub fn solve_cnf(c: &Cnf) -> Result<Option<Vec<bool>>> {
    let mut solver = Solver::new();
    let mut f = CnfFormula::new();
    debug!(
        num_clauses = c.clauses.len(),
        num_vars = c.num_vars,
        "solve_cnf start"
    );
    for cl in &c.clauses {
        // varisat variables are 1-based, same as DIMACS
        let lits: Vec<Lit> = cl
            .iter()
            .map(|lit| Lit::from_dimacs(lit.to_dimacs() as isize))
            .collect();
        f.add_clause(&lits);
    }
    solver.add_formula(&f);
    let sat = solver
        .solve()
        .map_err(|e| anyhow!("varisat failed: {:?}", e))?;
    if !sat {
        debug!("solve_cnf: UNSAT");
        return Ok(None);
    }
    let model = solver.model().context("varisat returned no model")?;
    let mut vals = vec![false; c.num_vars];
    for lit in model {
        let d = lit.to_dimacs();
        let var = d.unsigned_abs() - 1;
        if var < vals.len() {
            vals[var] = d > 0;
        }
    }
    debug!("solve_cnf: SAT");
    Ok(Some(vals))
}
