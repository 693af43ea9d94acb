//! HiGHS solver implementation via good_lp.
//!
//! HiGHS is a high-performance open-source linear programming solver.
//! This implementation wraps it using the good_lp crate for ergonomic Rust usage.

use good_lp::solvers::highs::highs;
use good_lp::{
    constraint, variable, variables, Expression, ResolutionError, Solution, SolverModel,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::Result;
use crate::port::outbound::solver::{
    ConstraintSense, LpProblem, LpSolution, SolutionStatus, Solver,
};

/// HiGHS-based LP solver.
#[derive(Debug, Default, Clone)]
pub struct HighsSolver;

impl HighsSolver {
    /// Create a new HiGHS solver instance.
    pub fn new() -> Self {
        Self
    }
}

impl Solver for HighsSolver {
    fn name(&self) -> &'static str {
        "highs"
    }

    fn solve_lp(&self, problem: &LpProblem) -> Result<LpSolution> {
        solve_with_good_lp(problem)
    }
}

fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or(0.0)
}

fn failed(n: usize, status: SolutionStatus) -> LpSolution {
    LpSolution {
        values: vec![Decimal::ZERO; n],
        objective: Decimal::ZERO,
        status,
    }
}

fn solve_with_good_lp(problem: &LpProblem) -> Result<LpSolution> {
    let n = problem.num_vars();

    if n == 0 {
        return Ok(LpSolution {
            values: vec![],
            objective: Decimal::ZERO,
            status: SolutionStatus::Optimal,
        });
    }

    let mut vars = variables!();
    let mut var_list = Vec::with_capacity(n);

    for bounds in &problem.bounds {
        let mut v = variable();
        if let Some(lb) = bounds.lower {
            v = v.min(to_f64(lb));
        }
        if let Some(ub) = bounds.upper {
            v = v.max(to_f64(ub));
        }
        var_list.push(vars.add(v));
    }

    let objective: Expression = var_list
        .iter()
        .zip(problem.objective.iter())
        .map(|(v, c)| to_f64(*c) * *v)
        .sum();

    let mut model = vars.minimise(&objective).using(highs);

    for constr in &problem.constraints {
        let lhs: Expression = var_list
            .iter()
            .zip(constr.coefficients.iter())
            .map(|(v, c)| to_f64(*c) * *v)
            .sum();
        let rhs = to_f64(constr.rhs);

        match constr.sense {
            ConstraintSense::GreaterEqual => {
                model = model.with(constraint!(lhs >= rhs));
            }
            ConstraintSense::LessEqual => {
                model = model.with(constraint!(lhs <= rhs));
            }
            ConstraintSense::Equal => {
                model = model.with(constraint!(lhs == rhs));
            }
        }
    }

    match model.solve() {
        Ok(solution) => {
            let values: Vec<Decimal> = var_list
                .iter()
                .map(|v| Decimal::try_from(solution.value(*v)).unwrap_or(Decimal::ZERO))
                .collect();

            // Re-evaluate objective with the solved values
            let obj_value: f64 = values
                .iter()
                .zip(problem.objective.iter())
                .map(|(v, c)| to_f64(*v) * to_f64(*c))
                .sum();

            Ok(LpSolution {
                values,
                objective: Decimal::try_from(obj_value).unwrap_or(Decimal::ZERO),
                status: SolutionStatus::Optimal,
            })
        }
        Err(ResolutionError::Infeasible) => Ok(failed(n, SolutionStatus::Infeasible)),
        Err(ResolutionError::Unbounded) => Ok(failed(n, SolutionStatus::Unbounded)),
        Err(e) => {
            debug!(error = %e, "HiGHS failed to solve");
            Ok(failed(n, SolutionStatus::Error))
        }
    }
}
