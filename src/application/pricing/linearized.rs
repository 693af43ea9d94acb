//! Linearized pricing solved as a linear program.
//!
//! Each item gets one variable `x_i` in `[0, 1]`, its normalized price. Profit
//! is approximated by the straight line through its values at `min_price`
//! and `max_price`, so the objective coefficient is the profit gained by
//! moving from one end of the range to the other.
//!
//! Ingredient limits add a demand variable `d_i >= 0` for every item with a
//! recipe. Its smallest feasible value is the clamped demand, so the limits
//! hold exactly for the prices chosen:
//!
//! ```text
//! d_i + base_i * e_i * x_i >= base_i
//! sum_i qty_ij * d_i       <= available_j
//! ```

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::debug;

use super::{Pricer, PricingInput};
use crate::domain::{MenuItem, Price, PricingMethod};
use crate::error::{PricingError, Result};
use crate::port::{Constraint, LpProblem, Solver, VariableBounds};

/// Decimal places kept from the solver's normalized prices.
const SOLUTION_DP: u32 = 6;

/// Prices the whole menu in one LP, optionally capped by ingredient stock.
pub struct LinearizedPricer {
    solver: Arc<dyn Solver>,
    enforce_inventory: bool,
}

impl LinearizedPricer {
    #[must_use]
    pub fn new(solver: Arc<dyn Solver>, enforce_inventory: bool) -> Self {
        Self {
            solver,
            enforce_inventory,
        }
    }

    /// Build the minimization problem for `input`.
    ///
    /// The first `input.items.len()` variables are the normalized prices.
    pub(super) fn build_problem(&self, input: &PricingInput<'_>) -> LpProblem {
        let n = input.items.len();
        let mut problem = LpProblem::new(n);
        problem.bounds = vec![VariableBounds::unit(); n];
        problem.objective = input.items.iter().map(objective_coefficient).collect();

        if self.enforce_inventory {
            add_stock_constraints(&mut problem, input);
        }

        problem
    }
}

/// Negated profit swing across the price range; zero for a fixed price.
fn objective_coefficient(item: &MenuItem) -> Decimal {
    if item.price_range().is_zero() {
        return Decimal::ZERO;
    }
    -(item.profit_at(item.max_price()) - item.profit_at(item.min_price()))
}

fn add_stock_constraints(problem: &mut LpProblem, input: &PricingInput<'_>) {
    // (ingredient index, item index, quantity per unit sold)
    let mut uses = Vec::new();
    for (j, ingredient) in input.ingredients.iter().enumerate() {
        for line in input
            .recipes
            .iter()
            .filter(|line| Some(line.ingredient_id()) == ingredient.id())
        {
            if let Some(i) = input
                .items
                .iter()
                .position(|item| item.id() == Some(line.menu_item_id()))
            {
                uses.push((j, i, line.quantity()));
            }
        }
    }
    if uses.is_empty() {
        return;
    }

    let mut demand_vars: Vec<Option<usize>> = vec![None; input.items.len()];
    for &(_, i, _) in &uses {
        if demand_vars[i].is_none() {
            demand_vars[i] = Some(problem.num_vars());
            problem.objective.push(Decimal::ZERO);
            problem.bounds.push(VariableBounds::non_negative());
        }
    }
    let width = problem.num_vars();

    for (i, var) in demand_vars.iter().enumerate() {
        let Some(var) = *var else {
            continue;
        };
        let item = &input.items[i];
        let mut coefficients = vec![Decimal::ZERO; width];
        coefficients[var] = Decimal::ONE;
        if !item.price_range().is_zero() {
            coefficients[i] = item.base_demand() * item.elasticity();
        }
        problem
            .constraints
            .push(Constraint::geq(coefficients, item.base_demand()));
    }

    for (j, ingredient) in input.ingredients.iter().enumerate() {
        let mut coefficients = vec![Decimal::ZERO; width];
        let mut used = false;
        for &(_, i, quantity) in uses.iter().filter(|(k, _, _)| *k == j) {
            if let Some(var) = demand_vars[i] {
                coefficients[var] += quantity;
                used = true;
            }
        }
        if used {
            debug!(
                ingredient = ingredient.name(),
                available = %ingredient.available_quantity(),
                "Added stock constraint"
            );
            problem
                .constraints
                .push(Constraint::leq(coefficients, ingredient.available_quantity()));
        }
    }
}

impl Pricer for LinearizedPricer {
    fn method(&self) -> PricingMethod {
        PricingMethod::Linearized
    }

    fn choose_prices(&self, input: &PricingInput<'_>) -> Result<Vec<Price>> {
        let problem = self.build_problem(input);
        debug!(
            solver = self.solver.name(),
            vars = problem.num_vars(),
            constraints = problem.constraints.len(),
            "Solving linearized pricing LP"
        );

        let solution = self.solver.solve_lp(&problem)?;
        if !solution.is_optimal() {
            return Err(PricingError::SolverFailed {
                solver: self.solver.name(),
                status: solution.status.to_string(),
            }
            .into());
        }
        if solution.values.len() != problem.num_vars() {
            return Err(PricingError::SolutionSizeMismatch {
                expected: problem.num_vars(),
                got: solution.values.len(),
            }
            .into());
        }

        Ok(input
            .items
            .iter()
            .zip(solution.values)
            .map(|(item, x)| {
                if item.price_range().is_zero() {
                    return item.min_price();
                }
                let x = x.round_dp(SOLUTION_DP).clamp(Decimal::ZERO, Decimal::ONE);
                item.price_at(x)
            })
            .collect())
    }
}
