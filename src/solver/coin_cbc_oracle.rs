use crate::domain::{
    model::{Comparison, FeasibilityModel},
    oracle::{OracleError, SolveOutcome, SolverOracle},
};
use good_lp::{
    solvers::coin_cbc, variable, variables, Expression, ResolutionError,
    Solution as GoodLpSolutionTrait, SolverModel, Variable as GoodLpVariable,
};
use std::time::Instant;

pub struct CoinCbcOracle;

impl CoinCbcOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CoinCbcOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverOracle for CoinCbcOracle {
    fn solve(&self, model: &FeasibilityModel) -> Result<SolveOutcome, OracleError> {
        // Validate first
        self.validate(model)?;

        let start_time = Instant::now();

        // One binary indicator per candidate
        let mut vars = variables!();
        let mut indicators: Vec<GoodLpVariable> = Vec::with_capacity(model.variable_count());
        for _ in 0..model.variable_count() {
            indicators.push(vars.add(variable().integer().min(0.0).max(1.0)));
        }

        // Feasibility query: a constant objective leaves the backend free
        // to return any satisfying point
        let objective: Expression = 0.into();
        let mut lp_model = vars.minimise(objective).using(coin_cbc::coin_cbc);

        lp_model.set_parameter("preprocess", if model.config.presolve { "on" } else { "off" });
        lp_model.set_parameter("logLevel", if model.config.verbose { "1" } else { "0" });
        if let Some(limit) = model.config.time_limit {
            lp_model.set_parameter("seconds", &limit.to_string());
        }

        // All rows are unit-coefficient sums over candidate indicators
        for constraint in &model.constraints {
            let mut lhs: Expression = 0.into();
            for &term in &constraint.terms {
                lhs += 1.0 * indicators[term];
            }

            match constraint.comparison {
                Comparison::Equal => {
                    lp_model = lp_model.with(lhs.eq(constraint.rhs));
                }
                Comparison::AtMost => {
                    lp_model = lp_model.with(lhs.leq(constraint.rhs));
                }
            }
        }

        let solution_result = lp_model.solve();
        log::debug!(
            "CBC answered {} constraints in {:.1} ms",
            model.constraints.len(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        match solution_result {
            Ok(sol) => {
                let values = indicators.iter().map(|&var| sol.value(var)).collect();
                Ok(SolveOutcome::Feasible(values))
            }
            Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
            Err(e) => Err(OracleError::SolveFailed(format!("CBC: {:?}", e))),
        }
    }

    fn name(&self) -> &str {
        "COIN-OR CBC"
    }
}
