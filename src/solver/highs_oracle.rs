// HiGHS Oracle Adapter
// Implements the SolverOracle interface for HiGHS
// This is an adapter pattern - translates the feasibility model to the HiGHS API

use crate::domain::{
    model::{Comparison, FeasibilityModel},
    oracle::{OracleError, SolveOutcome, SolverOracle},
};
use std::time::Instant;

pub struct HighsOracle;

impl HighsOracle {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HighsOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl SolverOracle for HighsOracle {
    fn solve(&self, model: &FeasibilityModel) -> Result<SolveOutcome, OracleError> {
        // Validate first
        self.validate(model)?;

        let start_time = Instant::now();

        // Use HiGHS RowProblem (add variables first, then constraints)
        use highs::{HighsModelStatus, RowProblem, Sense};

        let mut pb = RowProblem::default();

        // One binary indicator per candidate, all objective coefficients
        // zero: this is a feasibility query
        let columns: Vec<_> = (0..model.variable_count())
            .map(|_| pb.add_integer_column(0.0, 0.0..=1.0))
            .collect();

        // All rows are unit-coefficient sums over candidate indicators
        for constraint in &model.constraints {
            let terms: Vec<_> = constraint
                .terms
                .iter()
                .map(|&term| (columns[term], 1.0))
                .collect();

            match constraint.comparison {
                Comparison::Equal => {
                    pb.add_row(constraint.rhs..=constraint.rhs, &terms);
                }
                Comparison::AtMost => {
                    pb.add_row(..=constraint.rhs, &terms);
                }
            }
        }

        let mut highs_model = pb.optimise(Sense::Minimise);
        highs_model.set_option("presolve", if model.config.presolve { "on" } else { "off" });
        highs_model.set_option("output_flag", model.config.verbose);
        if let Some(limit) = model.config.time_limit {
            highs_model.set_option("time_limit", limit);
        }

        let solved = highs_model.solve();
        log::debug!(
            "HiGHS answered {} constraints in {:.1} ms",
            model.constraints.len(),
            start_time.elapsed().as_secs_f64() * 1000.0
        );

        match solved.status() {
            HighsModelStatus::Optimal => {
                let values = solved.get_solution().columns().to_vec();
                Ok(SolveOutcome::Feasible(values))
            }
            HighsModelStatus::Infeasible => Ok(SolveOutcome::Infeasible),
            status => Err(OracleError::SolveFailed(format!(
                "HiGHS solver returned status: {:?}",
                status
            ))),
        }
    }

    fn name(&self) -> &str {
        "HiGHS"
    }
}
