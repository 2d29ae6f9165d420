use thiserror::Error;

use super::grid::AssignmentError;
use super::model::FeasibilityModel;

/// Error types for the oracle boundary.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("invalid model: {0}")]
    InvalidModel(String),
    #[error("solver failed: {0}")]
    SolveFailed(String),
    #[error("unusable assignment: {0}")]
    Assignment(#[from] AssignmentError),
}

/// What one oracle invocation produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome {
    /// A satisfying point, one raw value per indicator in candidate index
    /// order. Which of several satisfying points a backend returns is
    /// unspecified.
    Feasible(Vec<f64>),
    /// No satisfying assignment exists. This is the enumeration's terminal
    /// signal, not a failure.
    Infeasible,
}

/// An external mixed-integer solver treated as a black box. It answers one
/// feasibility query per call and keeps no state between calls.
pub trait SolverOracle: Send + Sync {
    /// Answer a single feasibility query.
    fn solve(&self, model: &FeasibilityModel) -> Result<SolveOutcome, OracleError>;

    /// Structural check run before a model reaches the backend.
    fn validate(&self, model: &FeasibilityModel) -> Result<(), OracleError> {
        for constraint in &model.constraints {
            if constraint.terms.is_empty() {
                return Err(OracleError::InvalidModel(format!(
                    "constraint {} has no terms",
                    constraint.name
                )));
            }
            if let Some(&term) = constraint.terms.iter().find(|&&t| t >= model.variable_count()) {
                return Err(OracleError::InvalidModel(format!(
                    "constraint {} references variable {term}, model has {}",
                    constraint.name,
                    model.variable_count()
                )));
            }
        }
        Ok(())
    }

    /// Human-readable backend name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Constraint, OracleConfig};

    struct NeverCalled;

    impl SolverOracle for NeverCalled {
        fn solve(&self, _model: &FeasibilityModel) -> Result<SolveOutcome, OracleError> {
            unreachable!("validation tests never solve")
        }

        fn name(&self) -> &str {
            "never-called"
        }
    }

    fn model_with(constraints: Vec<Constraint>) -> FeasibilityModel {
        FeasibilityModel {
            constraints,
            config: OracleConfig::default(),
        }
    }

    #[test]
    fn validation_rejects_empty_rows() {
        let model = model_with(vec![Constraint::exactly_one(vec![], "hollow".into())]);
        let err = NeverCalled.validate(&model).unwrap_err();
        assert!(matches!(err, OracleError::InvalidModel(_)));
        assert!(err.to_string().contains("hollow"));
    }

    #[test]
    fn validation_rejects_out_of_range_terms() {
        let model = model_with(vec![Constraint::exactly_one(vec![729], "beyond".into())]);
        let err = NeverCalled.validate(&model).unwrap_err();
        assert!(err.to_string().contains("729"));
    }

    #[test]
    fn validation_accepts_a_real_build() {
        let puzzle = crate::domain::grid::Puzzle::from_givens([(1, 1, 1)]);
        let model = FeasibilityModel::for_puzzle(&puzzle, &[], OracleConfig::default());
        assert!(NeverCalled.validate(&model).is_ok());
    }
}
