use std::fmt;

use super::grid::{Candidate, Puzzle, SolvedGrid, BOX_SIZE, CANDIDATE_COUNT, GRID_SIZE};

/// Which MIP backend answers the feasibility queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    /// Let the factory pick.
    #[default]
    Auto,
    /// COIN-OR CBC through good_lp.
    Cbc,
    /// HiGHS through its native bindings.
    Highs,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Auto => write!(f, "Auto"),
            Backend::Cbc => write!(f, "COIN-OR CBC"),
            Backend::Highs => write!(f, "HiGHS"),
        }
    }
}

/// Pass-through solver settings, attached to every model build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OracleConfig {
    pub backend: Backend,
    /// Backend presolving. Off unless explicitly re-enabled.
    pub presolve: bool,
    /// Wall-clock limit per solve, in seconds.
    pub time_limit: Option<f64>,
    /// Let the backend write its own log output.
    pub verbose: bool,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            backend: Backend::Auto,
            presolve: false,
            time_limit: None,
            verbose: false,
        }
    }
}

/// How a constraint row compares its indicator sum against the bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    /// sum == rhs, the exact-cover rows and the given fixings.
    Equal,
    /// sum <= rhs, the exclusion cuts.
    AtMost,
}

/// One linear row: the sum of the listed indicator variables compared
/// against `rhs`. Every row in this model is a plain sum, so coefficients
/// are an implied 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub comparison: Comparison,
    /// Candidate indices whose indicators participate in the sum.
    pub terms: Vec<usize>,
    pub rhs: f64,
    pub name: String,
}

impl Constraint {
    pub fn exactly_one(terms: Vec<usize>, name: String) -> Self {
        Self {
            comparison: Comparison::Equal,
            terms,
            rhs: 1.0,
            name,
        }
    }

    pub fn at_most(terms: Vec<usize>, rhs: f64, name: String) -> Self {
        Self {
            comparison: Comparison::AtMost,
            terms,
            rhs,
            name,
        }
    }
}

/// A pure feasibility model over the 729 cell-value indicators. There is
/// no objective; any satisfying assignment is acceptable.
#[derive(Debug, Clone, PartialEq)]
pub struct FeasibilityModel {
    pub constraints: Vec<Constraint>,
    pub config: OracleConfig,
}

impl FeasibilityModel {
    /// Build the model for `puzzle`, forbidding every grid in `excluded`.
    ///
    /// Constraint families in emission order: given fixings, one value per
    /// cell, each value once per row, once per column, once per box, then
    /// one cut per excluded solution. Rebuilding with the same inputs
    /// yields an identical model.
    pub fn for_puzzle(puzzle: &Puzzle, excluded: &[SolvedGrid], config: OracleConfig) -> Self {
        let mut constraints = Vec::with_capacity(puzzle.given_count() + 4 * 81 + excluded.len());
        constraints.extend(given_constraints(puzzle));
        constraints.extend(cell_constraints());
        constraints.extend(row_constraints());
        constraints.extend(column_constraints());
        constraints.extend(box_constraints());
        constraints.extend(exclusion_constraints(excluded));
        Self { constraints, config }
    }

    /// Number of indicator variables, fixed by the grid geometry.
    pub fn variable_count(&self) -> usize {
        CANDIDATE_COUNT
    }
}

/// Fix the indicator of every given to 1.
fn given_constraints(puzzle: &Puzzle) -> Vec<Constraint> {
    puzzle
        .givens()
        .map(|(row, col, value)| {
            let candidate = Candidate::new(row, col, value);
            Constraint::exactly_one(vec![candidate.index()], format!("given_r{row}_c{col}"))
        })
        .collect()
}

/// Every cell holds exactly one value.
fn cell_constraints() -> Vec<Constraint> {
    let mut rows = Vec::with_capacity(81);
    for row in 1..=GRID_SIZE {
        for col in 1..=GRID_SIZE {
            let terms = (1..=GRID_SIZE)
                .map(|value| Candidate::new(row, col, value).index())
                .collect();
            rows.push(Constraint::exactly_one(terms, format!("cell_r{row}_c{col}")));
        }
    }
    rows
}

/// Every value appears exactly once per row.
fn row_constraints() -> Vec<Constraint> {
    let mut rows = Vec::with_capacity(81);
    for row in 1..=GRID_SIZE {
        for value in 1..=GRID_SIZE {
            let terms = (1..=GRID_SIZE)
                .map(|col| Candidate::new(row, col, value).index())
                .collect();
            rows.push(Constraint::exactly_one(terms, format!("row_r{row}_v{value}")));
        }
    }
    rows
}

/// Every value appears exactly once per column.
fn column_constraints() -> Vec<Constraint> {
    let mut rows = Vec::with_capacity(81);
    for col in 1..=GRID_SIZE {
        for value in 1..=GRID_SIZE {
            let terms = (1..=GRID_SIZE)
                .map(|row| Candidate::new(row, col, value).index())
                .collect();
            rows.push(Constraint::exactly_one(terms, format!("col_c{col}_v{value}")));
        }
    }
    rows
}

/// Every value appears exactly once per 3×3 box.
fn box_constraints() -> Vec<Constraint> {
    let mut rows = Vec::with_capacity(81);
    for box_row in 0..BOX_SIZE {
        for box_col in 0..BOX_SIZE {
            for value in 1..=GRID_SIZE {
                let mut terms = Vec::with_capacity(9);
                for row in box_row * BOX_SIZE + 1..=(box_row + 1) * BOX_SIZE {
                    for col in box_col * BOX_SIZE + 1..=(box_col + 1) * BOX_SIZE {
                        terms.push(Candidate::new(row, col, value).index());
                    }
                }
                rows.push(Constraint::exactly_one(
                    terms,
                    format!("box_b{box_row}{box_col}_v{value}"),
                ));
            }
        }
    }
    rows
}

/// One cut per already-found solution: of its 81 candidates, at most 80
/// may be selected together again.
fn exclusion_constraints(excluded: &[SolvedGrid]) -> Vec<Constraint> {
    excluded
        .iter()
        .enumerate()
        .map(|(ordinal, grid)| {
            let terms: Vec<usize> = grid.candidates().map(Candidate::index).collect();
            let rhs = terms.len() as f64 - 1.0;
            Constraint::at_most(terms, rhs, format!("exclude_{}", ordinal + 1))
        })
        .collect()
}
