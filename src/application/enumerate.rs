use std::io;
use std::sync::Arc;

use log::{debug, info};
use thiserror::Error;

use crate::domain::{
    grid::{Puzzle, SolvedGrid},
    model::{FeasibilityModel, OracleConfig},
    oracle::{OracleError, SolveOutcome, SolverOracle},
};

/// Where found solutions go. Purely a sink; nothing feeds back into the
/// search.
pub trait Presenter {
    /// Called once per solution with its 1-based ordinal.
    fn present(&mut self, ordinal: usize, solution: &SolvedGrid) -> io::Result<()>;
}

/// Fan-out sink: delivers each solution to several presenters in order.
pub struct MultiPresenter {
    sinks: Vec<Box<dyn Presenter>>,
}

impl MultiPresenter {
    pub fn new(sinks: Vec<Box<dyn Presenter>>) -> Self {
        Self { sinks }
    }
}

impl Presenter for MultiPresenter {
    fn present(&mut self, ordinal: usize, solution: &SolvedGrid) -> io::Result<()> {
        for sink in &mut self.sinks {
            sink.present(ordinal, solution)?;
        }
        Ok(())
    }
}

/// Decides after each delivered solution whether the search keeps going.
pub trait SearchControl {
    fn continue_search(&mut self, found: usize) -> bool;
}

/// Search phase: still querying, or finished for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchState {
    Searching,
    Done,
}

/// Iterative all-solutions search over one puzzle.
///
/// Every round rebuilds the feasibility model from the givens plus every
/// solution found so far and asks the oracle once. A feasible answer
/// yields the decoded grid and joins the excluded list; infeasibility
/// ends the stream. Which satisfying point a backend returns among many
/// is unspecified, so the discovery order may differ between runs and
/// backends while the overall solution set does not.
pub struct Enumeration {
    oracle: Arc<dyn SolverOracle>,
    puzzle: Puzzle,
    config: OracleConfig,
    excluded: Vec<SolvedGrid>,
    state: SearchState,
}

impl Enumeration {
    pub fn new(oracle: Arc<dyn SolverOracle>, puzzle: Puzzle, config: OracleConfig) -> Self {
        Self {
            oracle,
            puzzle,
            config,
            excluded: Vec::new(),
            state: SearchState::Searching,
        }
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Solutions found so far.
    pub fn found(&self) -> usize {
        self.excluded.len()
    }

    /// The solutions found so far, in discovery order.
    pub fn solutions(&self) -> &[SolvedGrid] {
        &self.excluded
    }
}

impl Iterator for Enumeration {
    type Item = Result<SolvedGrid, OracleError>;

    /// One round of rebuild and query. `None` means the oracle proved the
    /// remaining space empty; after that no further queries are made.
    fn next(&mut self) -> Option<Self::Item> {
        if self.state == SearchState::Done {
            return None;
        }

        let model = FeasibilityModel::for_puzzle(&self.puzzle, &self.excluded, self.config);
        debug!(
            "round {}: asking {} with {} constraints",
            self.excluded.len() + 1,
            self.oracle.name(),
            model.constraints.len()
        );

        match self.oracle.solve(&model) {
            Ok(SolveOutcome::Feasible(values)) => match SolvedGrid::from_assignment(&values) {
                Ok(solution) => {
                    self.excluded.push(solution);
                    Some(Ok(solution))
                }
                Err(rejected) => {
                    self.state = SearchState::Done;
                    Some(Err(OracleError::Assignment(rejected)))
                }
            },
            Ok(SolveOutcome::Infeasible) => {
                self.state = SearchState::Done;
                None
            }
            Err(failure) => {
                self.state = SearchState::Done;
                Some(Err(failure))
            }
        }
    }
}

/// What a finished run looked like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumerationReport {
    /// Distinct solutions delivered.
    pub solutions: usize,
    /// True when the oracle proved there is nothing left; false when the
    /// control or the cap stopped the search early.
    pub exhausted: bool,
}

#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error(transparent)]
    Oracle(#[from] OracleError),
    #[error("presenting a solution failed: {0}")]
    Present(#[from] io::Error),
}

/// Drive the search: present each solution, honor the optional cap, then
/// let the control decide whether to keep going.
pub fn run_enumeration(
    enumeration: &mut Enumeration,
    presenter: &mut dyn Presenter,
    control: &mut dyn SearchControl,
    limit: Option<usize>,
) -> Result<EnumerationReport, EnumerationError> {
    if limit == Some(0) {
        return Ok(EnumerationReport {
            solutions: 0,
            exhausted: false,
        });
    }

    let mut solutions = 0;
    let exhausted = loop {
        let grid = match enumeration.next() {
            None => break true,
            Some(result) => result?,
        };

        solutions += 1;
        presenter.present(solutions, &grid)?;
        info!("solution {solutions} delivered");

        if let Some(cap) = limit {
            if solutions >= cap {
                info!("solution cap {cap} reached");
                break false;
            }
        }
        if !control.continue_search(solutions) {
            break false;
        }
    };

    if exhausted {
        info!("search space exhausted after {solutions} solution(s)");
    }

    Ok(EnumerationReport {
        solutions,
        exhausted,
    })
}
