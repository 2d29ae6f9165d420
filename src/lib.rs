// Domain layer: grid data, the feasibility model and the oracle contract
pub mod domain;

// Application layer: the all-solutions enumeration protocol
pub mod application;

// Infrastructure layer: puzzle files and terminal output
pub mod infrastructure;

// Solver adapters: Concrete implementations of SolverOracle
pub mod solver;

// Re-export commonly used types
pub use domain::{
    AssignmentError, Backend, Candidate, Comparison, Constraint, FeasibilityModel, OracleConfig,
    OracleError, Puzzle, PuzzleError, SolveOutcome, SolvedGrid, SolverOracle,
};

pub use application::{
    run_enumeration, Enumeration, EnumerationError, EnumerationReport, MultiPresenter, Presenter,
    SearchControl, SearchState,
};

pub use infrastructure::{read_puzzle, AcceptAll, BoardPresenter, StdinControl, TextPresenter};

pub use solver::{CoinCbcOracle, HighsOracle, OracleFactory};
