// Domain module: grid data, the feasibility model and the oracle contract

pub mod grid;
pub mod model;
pub mod oracle;

pub use grid::*;
pub use model::*;
pub use oracle::*;
