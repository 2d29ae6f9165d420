// Puzzle file input; filesystem access stays out of the domain

use std::fs;
use std::path::Path;

use log::debug;

use crate::domain::grid::{Puzzle, PuzzleError};

/// Read a separator-delimited 9×9 puzzle file.
pub fn read_puzzle(path: &Path, separator: char) -> Result<Puzzle, PuzzleError> {
    let text = fs::read_to_string(path).map_err(|source| PuzzleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let puzzle = Puzzle::parse(&text, separator)?;
    debug!("{}: {} givens", path.display(), puzzle.given_count());
    Ok(puzzle)
}
