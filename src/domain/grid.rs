use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Side length of the grid.
pub const GRID_SIZE: u8 = 9;

/// Side length of one 3×3 box.
pub const BOX_SIZE: u8 = 3;

/// Number of indicator variables, one per (row, column, value) triple.
pub const CANDIDATE_COUNT: usize = 729;

/// An indicator strictly above this is taken as selected. Backends may
/// report an integral 1 as something like 0.9999997.
pub const INDICATOR_THRESHOLD: f64 = 0.99;

/// One (row, column, value) triple, all 1-indexed: the statement
/// "cell (row, col) holds value".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Candidate {
    pub row: u8,
    pub col: u8,
    pub value: u8,
}

impl Candidate {
    pub fn new(row: u8, col: u8, value: u8) -> Self {
        debug_assert!((1..=GRID_SIZE).contains(&row));
        debug_assert!((1..=GRID_SIZE).contains(&col));
        debug_assert!((1..=GRID_SIZE).contains(&value));
        Self { row, col, value }
    }

    /// Flat position in the 729-slot variable space, row-major then value.
    pub fn index(self) -> usize {
        (self.row as usize - 1) * 81 + (self.col as usize - 1) * 9 + (self.value as usize - 1)
    }

    /// Inverse of [`Candidate::index`].
    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < CANDIDATE_COUNT);
        Self {
            row: (index / 81) as u8 + 1,
            col: (index / 9 % 9) as u8 + 1,
            value: (index % 9) as u8 + 1,
        }
    }

    /// All 729 candidates, in index order.
    pub fn all() -> impl Iterator<Item = Candidate> {
        (0..CANDIDATE_COUNT).map(Candidate::from_index)
    }
}

/// Why a puzzle source was rejected. Any of these aborts the run before a
/// solver is ever invoked. Rows and fields are reported 1-indexed.
#[derive(Debug, Error)]
pub enum PuzzleError {
    #[error("cannot read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("expected 9 rows, found {0}")]
    RowCount(usize),
    #[error("row {row}: expected 9 fields, found {found}")]
    FieldCount { row: usize, found: usize },
    #[error("row {row}, field {col}: {text:?} is not a digit in 0-9")]
    Digit { row: usize, col: usize, text: String },
}

/// The givens of a puzzle: every pre-filled cell and nothing else. Cells
/// are addressed 1-indexed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Puzzle {
    givens: BTreeMap<(u8, u8), u8>,
}

impl Puzzle {
    /// Parse a separator-delimited 9×9 grid. Empty fields and zeros both
    /// mean "no given". Trailing blank lines are ignored.
    pub fn parse(text: &str, separator: char) -> Result<Self, PuzzleError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while matches!(lines.last(), Some(line) if line.trim().is_empty()) {
            lines.pop();
        }
        if lines.len() != GRID_SIZE as usize {
            return Err(PuzzleError::RowCount(lines.len()));
        }

        let mut givens = BTreeMap::new();
        for (row_index, line) in lines.iter().enumerate() {
            let fields: Vec<&str> = line.split(separator).collect();
            if fields.len() != GRID_SIZE as usize {
                return Err(PuzzleError::FieldCount {
                    row: row_index + 1,
                    found: fields.len(),
                });
            }
            for (col_index, field) in fields.iter().enumerate() {
                let field = field.trim();
                if field.is_empty() {
                    continue;
                }
                let value: u8 = field.parse().map_err(|_| PuzzleError::Digit {
                    row: row_index + 1,
                    col: col_index + 1,
                    text: field.to_string(),
                })?;
                if value > GRID_SIZE {
                    return Err(PuzzleError::Digit {
                        row: row_index + 1,
                        col: col_index + 1,
                        text: field.to_string(),
                    });
                }
                if value != 0 {
                    givens.insert((row_index as u8 + 1, col_index as u8 + 1), value);
                }
            }
        }
        Ok(Self { givens })
    }

    /// Build a puzzle from explicit (row, col, value) givens.
    pub fn from_givens<I: IntoIterator<Item = (u8, u8, u8)>>(entries: I) -> Self {
        let mut givens = BTreeMap::new();
        for (row, col, value) in entries {
            debug_assert!((1..=GRID_SIZE).contains(&row));
            debug_assert!((1..=GRID_SIZE).contains(&col));
            debug_assert!((1..=GRID_SIZE).contains(&value));
            givens.insert((row, col), value);
        }
        Self { givens }
    }

    /// The given at a cell, if any.
    pub fn given(&self, row: u8, col: u8) -> Option<u8> {
        self.givens.get(&(row, col)).copied()
    }

    /// All givens in row-major order.
    pub fn givens(&self) -> impl Iterator<Item = (u8, u8, u8)> + '_ {
        self.givens.iter().map(|(&(row, col), &value)| (row, col, value))
    }

    pub fn given_count(&self) -> usize {
        self.givens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.givens.is_empty()
    }
}

/// An oracle handed back numbers that do not decode into a full grid.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssignmentError {
    #[error("expected 729 indicator values, got {0}")]
    Length(usize),
    #[error("cell ({row},{col}) has no selected value")]
    Unassigned { row: u8, col: u8 },
    #[error("cell ({row},{col}) selects both {first} and {second}")]
    Conflict { row: u8, col: u8, first: u8, second: u8 },
}

/// A complete assignment, one value per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolvedGrid {
    cells: [[u8; 9]; 9],
}

impl SolvedGrid {
    /// Decode a raw oracle assignment, in candidate index order. Every
    /// indicator strictly above [`INDICATOR_THRESHOLD`] counts as selected;
    /// the selected candidates must cover each cell exactly once.
    pub fn from_assignment(values: &[f64]) -> Result<Self, AssignmentError> {
        if values.len() != CANDIDATE_COUNT {
            return Err(AssignmentError::Length(values.len()));
        }
        let mut cells = [[0u8; 9]; 9];
        for candidate in Candidate::all() {
            if values[candidate.index()] > INDICATOR_THRESHOLD {
                let slot = &mut cells[candidate.row as usize - 1][candidate.col as usize - 1];
                if *slot != 0 {
                    return Err(AssignmentError::Conflict {
                        row: candidate.row,
                        col: candidate.col,
                        first: *slot,
                        second: candidate.value,
                    });
                }
                *slot = candidate.value;
            }
        }
        for row in 0..GRID_SIZE as usize {
            for col in 0..GRID_SIZE as usize {
                if cells[row][col] == 0 {
                    return Err(AssignmentError::Unassigned {
                        row: row as u8 + 1,
                        col: col as u8 + 1,
                    });
                }
            }
        }
        Ok(Self { cells })
    }

    /// Build a grid from literal digit rows.
    pub fn from_rows(rows: [[u8; 9]; 9]) -> Self {
        debug_assert!(rows.iter().flatten().all(|&v| (1..=GRID_SIZE).contains(&v)));
        Self { cells: rows }
    }

    /// Digit at a 1-indexed cell.
    pub fn value(&self, row: u8, col: u8) -> u8 {
        self.cells[row as usize - 1][col as usize - 1]
    }

    /// The 81 (row, col, value) triples of this solution, row-major.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        (1..=GRID_SIZE).flat_map(move |row| {
            (1..=GRID_SIZE).map(move |col| Candidate::new(row, col, self.value(row, col)))
        })
    }

    /// True when every row, column and box holds each of 1-9 exactly once.
    pub fn satisfies_rules(&self) -> bool {
        let mut rows = [0u16; 9];
        let mut cols = [0u16; 9];
        let mut boxes = [0u16; 9];
        for row in 0..9 {
            for col in 0..9 {
                let value = self.cells[row][col];
                if !(1..=GRID_SIZE).contains(&value) {
                    return false;
                }
                let bit = 1u16 << (value - 1);
                let boxed = row / 3 * 3 + col / 3;
                if rows[row] & bit != 0 || cols[col] & bit != 0 || boxes[boxed] & bit != 0 {
                    return false;
                }
                rows[row] |= bit;
                cols[col] |= bit;
                boxes[boxed] |= bit;
            }
        }
        true
    }

    /// True when every given of `puzzle` appears unchanged.
    pub fn respects(&self, puzzle: &Puzzle) -> bool {
        puzzle
            .givens()
            .all(|(row, col, value)| self.value(row, col) == value)
    }
}

impl fmt::Display for SolvedGrid {
    /// Plain text grid with 3×3 separators, one digit per cell.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..9 {
            if row > 0 && row % 3 == 0 {
                writeln!(f, "------+-------+------")?;
            }
            for col in 0..9 {
                if col > 0 {
                    f.write_str(if col % 3 == 0 { " | " } else { " " })?;
                }
                write!(f, "{}", self.cells[row][col])?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_grid() -> SolvedGrid {
        // Shifted-band construction, valid by inspection.
        SolvedGrid::from_rows(std::array::from_fn(|row| {
            std::array::from_fn(|col| ((row * 3 + row / 3 + col) % 9 + 1) as u8)
        }))
    }

    #[test]
    fn candidate_index_is_a_bijection() {
        for index in 0..CANDIDATE_COUNT {
            let candidate = Candidate::from_index(index);
            assert_eq!(candidate.index(), index);
        }
        assert_eq!(Candidate::new(1, 1, 1).index(), 0);
        assert_eq!(Candidate::new(9, 9, 9).index(), CANDIDATE_COUNT - 1);
        assert_eq!(Candidate::new(2, 1, 1).index(), 81);
        assert_eq!(Candidate::new(1, 2, 1).index(), 9);
    }

    #[test]
    fn parse_reads_blanks_zeros_and_digits() {
        let text = "5;3;;;7;;;;\n\
                    6;;;1;9;5;;;\n\
                    ;9;8;;;;;6;\n\
                    8;;;;6;;;;3\n\
                    4;;;8;;3;;;1\n\
                    7;;;;2;;;;6\n\
                    ;6;;;;;2;8;\n\
                    ;;;4;1;9;;;5\n\
                    ;;;;8;;;7;9\n";
        let puzzle = Puzzle::parse(text, ';').unwrap();
        assert_eq!(puzzle.given_count(), 30);
        assert_eq!(puzzle.given(1, 1), Some(5));
        assert_eq!(puzzle.given(1, 3), None);
        assert_eq!(puzzle.given(9, 9), Some(9));

        let zeros = "0;0;0;0;0;0;0;0;0\n".repeat(9);
        let empty = Puzzle::parse(&zeros, ';').unwrap();
        assert!(empty.is_empty());
    }

    #[test]
    fn parse_trims_fields_and_trailing_blank_lines() {
        let text = " 1 ;2;3;4;5;6;7;8;9\n".to_string() + &";;;;;;;;\n".repeat(8) + "\n\n";
        let puzzle = Puzzle::parse(&text, ';').unwrap();
        assert_eq!(puzzle.given(1, 1), Some(1));
        assert_eq!(puzzle.given_count(), 9);
    }

    #[test]
    fn parse_accepts_alternate_separators() {
        let text = "1,2,3,4,5,6,7,8,9\n".to_string() + &",,,,,,,,\n".repeat(8);
        let puzzle = Puzzle::parse(&text, ',').unwrap();
        assert_eq!(puzzle.given_count(), 9);
        assert_eq!(puzzle.given(1, 9), Some(9));
    }

    #[test]
    fn parse_rejects_wrong_row_count() {
        let text = "1;2;3;4;5;6;7;8;9\n".repeat(8);
        assert!(matches!(
            Puzzle::parse(&text, ';'),
            Err(PuzzleError::RowCount(8))
        ));
    }

    #[test]
    fn parse_rejects_wrong_field_count() {
        let mut text = "1;2;3;4;5;6;7;8;9\n".repeat(8);
        text.push_str("1;2;3\n");
        assert!(matches!(
            Puzzle::parse(&text, ';'),
            Err(PuzzleError::FieldCount { row: 9, found: 3 })
        ));
    }

    #[test]
    fn parse_rejects_non_digits_and_out_of_range() {
        let good = ";;;;;;;;\n";
        let bad = format!("x;;;;;;;;\n{}", good.repeat(8));
        assert!(matches!(
            Puzzle::parse(&bad, ';'),
            Err(PuzzleError::Digit { row: 1, col: 1, .. })
        ));
        let eleven = format!("11;;;;;;;;\n{}", good.repeat(8));
        assert!(matches!(
            Puzzle::parse(&eleven, ';'),
            Err(PuzzleError::Digit { row: 1, col: 1, .. })
        ));
    }

    #[test]
    fn assignment_decoding_applies_the_threshold() {
        let grid = pattern_grid();
        let mut values = vec![0.004; CANDIDATE_COUNT];
        for candidate in grid.candidates() {
            values[candidate.index()] = 0.9999997;
        }
        let decoded = SolvedGrid::from_assignment(&values).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn assignment_decoding_rejects_malformed_input() {
        assert_eq!(
            SolvedGrid::from_assignment(&[1.0; 3]),
            Err(AssignmentError::Length(3))
        );

        let none = vec![0.0; CANDIDATE_COUNT];
        assert_eq!(
            SolvedGrid::from_assignment(&none),
            Err(AssignmentError::Unassigned { row: 1, col: 1 })
        );

        let mut doubled = vec![0.0; CANDIDATE_COUNT];
        doubled[Candidate::new(1, 1, 1).index()] = 1.0;
        doubled[Candidate::new(1, 1, 2).index()] = 1.0;
        assert_eq!(
            SolvedGrid::from_assignment(&doubled),
            Err(AssignmentError::Conflict {
                row: 1,
                col: 1,
                first: 1,
                second: 2
            })
        );
    }

    #[test]
    fn rule_check_accepts_valid_and_rejects_duplicates() {
        assert!(pattern_grid().satisfies_rules());

        let mut rows = [[0u8; 9]; 9];
        for (r, row) in rows.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = ((r * 3 + r / 3 + c) % 9 + 1) as u8;
            }
        }
        let duplicate_in_row = {
            let mut cells = rows;
            cells[0][0] = cells[0][1];
            SolvedGrid::from_rows(cells)
        };
        assert!(!duplicate_in_row.satisfies_rules());

        // Row 0 copied over row 1: rows stay permutations, columns do not.
        let duplicate_in_column = {
            let mut cells = rows;
            cells[1] = cells[0];
            SolvedGrid::from_rows(cells)
        };
        assert!(!duplicate_in_column.satisfies_rules());

        // Swapping whole rows across bands keeps rows and columns valid
        // but breaks the boxes.
        let duplicate_in_box = {
            let mut cells = rows;
            cells.swap(0, 3);
            SolvedGrid::from_rows(cells)
        };
        assert!(!duplicate_in_box.satisfies_rules());
    }

    #[test]
    fn respects_checks_every_given() {
        let grid = pattern_grid();
        let honoured = Puzzle::from_givens([(1, 1, grid.value(1, 1)), (5, 5, grid.value(5, 5))]);
        assert!(grid.respects(&honoured));

        let violated_value = grid.value(3, 3) % 9 + 1;
        let violated = Puzzle::from_givens([(3, 3, violated_value)]);
        assert!(!grid.respects(&violated));
    }

    #[test]
    fn display_draws_box_separators() {
        let text = pattern_grid().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "1 2 3 | 4 5 6 | 7 8 9");
        assert_eq!(lines[3], "------+-------+------");
        assert_eq!(lines[7], "------+-------+------");
    }
}
