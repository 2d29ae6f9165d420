// Terminal presentation and the interactive continue/stop gate

use std::io::{self, Write};

use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};

use crate::application::enumerate::{Presenter, SearchControl};
use crate::domain::grid::{Puzzle, SolvedGrid, GRID_SIZE};

/// Plain text sink: ordinal header plus the grid's `Display` form. Safe
/// for pipes and logs.
pub struct TextPresenter<W: Write> {
    out: W,
}

impl<W: Write> TextPresenter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> Presenter for TextPresenter<W> {
    fn present(&mut self, ordinal: usize, solution: &SolvedGrid) -> io::Result<()> {
        writeln!(self.out, "Solution {ordinal}:")?;
        write!(self.out, "{solution}")?;
        writeln!(self.out)?;
        self.out.flush()
    }
}

/// Styled board sink: box-drawing frame with the original givens
/// highlighted, so a reader can tell them from the filled-in cells.
pub struct BoardPresenter<W: Write> {
    out: W,
    givens: Puzzle,
}

impl<W: Write> BoardPresenter<W> {
    pub fn new(out: W, givens: Puzzle) -> Self {
        Self { out, givens }
    }
}

impl<W: Write> Presenter for BoardPresenter<W> {
    fn present(&mut self, ordinal: usize, solution: &SolvedGrid) -> io::Result<()> {
        execute!(
            self.out,
            SetAttribute(Attribute::Bold),
            Print(format!("Solution {ordinal}\n")),
            SetAttribute(Attribute::Reset)
        )?;
        execute!(self.out, Print("┌───────┬───────┬───────┐\n"))?;
        for row in 1..=GRID_SIZE {
            if row > 1 && (row - 1) % 3 == 0 {
                execute!(self.out, Print("├───────┼───────┼───────┤\n"))?;
            }
            for col in 1..=GRID_SIZE {
                if (col - 1) % 3 == 0 {
                    execute!(self.out, Print("│ "))?;
                }
                let value = solution.value(row, col);
                if self.givens.given(row, col).is_some() {
                    execute!(
                        self.out,
                        SetForegroundColor(Color::Cyan),
                        SetAttribute(Attribute::Bold),
                        Print(value),
                        SetAttribute(Attribute::Reset),
                        ResetColor
                    )?;
                } else {
                    execute!(self.out, Print(value))?;
                }
                execute!(self.out, Print(" "))?;
            }
            execute!(self.out, Print("│\n"))?;
        }
        execute!(self.out, Print("└───────┴───────┴───────┘\n"))?;
        self.out.flush()
    }
}

/// Asks on stdin after each solution whether to keep searching. Enter or
/// anything but `n` continues; EOF and read failures stop.
pub struct StdinControl;

impl SearchControl for StdinControl {
    fn continue_search(&mut self, _found: usize) -> bool {
        print!("Search for another solution? [Y/n] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => !answer.trim().eq_ignore_ascii_case("n"),
        }
    }
}

/// Continue unconditionally; used for non-interactive runs.
pub struct AcceptAll;

impl SearchControl for AcceptAll {
    fn continue_search(&mut self, _found: usize) -> bool {
        true
    }
}
