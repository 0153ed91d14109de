//! Terminal rendering of a solved grid.

use crate::crossword::Crossword;
use crate::solver::Assignment;
use std::fmt;

/// Glyph printed for blocked cells.
const BLOCKED: char = '█';

/// A crossword with its cells resolved to letters, ready for display.
///
/// Open cells show the letter placed there by the assignment (or a space if,
/// for a partial assignment, nothing covers them); blocked cells show a
/// filler glyph.
pub struct FilledGrid {
    rows: Vec<Vec<char>>,
}

impl FilledGrid {
    pub fn new(crossword: &Crossword, assignment: &Assignment) -> Self {
        let mut rows: Vec<Vec<char>> = (0..crossword.height())
            .map(|row| {
                (0..crossword.width())
                    .map(|col| if crossword.is_open(row, col) { ' ' } else { BLOCKED })
                    .collect()
            })
            .collect();

        for (var, word) in assignment {
            for ((row, col), letter) in var.cells().zip(word.chars()) {
                rows[row][col] = letter;
            }
        }

        Self { rows }
    }

    /// The letter grid, one entry per cell.
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }
}

impl fmt::Display for FilledGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for &cell in row {
                write!(f, "{cell}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
