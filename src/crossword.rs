//! `crossword` — the grid model consumed by the solver.
//!
//! A structure description is one line per row, with `_` marking an open
//! cell and any other character a blocked cell. Short lines are padded with
//! blocked cells to the width of the longest row.
//!
//! From the open cells we derive the variable set (maximal horizontal and
//! vertical runs of length ≥ 2), the overlap table (which letter index of
//! one variable shares a cell with which letter index of another), and the
//! neighbor relation. All of this is computed once here and treated as
//! read-only by the solver.

use crate::errors::GridError;
use crate::word_list;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Orientation of a slot in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

/// A fillable slot: a maximal run of open cells.
///
/// Variables are plain value types: two variables with identical fields are
/// the same variable, and they are used as map/set keys by value. The `Ord`
/// implementation (row, then column, then length, then direction) gives
/// every collection of variables a stable iteration order, which keeps the
/// solver's heuristic tie-breaks reproducible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Variable {
    pub row: usize,
    pub col: usize,
    pub length: usize,
    pub direction: Direction,
}

impl Variable {
    pub fn new(row: usize, col: usize, length: usize, direction: Direction) -> Self {
        Self { row, col, length, direction }
    }

    /// Grid coordinates covered by this variable, in letter order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let (row, col) = (self.row, self.col);
        let step = self.direction;
        (0..self.length).map(move |k| match step {
            Direction::Across => (row, col + k),
            Direction::Down => (row + k, col),
        })
    }
}

impl std::fmt::Display for Variable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dir = match self.direction {
            Direction::Across => "across",
            Direction::Down => "down",
        };
        write!(f, "({}, {}) {} [{}]", self.row, self.col, dir, self.length)
    }
}

/// Parsed crossword: grid geometry, variable set, vocabulary, and the
/// precomputed overlap/neighbor tables.
#[derive(Debug, Clone)]
pub struct Crossword {
    height: usize,
    width: usize,
    /// `true` = open cell.
    grid: Vec<Vec<bool>>,
    /// Sorted by `Variable`'s `Ord`.
    variables: Vec<Variable>,
    /// Normalized vocabulary, sorted and deduplicated.
    words: Vec<String>,
    /// Only defined overlaps are stored; `overlap()` returns `None` for the rest.
    overlaps: HashMap<(Variable, Variable), (usize, usize)>,
    /// Per variable, its overlap partners, sorted.
    neighbors: HashMap<Variable, Vec<Variable>>,
}

impl Crossword {
    /// Parse a structure description and a raw word list into a crossword.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::EmptyStructure`] if the structure contains no
    /// grid cells at all.
    pub fn parse(structure: &str, words: &str) -> Result<Self, GridError> {
        let lines: Vec<&str> = structure
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        if lines.is_empty() || width == 0 {
            return Err(GridError::EmptyStructure);
        }

        let grid: Vec<Vec<bool>> = lines
            .iter()
            .map(|line| {
                let mut row: Vec<bool> = line.chars().map(|c| c == '_').collect();
                row.resize(width, false);
                row
            })
            .collect();

        let variables = find_variables(&grid);
        let (overlaps, neighbors) = build_overlaps(&variables);

        Ok(Self {
            height: grid.len(),
            width,
            grid,
            variables,
            words: word_list::parse_from_str(words),
            overlaps,
            neighbors,
        })
    }

    /// Read the structure and word-list files and parse them.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::Io`] if either file cannot be read, or any error
    /// from [`Crossword::parse`].
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        structure_path: P,
        words_path: Q,
    ) -> Result<Self, GridError> {
        let structure = fs::read_to_string(structure_path)?;
        let words = fs::read_to_string(words_path)?;
        Self::parse(&structure, &words)
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    /// Whether the cell at (row, col) is open (fillable).
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.grid[row][col]
    }

    /// All variables, in stable (row, col, length, direction) order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// The normalized vocabulary.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Overlap between two distinct variables: `Some((i, j))` means the i-th
    /// letter of `x` and the j-th letter of `y` occupy the same cell.
    /// Symmetric in existence, with the index pair transposed.
    pub fn overlap(&self, x: Variable, y: Variable) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// Variables sharing a defined overlap with `var`, in stable order.
    pub fn neighbors(&self, var: Variable) -> &[Variable] {
        self.neighbors.get(&var).map_or(&[], Vec::as_slice)
    }
}

/// Scan the grid for maximal open runs of length ≥ 2 in both directions.
fn find_variables(grid: &[Vec<bool>]) -> Vec<Variable> {
    let height = grid.len();
    let width = grid[0].len();
    let mut variables = Vec::new();

    for row in 0..height {
        let mut col = 0;
        while col < width {
            if grid[row][col] && (col == 0 || !grid[row][col - 1]) {
                let length = (col..width).take_while(|&c| grid[row][c]).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, length, Direction::Across));
                }
                col += length;
            } else {
                col += 1;
            }
        }
    }

    for col in 0..width {
        let mut row = 0;
        while row < height {
            if grid[row][col] && (row == 0 || !grid[row - 1][col]) {
                let length = (row..height).take_while(|&r| grid[r][col]).count();
                if length > 1 {
                    variables.push(Variable::new(row, col, length, Direction::Down));
                }
                row += length;
            } else {
                row += 1;
            }
        }
    }

    variables.sort_unstable();
    variables
}

type OverlapTable = HashMap<(Variable, Variable), (usize, usize)>;
type NeighborTable = HashMap<Variable, Vec<Variable>>;

/// Build the overlap and neighbor tables by indexing each open cell by the
/// variables that cover it. A cell is covered by at most one across and one
/// down variable, so each shared cell yields exactly one crossing pair.
fn build_overlaps(variables: &[Variable]) -> (OverlapTable, NeighborTable) {
    let mut coverage: HashMap<(usize, usize), Vec<(Variable, usize)>> = HashMap::new();
    for &var in variables {
        for (index, cell) in var.cells().enumerate() {
            coverage.entry(cell).or_default().push((var, index));
        }
    }

    let mut overlaps = OverlapTable::new();
    let mut neighbors = NeighborTable::new();
    for covering in coverage.values() {
        for &(x, i) in covering {
            for &(y, j) in covering {
                if x != y {
                    overlaps.insert((x, y), (i, j));
                    neighbors.entry(x).or_default().push(y);
                }
            }
        }
    }
    for partners in neighbors.values_mut() {
        partners.sort_unstable();
        partners.dedup();
    }

    (overlaps, neighbors)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CROSS: &str = "\
___
_##
_##
";

    #[test]
    fn test_parse_finds_both_runs() {
        let cw = Crossword::parse(CROSS, "one\ntwo\nten\n").unwrap();
        assert_eq!(
            cw.variables(),
            &[
                Variable::new(0, 0, 3, Direction::Across),
                Variable::new(0, 0, 3, Direction::Down),
            ]
        );
        assert_eq!(cw.words(), &["ONE", "TEN", "TWO"]);
    }

    #[test]
    fn test_single_cell_runs_are_not_variables() {
        // Columns 1 and 2 are open only in row 0
        let cw = Crossword::parse(CROSS, "").unwrap();
        assert!(cw
            .variables()
            .iter()
            .all(|v| v.length > 1));
    }

    #[test]
    fn test_overlap_is_transposed_symmetric() {
        let cw = Crossword::parse(CROSS, "").unwrap();
        let across = Variable::new(0, 0, 3, Direction::Across);
        let down = Variable::new(0, 0, 3, Direction::Down);
        assert_eq!(cw.overlap(across, down), Some((0, 0)));
        assert_eq!(cw.overlap(down, across), Some((0, 0)));

        let offset = "\
____
##_#
##_#
";
        let cw = Crossword::parse(offset, "").unwrap();
        let across = Variable::new(0, 0, 4, Direction::Across);
        let down = Variable::new(0, 2, 3, Direction::Down);
        assert_eq!(cw.overlap(across, down), Some((2, 0)));
        assert_eq!(cw.overlap(down, across), Some((0, 2)));
    }

    #[test]
    fn test_neighbors_requires_shared_cell() {
        // Two parallel across runs never touch
        let parallel = "\
___
###
___
";
        let cw = Crossword::parse(parallel, "").unwrap();
        assert_eq!(cw.variables().len(), 2);
        for &var in cw.variables() {
            assert!(cw.neighbors(var).is_empty());
        }
    }

    #[test]
    fn test_short_lines_padded_with_blocked_cells() {
        let ragged = "____\n__\n";
        let cw = Crossword::parse(ragged, "").unwrap();
        assert_eq!(cw.width(), 4);
        assert!(!cw.is_open(1, 2));
        assert!(!cw.is_open(1, 3));
    }

    #[test]
    fn test_empty_structure_is_an_error() {
        assert!(matches!(
            Crossword::parse("", "word"),
            Err(GridError::EmptyStructure)
        ));
        assert!(matches!(
            Crossword::parse("\n  \n", "word"),
            Err(GridError::EmptyStructure)
        ));
    }

    #[test]
    fn test_cells_iterates_in_letter_order() {
        let down = Variable::new(1, 2, 3, Direction::Down);
        let cells: Vec<_> = down.cells().collect();
        assert_eq!(cells, vec![(1, 2), (2, 2), (3, 2)]);
    }
}
