//! Uniform-cost search on a rectangular grid maze.
//!
//! Cells are open (`0`) or walls (`1`). Moves go one cell RIGHT, DOWN, LEFT or UP,
//! in that priority order, each at unit cost.

use hashbrown::{HashMap, HashSet};
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt;
use thiserror::Error;

/// A `(row, column)` coordinate.
pub type Cell = (usize, usize);

/// Neighbor offsets in expansion order: RIGHT, DOWN, LEFT, UP.
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Open,
    Wall,
    /// An open cell expanded by a search, only produced by `Maze::mark_explored`.
    Explored,
}

impl Tile {
    fn digit(self) -> u8 {
        match self {
            Tile::Open => 0,
            Tile::Wall => 1,
            Tile::Explored => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MazeError {
    #[error("malformed maze: the grid has no cells")]
    Empty,

    #[error("malformed maze: row {row} has {found} cells, expected {expected}")]
    RowLength { row: usize, expected: usize, found: usize },

    #[error("malformed maze: cell ({row}, {col}) has value {value}, expected 0 or 1")]
    BadCell { row: usize, col: usize, value: u8 },

    #[error("invalid {role} cell ({row}, {col}) for a {rows}x{cols} maze")]
    OutOfBounds { role: &'static str, row: usize, col: usize, rows: usize, cols: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    tiles: Vec<Vec<Tile>>,
}

impl Maze {
    /// Builds a maze from rows of `0` (open) and `1` (wall).
    pub fn from_digits(rows: Vec<Vec<u8>>) -> Result<Self, MazeError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(MazeError::Empty);
        }
        let mut tiles = Vec::with_capacity(rows.len());
        for (row, digits) in rows.into_iter().enumerate() {
            if digits.len() != width {
                return Err(MazeError::RowLength { row, expected: width, found: digits.len() });
            }
            let line = digits.into_iter().enumerate().map(|(col, value)| match value {
                0 => Ok(Tile::Open),
                1 => Ok(Tile::Wall),
                _ => Err(MazeError::BadCell { row, col, value }),
            }).collect::<Result<Vec<_>, _>>()?;
            tiles.push(line);
        }
        Ok(Maze { tiles })
    }

    pub fn rows(&self) -> usize {
        self.tiles.len()
    }

    pub fn cols(&self) -> usize {
        self.tiles[0].len()
    }

    pub fn tile(&self, (row, col): Cell) -> Tile {
        self.tiles[row][col]
    }

    /// Returns an error naming `role` if `cell` lies outside the grid.
    pub fn check(&self, role: &'static str, (row, col): Cell) -> Result<(), MazeError> {
        if row < self.rows() && col < self.cols() {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds { role, row, col, rows: self.rows(), cols: self.cols() })
        }
    }

    /// Open cells adjacent to `cell`, in expansion order.
    fn moves(&self, (row, col): Cell) -> impl Iterator<Item = Cell> + '_ {
        DIRECTIONS.iter().filter_map(move |&(dr, dc)| {
            let next = (row.checked_add_signed(dr)?, col.checked_add_signed(dc)?);
            (next.0 < self.rows() && next.1 < self.cols() && self.tile(next) == Tile::Open).then_some(next)
        })
    }

    /// Marks every cell in `explored` as `Tile::Explored`.
    pub fn mark_explored(&mut self, explored: &HashSet<Cell>) {
        for &(row, col) in explored {
            self.tiles[row][col] = Tile::Explored;
        }
    }
}

/// Renders one row per line as a bracketed list, e.g. `[1, 0, 2]`.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in &self.tiles {
            write!(f, "[")?;
            for (i, tile) in line.iter().enumerate() {
                if i > 0 { write!(f, ", ")? }
                write!(f, "{}", tile.digit())?;
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}

/// Result of a maze search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSearch {
    /// Cells from start to end, or `None` when the end is unreachable.
    pub path: Option<Vec<Cell>>,
    /// Cells popped from the frontier and expanded.
    pub explored: HashSet<Cell>,
}

/// Uniform-cost search from `start` to `end`.
///
/// The frontier is keyed by `(cost, cell)`; a cell that was already expanded is
/// skipped when popped again. Only the cells a move lands on must be open.
pub fn ucs(maze: &Maze, start: Cell, end: Cell) -> Result<MazeSearch, MazeError> {
    maze.check("start", start)?;
    maze.check("end", end)?;

    let mut frontier = BinaryHeap::new();
    let mut parent: HashMap<Cell, Option<Cell>> = HashMap::new();
    let mut cost: HashMap<Cell, u64> = HashMap::new();
    let mut explored = HashSet::new();
    frontier.push(Reverse((0u64, start)));
    parent.insert(start, None);
    cost.insert(start, 0);

    while let Some(Reverse((current_cost, current))) = frontier.pop() {
        if current == end {
            let mut path = vec![current];
            let mut cursor = current;
            while let Some(Some(previous)) = parent.get(&cursor) {
                path.push(*previous);
                cursor = *previous;
            }
            path.reverse();
            return Ok(MazeSearch { path: Some(path), explored });
        }
        if !explored.insert(current) {
            continue;
        }
        for next in maze.moves(current) {
            let next_cost = current_cost + 1;
            if cost.get(&next).map_or(true, |&known| next_cost < known) {
                cost.insert(next, next_cost);
                parent.insert(next, Some(current));
                frontier.push(Reverse((next_cost, next)));
            }
        }
    }
    Ok(MazeSearch { path: None, explored })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn maze(rows: &[&[u8]]) -> Maze {
        Maze::from_digits(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn finds_shortest_route_around_walls() {
        let maze = maze(&[
            &[0, 1, 0],
            &[0, 1, 0],
            &[0, 0, 0],
        ]);
        let search = ucs(&maze, (0, 0), (0, 2)).unwrap();
        assert_eq!(search.path, Some(vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2), (1, 2), (0, 2)]));
        assert!(!search.explored.contains(&(0, 2)));
    }

    #[test]
    fn prefers_right_then_down_on_ties() {
        let maze = maze(&[
            &[0, 0],
            &[0, 0],
        ]);
        let search = ucs(&maze, (0, 0), (1, 1)).unwrap();
        assert_eq!(search.path, Some(vec![(0, 0), (0, 1), (1, 1)]));
    }

    #[test]
    fn walled_off_end_is_unreachable() {
        let maze = maze(&[
            &[0, 1, 0],
            &[1, 1, 0],
        ]);
        let search = ucs(&maze, (0, 0), (1, 2)).unwrap();
        assert_eq!(search.path, None);
        assert_eq!(search.explored.len(), 1);
    }

    #[test]
    fn start_equal_to_end() {
        let maze = maze(&[&[0]]);
        let search = ucs(&maze, (0, 0), (0, 0)).unwrap();
        assert_eq!(search.path, Some(vec![(0, 0)]));
        assert!(search.explored.is_empty());
    }

    #[test]
    fn rejects_out_of_bounds_and_bad_cells() {
        let grid = maze(&[&[0, 0]]);
        assert!(matches!(ucs(&grid, (0, 0), (1, 0)), Err(MazeError::OutOfBounds { role: "end", .. })));
        assert_eq!(
            Maze::from_digits(vec![vec![0, 3]]),
            Err(MazeError::BadCell { row: 0, col: 1, value: 3 })
        );
        assert_eq!(
            Maze::from_digits(vec![vec![0, 0], vec![0]]),
            Err(MazeError::RowLength { row: 1, expected: 2, found: 1 })
        );
    }

    #[test]
    fn marks_explored_cells() {
        let mut grid = maze(&[
            &[0, 0, 1],
        ]);
        let search = ucs(&grid, (0, 0), (0, 1)).unwrap();
        grid.mark_explored(&search.explored);
        assert_eq!(grid.to_string(), "[2, 0, 1]\n");
    }
}
