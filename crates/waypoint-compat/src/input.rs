use serde::{Deserialize, Serialize};
use std::num::{IntErrorKind, ParseIntError};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use waypoint_core::maze::{Cell, Maze, MazeError};
use waypoint_core::{Graph, GraphError, NodeId, Problem};

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read {path}: {source}")]
    Io { path: String, source: std::io::Error },

    #[error("line {line}: expected {expected}")]
    Missing { line: usize, expected: &'static str },

    #[error("line {line}: `{token}` is not a non-negative integer")]
    BadNumber { line: usize, token: String },

    #[error("line {line}: `{token}` is too large")]
    OutOfRange { line: usize, token: String },

    #[error("line {line}: expected {expected} values, found {found}")]
    Count { line: usize, expected: usize, found: usize },

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Maze(#[from] MazeError),
}

/// The contents of a graph input file, before validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSpec {
    pub source: NodeId,
    pub goal: NodeId,
    pub matrix: Vec<Vec<u32>>,
    pub heuristic: Vec<u32>,
}

impl GraphSpec {
    /// Validates the graph and the source/goal indices.
    pub fn into_problem(self) -> Result<Problem, GraphError> {
        let graph = Graph::new(self.matrix, self.heuristic)?;
        Problem::new(graph, self.source, self.goal)
    }

    /// Parses the flat format: node count, `source goal`, one matrix row per node,
    /// then the heuristic vector. Blank lines are skipped.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = Lines::new(text);

        let count = lines.numbers::<usize>("the node count")?;
        let node_count = expect_len(count.0, &count.1, 1)?[0];

        let endpoints = lines.numbers::<usize>("`source goal`")?;
        let endpoints = expect_len(endpoints.0, &endpoints.1, 2)?;
        let (source, goal) = (endpoints[0], endpoints[1]);

        let mut matrix = Vec::with_capacity(node_count.min(1024));
        for _ in 0..node_count {
            let (_, row) = lines.numbers::<u32>("an adjacency matrix row")?;
            matrix.push(row);
        }
        let (_, heuristic) = lines.numbers::<u32>("the heuristic vector")?;

        Ok(GraphSpec { source, goal, matrix, heuristic })
    }

    pub fn load(path: &Path) -> Result<Self, ParseError> {
        Self::parse(&read(path)?)
    }
}

/// The contents of a maze input file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MazeSpec {
    pub start: Cell,
    pub end: Cell,
    pub maze: Maze,
}

impl MazeSpec {
    /// Parses `start_row start_col`, `end_row end_col`, then grid rows of `0`/`1`.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let mut lines = Lines::new(text);
        let start = lines.numbers::<usize>("`start_row start_col`")?;
        let start = expect_len(start.0, &start.1, 2)?;
        let end = lines.numbers::<usize>("`end_row end_col`")?;
        let end = expect_len(end.0, &end.1, 2)?;

        let mut rows = Vec::new();
        while let Some((_, row)) = lines.next_numbers::<u8>()? {
            rows.push(row);
        }
        let maze = Maze::from_digits(rows)?;
        Ok(MazeSpec { start: (start[0], start[1]), end: (end[0], end[1]), maze })
    }

    pub fn load(path: &Path) -> Result<Self, ParseError> {
        Self::parse(&read(path)?)
    }
}

fn read(path: &Path) -> Result<String, ParseError> {
    std::fs::read_to_string(path).map_err(|source| ParseError::Io { path: path.display().to_string(), source })
}

fn expect_len(line: usize, values: &[usize], expected: usize) -> Result<&[usize], ParseError> {
    if values.len() == expected {
        Ok(values)
    } else {
        Err(ParseError::Count { line, expected, found: values.len() })
    }
}

fn number_error(line: usize, token: &str, err: &ParseIntError) -> ParseError {
    match err.kind() {
        IntErrorKind::PosOverflow => ParseError::OutOfRange { line, token: token.to_string() },
        _ => ParseError::BadNumber { line, token: token.to_string() },
    }
}

/// Iterator over the non-blank lines of a file, tracking 1-based line numbers.
struct Lines<'a> {
    inner: std::iter::Enumerate<std::str::Lines<'a>>,
    last: usize,
}

impl<'a> Lines<'a> {
    fn new(text: &'a str) -> Self {
        Lines { inner: text.lines().enumerate(), last: 0 }
    }

    /// The next non-blank line as integers, or `None` at end of input.
    /// A value too large for `T` is an error rather than being clamped.
    fn next_numbers<T>(&mut self) -> Result<Option<(usize, Vec<T>)>, ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        for (index, text) in self.inner.by_ref() {
            let line = index + 1;
            self.last = line;
            if text.trim().is_empty() {
                continue;
            }
            let values = text.split_whitespace()
                .map(|token| token.parse::<T>().map_err(|e| number_error(line, token, &e)))
                .collect::<Result<Vec<_>, _>>()?;
            return Ok(Some((line, values)));
        }
        Ok(None)
    }

    fn numbers<T>(&mut self, expected: &'static str) -> Result<(usize, Vec<T>), ParseError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        self.next_numbers()?.ok_or(ParseError::Missing { line: self.last + 1, expected })
    }
}
