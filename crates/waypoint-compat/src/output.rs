use serde::Serialize;
use std::fmt::Write as _;
use waypoint_core::maze::{Maze, MazeSearch};
use waypoint_core::{NodeId, Report};

/// Concatenates the text blocks of `reports`, in order.
pub fn render_reports(reports: &[Report]) -> String {
    reports.iter().map(Report::to_string).collect()
}

/// The maze path as `(r, c) -> (r, c)`, or `-1`, followed by the grid with
/// explored cells marked `2`.
pub fn render_maze(maze: &Maze, search: &MazeSearch) -> String {
    let mut out = String::new();
    match &search.path {
        Some(path) => {
            let cells: Vec<String> = path.iter().map(|(row, col)| format!("({}, {})", row, col)).collect();
            let _ = writeln!(out, "Path: {}", cells.join(" -> "));
        }
        None => out.push_str("Path: -1\n"),
    }
    let _ = writeln!(out, "Explored: {}", search.explored.len());
    let mut marked = maze.clone();
    marked.mark_explored(&search.explored);
    out.push_str(&marked.to_string());
    out
}

/// JSON form of a `Report`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportJson {
    pub strategy: &'static str,
    /// `[node, predecessor]` pairs in insertion order.
    pub visited: Vec<(NodeId, Option<NodeId>)>,
    pub path: Option<Vec<NodeId>>,
    pub cost: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seconds: Option<f64>,
}

impl From<&Report> for ReportJson {
    fn from(report: &Report) -> Self {
        ReportJson {
            strategy: report.strategy.name(),
            visited: report.result.visited.iter().collect(),
            path: report.result.path.clone(),
            cost: report.cost,
            seconds: report.elapsed.map(|elapsed| elapsed.as_secs_f64()),
        }
    }
}
