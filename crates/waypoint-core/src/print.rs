use crate::graph::NodeId;
use crate::search::Visited;
use crate::solver::Report;
use crate::stats::format_seconds;
use std::fmt;

/// Renders as `{0: None, 1: 0, 2: 0}`, in insertion order.
impl fmt::Display for Visited {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (node, predecessor)) in self.iter().enumerate() {
            if i > 0 { write!(f, ", ")? }
            match predecessor {
                Some(predecessor) => write!(f, "{}: {}", node, predecessor)?,
                None => write!(f, "{}: None", node)?,
            }
        }
        write!(f, "}}")
    }
}

/// A path rendered as `0 -> 1 -> 3`, or `-1` when absent.
pub struct PathDisplay<'a>(pub Option<&'a [NodeId]>);

impl fmt::Display for PathDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(path) = self.0 else { return write!(f, "-1") };
        for (i, node) in path.iter().enumerate() {
            if i > 0 { write!(f, " -> ")? }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}

/// A cost rendered as a number, or `-1` when there is no path.
pub struct CostDisplay(pub Option<u64>);

impl fmt::Display for CostDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(cost) => write!(f, "{}", cost),
            None => write!(f, "-1"),
        }
    }
}

/// One block of the results file, followed by a blank line.
impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}:", self.strategy.label())?;
        writeln!(f, "Visited: {}", self.result.visited)?;
        writeln!(f, "Path: {}", PathDisplay(self.result.path.as_deref()))?;
        writeln!(f, "Cost: {}", CostDisplay(self.cost))?;
        if let Some(elapsed) = self.elapsed {
            writeln!(f, "Time: {} seconds", format_seconds(elapsed))?;
        }
        writeln!(f)
    }
}
