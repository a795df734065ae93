use std::collections::HashSet;
use std::fs::File;
use std::io::{self, Write};

use serde::Serialize;

/// Board coordinate as (x, y), x growing right and y growing down.
pub type Position = (usize, usize);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Route {
    pub steps: Vec<Position>,
    pub cost: usize,
}

impl Route {
    pub fn write_yaml(&self, path: &str) -> anyhow::Result<()> {
        let file = File::create(path)?;
        let mut writer = io::BufWriter::new(file);
        let yaml_data = serde_yaml::to_string(self)?;
        writer.write_all(yaml_data.as_bytes())?;

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Found(Route),
    /// The frontier drained without reaching the goal. A legitimate result,
    /// not an error; distinct from a zero-length start == goal route.
    Exhausted,
}

/// Result of one search run, including the expansion sets a renderer can
/// overlay on the board.
#[derive(Debug, Clone)]
pub struct SearchReport {
    pub outcome: SearchOutcome,
    pub closed: HashSet<Position>,
    pub pending: Vec<Position>,
}

impl SearchReport {
    pub fn route(&self) -> Option<&Route> {
        match &self.outcome {
            SearchOutcome::Found(route) => Some(route),
            SearchOutcome::Exhausted => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A caller-supplied coordinate lies outside the board. Neighbors are
    /// bounds-filtered before lookup, so only start/goal can trigger this.
    OutOfBounds { x: usize, y: usize },
    /// Popped an empty frontier. The loop guard prevents this; hitting it
    /// means an engine invariant broke.
    EmptyFrontier,
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchError::OutOfBounds { x, y } => {
                write!(f, "position ({x}, {y}) is outside the board")
            }
            SearchError::EmptyFrontier => write!(f, "popped an empty frontier"),
        }
    }
}

impl std::error::Error for SearchError {}
