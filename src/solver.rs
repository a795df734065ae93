mod engine;
mod frontier;

pub use engine::SearchEngine;

use crate::common::Position;

/// Frontier ordering policy, fixed for the duration of one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Strict FIFO expansion. Finds a route, not necessarily the cheapest.
    Bfs,
    /// Orders by accumulated cost g.
    Dijkstra,
    /// Orders by g + Manhattan distance to the goal.
    AStar,
}

impl Strategy {
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name {
            "bfs" => Some(Strategy::Bfs),
            "dijkstra" => Some(Strategy::Dijkstra),
            "astar" => Some(Strategy::AStar),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Bfs => "bfs",
            Strategy::Dijkstra => "dijkstra",
            Strategy::AStar => "astar",
        }
    }

    /// Heuristic estimate toward the goal; zero for the strategies that do
    /// not use one, so ordering degenerates correctly.
    pub(crate) fn heuristic(self, position: Position, goal: Position) -> usize {
        match self {
            Strategy::AStar => manhattan(position, goal),
            Strategy::Bfs | Strategy::Dijkstra => 0,
        }
    }

    /// Frontier ordering key. Unused by BFS, which pops in insertion order.
    pub(crate) fn key(self, g: usize, h: usize) -> usize {
        match self {
            Strategy::Bfs => 0,
            Strategy::Dijkstra => g,
            Strategy::AStar => g + h,
        }
    }

    pub(crate) fn is_fifo(self) -> bool {
        matches!(self, Strategy::Bfs)
    }
}

pub(crate) fn manhattan(a: Position, b: Position) -> usize {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1)
}
