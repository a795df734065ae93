use tracing::info;

use crate::solver::Strategy;

#[derive(Debug, Clone, Default)]
pub struct Stats {
    pub cost: usize,
    pub time_us: usize,
    pub expanded_nodes: usize,
    /// Duplicate frontier entries dropped on pop after a relaxation or a
    /// late arrival at a closed position.
    pub stale_entries: usize,
}

impl Stats {
    pub fn print(&self, strategy: Strategy) {
        info!(
            "Strategy {:?} Cost {:?} Time(microseconds) {:?} Expanded nodes {:?} Stale entries dropped {:?}",
            strategy.name(),
            self.cost,
            self.time_us,
            self.expanded_nodes,
            self.stale_entries
        );
    }
}
