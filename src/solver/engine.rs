use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::board::Board;
use crate::common::{Position, Route, SearchError, SearchOutcome, SearchReport};
use crate::solver::frontier::Frontier;
use crate::solver::Strategy;
use crate::stat::Stats;

/// Per-coordinate search state. One node exists per discovered position;
/// relaxation mutates it in place. `parent` indexes into the engine's node
/// arena and forms a tree rooted at the start.
#[derive(Debug)]
struct SearchNode {
    position: Position,
    g: usize,
    h: usize,
    parent: Option<usize>,
}

pub struct SearchEngine<'a> {
    board: &'a Board,
    strategy: Strategy,
}

impl<'a> SearchEngine<'a> {
    pub fn new(board: &'a Board, strategy: Strategy) -> Self {
        SearchEngine { board, strategy }
    }

    /// Run one search from `start` to `goal`. Returns `OutOfBounds` only for
    /// the caller-supplied endpoints; "no route" is a normal outcome, not an
    /// error.
    pub fn run(
        &self,
        start: Position,
        goal: Position,
        stats: &mut Stats,
    ) -> Result<SearchReport, SearchError> {
        self.board.cell(start)?;
        self.board.cell(goal)?;

        let mut nodes: Vec<SearchNode> = Vec::new();
        let mut index_of: HashMap<Position, usize> = HashMap::new();
        let mut closed: HashSet<Position> = HashSet::new();
        let mut frontier = Frontier::new(self.strategy);

        let start_h = self.strategy.heuristic(start, goal);
        nodes.push(SearchNode {
            position: start,
            g: 0,
            h: start_h,
            parent: None,
        });
        index_of.insert(start, 0);
        frontier.push(0, 0, self.strategy.key(0, start_h));

        while !frontier.is_empty() {
            let entry = frontier.pop_min()?;
            let position = nodes[entry.node].position;

            // Lazy deletion: drop entries whose position was already
            // expanded or whose node was relaxed after the push.
            if closed.contains(&position) || entry.g != nodes[entry.node].g {
                stats.stale_entries += 1;
                continue;
            }

            closed.insert(position);
            stats.expanded_nodes += 1;
            debug!("expand {position:?} g={}", nodes[entry.node].g);

            if position == goal {
                let route = construct_route(&nodes, entry.node);
                let pending = pending_positions(&frontier, &nodes, &closed);
                return Ok(SearchReport {
                    outcome: SearchOutcome::Found(route),
                    closed,
                    pending,
                });
            }

            let current = entry.node;
            let current_g = nodes[current].g;
            for neighbor in self.board.neighbors(position) {
                if closed.contains(&neighbor) {
                    continue;
                }

                let candidate_g = current_g + self.board.cell(neighbor)?.cost;
                match index_of.get(&neighbor).copied() {
                    None => {
                        let h = self.strategy.heuristic(neighbor, goal);
                        let index = nodes.len();
                        nodes.push(SearchNode {
                            position: neighbor,
                            g: candidate_g,
                            h,
                            parent: Some(current),
                        });
                        index_of.insert(neighbor, index);
                        frontier.push(index, candidate_g, self.strategy.key(candidate_g, h));
                    }
                    Some(index) if candidate_g < nodes[index].g => {
                        // Relax and re-push; the old entry goes stale.
                        nodes[index].g = candidate_g;
                        nodes[index].parent = Some(current);
                        let h = nodes[index].h;
                        frontier.push(index, candidate_g, self.strategy.key(candidate_g, h));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(SearchReport {
            outcome: SearchOutcome::Exhausted,
            closed,
            pending: Vec::new(),
        })
    }
}

/// Walk parent links from the goal node back to the start, then reverse
/// into start-to-goal order. Total cost is the goal node's g.
fn construct_route(nodes: &[SearchNode], goal_index: usize) -> Route {
    let mut steps = Vec::new();
    let mut current = Some(goal_index);
    while let Some(index) = current {
        steps.push(nodes[index].position);
        current = nodes[index].parent;
    }
    steps.reverse();

    Route {
        steps,
        cost: nodes[goal_index].g,
    }
}

/// Positions still live on the frontier at termination, deduplicated and
/// with stale entries filtered out.
fn pending_positions(
    frontier: &Frontier,
    nodes: &[SearchNode],
    closed: &HashSet<Position>,
) -> Vec<Position> {
    let mut seen = HashSet::new();
    let mut pending = Vec::new();
    for entry in frontier.entries() {
        let node = &nodes[entry.node];
        if closed.contains(&node.position) || entry.g != node.g {
            continue;
        }
        if seen.insert(node.position) {
            pending.push(node.position);
        }
    }
    pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const ALL_STRATEGIES: [Strategy; 3] = [Strategy::Bfs, Strategy::Dijkstra, Strategy::AStar];

    fn run(board: &Board, strategy: Strategy) -> SearchReport {
        let mut stats = Stats::default();
        SearchEngine::new(board, strategy)
            .run(board.start, board.goal, &mut stats)
            .unwrap()
    }

    fn route(board: &Board, strategy: Strategy) -> Route {
        run(board, strategy).route().cloned().expect("route found")
    }

    #[test]
    fn test_open_3x3_grid() {
        let board = Board::from_str("A..\n...\n..B").unwrap();

        for strategy in ALL_STRATEGIES {
            let route = route(&board, strategy);
            assert_eq!(route.cost, 4, "{}", strategy.name());
            assert_eq!(route.steps.len(), 5, "{}", strategy.name());
            assert_eq!(route.steps.first(), Some(&(0, 0)));
            assert_eq!(route.steps.last(), Some(&(2, 2)));
            // Any monotone staircase is fine; every step must move one cell
            // right or down.
            for pair in route.steps.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(
                    (b.0 == a.0 + 1 && b.1 == a.1) || (b.0 == a.0 && b.1 == a.1 + 1),
                    "non-monotone step {a:?} -> {b:?}"
                );
            }
        }
    }

    #[test]
    fn test_start_equals_goal() {
        let board = Board::from_str("A").unwrap();

        for strategy in ALL_STRATEGIES {
            let route = route(&board, strategy);
            assert_eq!(route.steps, vec![(0, 0)]);
            assert_eq!(route.cost, 0);
        }
    }

    #[test]
    fn test_walled_off_goal() {
        let board = Board::from_str("A#.\n.#.\n.#B").unwrap();

        for strategy in ALL_STRATEGIES {
            let report = run(&board, strategy);
            assert_eq!(report.outcome, SearchOutcome::Exhausted);
            assert!(report.route().is_none());
            assert!(report.pending.is_empty());
            // Everything reachable left of the wall was expanded.
            assert_eq!(report.closed.len(), 3);
        }
    }

    #[test]
    fn test_water_shortcut_versus_detour() {
        // Crossing the water cell costs 100; the detour through the bottom
        // row costs 4. Cost-aware strategies must take the detour.
        let board = Board::from_str("AwB\n...").unwrap();

        let dijkstra = route(&board, Strategy::Dijkstra);
        let astar = route(&board, Strategy::AStar);
        assert_eq!(dijkstra.cost, 4);
        assert_eq!(astar.cost, 4);
        assert_eq!(dijkstra.steps.len(), 5);
        assert_eq!(astar.steps.len(), 5);

        // BFS ignores cost and discovers the goal straight through the
        // water, which is fine: it only promises some route.
        let bfs = route(&board, Strategy::Bfs);
        assert_eq!(bfs.steps, vec![(0, 0), (1, 0), (2, 0)]);
        assert_eq!(bfs.cost, 101);
    }

    #[test]
    fn test_uniform_costs_agree_on_length() {
        let board = Board::from_str("A...\n.##.\n...B").unwrap();

        let lengths: Vec<usize> = ALL_STRATEGIES
            .iter()
            .map(|&strategy| route(&board, strategy).steps.len())
            .collect();
        assert_eq!(lengths, vec![6, 6, 6]);

        for strategy in ALL_STRATEGIES {
            assert_eq!(route(&board, strategy).cost, 5);
        }
    }

    #[test]
    fn test_dijkstra_astar_agree_on_terrain() {
        let board = Board::from_str("A.wg.\nfmwg.\nggwgB\nrr.rr").unwrap();

        let dijkstra = route(&board, Strategy::Dijkstra);
        let astar = route(&board, Strategy::AStar);
        assert_eq!(dijkstra.cost, astar.cost);
        assert_eq!(dijkstra.steps.first(), Some(&board.start));
        assert_eq!(astar.steps.last(), Some(&board.goal));
    }

    #[test]
    fn test_idempotence() {
        let board = Board::from_str("A.wg.\nfmwg.\nggwgB\nrr.rr").unwrap();

        for strategy in ALL_STRATEGIES {
            let first = route(&board, strategy);
            let second = route(&board, strategy);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_out_of_bounds_endpoints() {
        let board = Board::from_str("A..\n..B").unwrap();
        let engine = SearchEngine::new(&board, Strategy::AStar);
        let mut stats = Stats::default();

        assert_eq!(
            engine.run((3, 0), board.goal, &mut stats).unwrap_err(),
            SearchError::OutOfBounds { x: 3, y: 0 }
        );
        assert_eq!(
            engine.run(board.start, (0, 9), &mut stats).unwrap_err(),
            SearchError::OutOfBounds { x: 0, y: 9 }
        );
    }

    #[test]
    fn test_report_sets_are_consistent() {
        let board = Board::from_str("A....\n.mm..\n.....\n....B").unwrap();

        for strategy in ALL_STRATEGIES {
            let report = run(&board, strategy);
            let route = report.route().expect("route found");

            for step in &route.steps {
                assert!(report.closed.contains(step));
            }
            for position in &report.pending {
                assert!(!report.closed.contains(position));
            }

            let mut stats = Stats::default();
            SearchEngine::new(&board, strategy)
                .run(board.start, board.goal, &mut stats)
                .unwrap();
            assert_eq!(stats.expanded_nodes, report.closed.len());
        }
    }

    #[test]
    fn test_random_boards_cost_properties() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let board = Board::random(9, 7, 0.25, &mut rng).unwrap();

            let outcomes: Vec<SearchOutcome> = ALL_STRATEGIES
                .iter()
                .map(|&strategy| run(&board, strategy).outcome)
                .collect();

            match (&outcomes[0], &outcomes[1], &outcomes[2]) {
                (
                    SearchOutcome::Found(bfs),
                    SearchOutcome::Found(dijkstra),
                    SearchOutcome::Found(astar),
                ) => {
                    // Both cost-aware strategies are optimal; BFS is not.
                    assert_eq!(dijkstra.cost, astar.cost, "seed {seed}");
                    assert!(bfs.cost >= dijkstra.cost, "seed {seed}");
                }
                (SearchOutcome::Exhausted, SearchOutcome::Exhausted, SearchOutcome::Exhausted) => {}
                other => panic!("strategies disagree on reachability (seed {seed}): {other:?}"),
            }
        }
    }
}
