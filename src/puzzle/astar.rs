use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::BuildHasherDefault;
use std::time::{Duration, Instant};

use hashbrown::HashSet as HbHashSet;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::puzzle::tiles::{GoalIndex, Tiles};
use crate::types::Dir;

type FastHasher = BuildHasherDefault<ahash::AHasher>;
type FastSet = HbHashSet<Tiles, FastHasher>;

/// One move of a solution: the blank's direction and the board after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Step {
    pub action: Dir,
    pub board: Tiles,
}

#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Moves from the first one after the start to the goal. `None` when the goal
    /// is unreachable; `Some(vec![])` when start already equals goal.
    pub path: Option<Vec<Step>>,
    /// Nodes popped and expanded. The goal node itself is not counted.
    pub nodes_expanded: u64,
    /// Largest open-set size observed.
    pub peak_frontier: usize,
    pub elapsed: Duration,
}

impl SolveOutcome {
    #[inline]
    pub fn moves(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct Node {
    pub(crate) board: Tiles,
    pub(crate) parent: Option<u32>,
    pub(crate) action: Option<Dir>,
    pub(crate) cost: u32,
}

/// Working set of one search. Nodes are only ever appended to the arena, and each
/// append is matched by exactly one heap push, so the arena index doubles as the
/// insertion sequence used to break f-ties first-in first-out.
pub(crate) struct Search {
    goal: GoalIndex,
    pub(crate) arena: Vec<Node>,
    open: BinaryHeap<Reverse<(u32, u32)>>,
    open_set: FastSet,
    closed: FastSet,
    nodes_expanded: u64,
    peak_frontier: usize,
}

impl Search {
    pub(crate) fn new(start: &Tiles, goal: &Tiles) -> Self {
        let mut s = Self {
            goal: GoalIndex::new(goal),
            arena: Vec::new(),
            open: BinaryHeap::new(),
            open_set: FastSet::default(),
            closed: FastSet::default(),
            nodes_expanded: 0,
            peak_frontier: 0,
        };
        s.push(Node {
            board: *start,
            parent: None,
            action: None,
            cost: 0,
        });
        s
    }

    #[allow(clippy::cast_possible_truncation)]
    fn push(&mut self, node: Node) {
        let f = node.cost + self.goal.manhattan(&node.board);
        let idx = self.arena.len() as u32;
        self.open_set.insert(node.board);
        self.arena.push(node);
        self.open.push(Reverse((f, idx)));
        self.peak_frontier = self.peak_frontier.max(self.open.len());
    }

    /// Run to completion. Returns the arena index of the goal node if reached.
    pub(crate) fn run(&mut self) -> Option<u32> {
        while let Some(Reverse((_f, idx))) = self.open.pop() {
            let node = self.arena[idx as usize];
            self.open_set.remove(&node.board);

            if self.goal.is_goal(&node.board) {
                return Some(idx);
            }

            self.closed.insert(node.board);
            self.nodes_expanded += 1;

            for (dir, next) in node.board.successors() {
                // No re-opening: the first discovery of a board is final.
                if self.closed.contains(&next) || self.open_set.contains(&next) {
                    continue;
                }
                self.push(Node {
                    board: next,
                    parent: Some(idx),
                    action: Some(dir),
                    cost: node.cost + 1,
                });
            }
        }
        None
    }

    fn reconstruct(&self, mut idx: u32) -> Vec<Step> {
        let mut path = Vec::new();
        loop {
            let node = &self.arena[idx as usize];
            match (node.parent, node.action) {
                (Some(parent), Some(action)) => {
                    path.push(Step {
                        action,
                        board: node.board,
                    });
                    idx = parent;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }
}

/// A* from `start` to `goal` with the Manhattan heuristic.
///
/// Inputs are assumed to be permutations of 0..=8; nothing is validated here.
/// There is no parity pre-check: an unreachable goal is reported as a `None` path
/// once all 9!/2 reachable states are exhausted.
#[instrument(level = "debug", skip_all)]
#[allow(clippy::cast_possible_truncation)]
pub fn solve(start: &Tiles, goal: &Tiles) -> SolveOutcome {
    let t0 = Instant::now();
    let mut search = Search::new(start, goal);
    let found = search.run();
    let path = found.map(|idx| search.reconstruct(idx));
    let elapsed = t0.elapsed();

    debug!(
        start = ?start.cells(),
        nodes_expanded = search.nodes_expanded,
        peak_frontier = search.peak_frontier,
        moves = ?path.as_ref().map(Vec::len),
        elapsed_ms = elapsed.as_millis() as u64,
        "a* finished"
    );

    SolveOutcome {
        path,
        nodes_expanded: search.nodes_expanded,
        peak_frontier: search.peak_frontier,
        elapsed,
    }
}
