//! Parallel bounded depth-first search for a shape-solving move sequence.
//!
//! Every ply picks a top turn, a bottom turn, and slices. The first ply is
//! split across rayon tasks, one per top turn that leaves the top row
//! sliceable; each task searches its subtree sequentially. The first task
//! to reach the goal stores its path and raises a shared flag, and every
//! other task returns as soon as it sees the flag.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use log::{debug, info, trace};
use thiserror::Error;

use crate::codec::{encode_move, MovePath};
use crate::executor::Goal;
use crate::notation::Sequence;
use crate::pruning::{valid_bottom_turns, valid_top_turns};
use crate::puzzle::Puzzle;

/// Default bound on plies after the first
pub const DEFAULT_MAX_DEPTH: usize = 8;

/// How the depth bound is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchStrategy {
    /// One pass bounded by `max_depth`; reports whichever hit comes first
    #[default]
    DepthFirst,
    /// Passes with bounds `0..=max_depth`, so the path found has the fewest plies
    IterativeDeepening,
}

/// Configuration for the solver
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Maximum additional depth after the first ply
    pub max_depth: usize,
    pub strategy: SearchStrategy,
    pub goal: Goal,
    /// Worker threads; `None` uses the global rayon pool
    pub threads: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strategy: SearchStrategy::DepthFirst,
            goal: Goal::ShapeSolved,
            threads: None,
        }
    }
}

/// A path that reaches the goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// The path exactly as the search walked it
    pub path: Sequence,
    /// The path with cancelling moves removed
    pub canonical: Sequence,
}

impl Solution {
    fn new(path: Sequence) -> Self {
        let canonical = path.canonicalize();
        Self { path, canonical }
    }
}

/// Result of the solver search
#[derive(Debug, Clone)]
pub struct SolverResult {
    pub solution: Option<Solution>,
    /// Number of (top, bottom) pairs tested against the goal
    pub nodes_searched: u64,
    /// Depth bound of the last pass that ran
    pub depth_bound: usize,
    pub time_elapsed_ms: u64,
}

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("failed to build search thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// State shared by all tasks of one bounded pass
struct SearchContext<'a> {
    goal: &'a Goal,
    max_depth: usize,
    found: AtomicBool,
    solution: Mutex<Option<Sequence>>,
    nodes: AtomicU64,
}

impl<'a> SearchContext<'a> {
    fn new(goal: &'a Goal, max_depth: usize) -> Self {
        Self {
            goal,
            max_depth,
            found: AtomicBool::new(false),
            solution: Mutex::new(None),
            nodes: AtomicU64::new(0),
        }
    }

    fn cancelled(&self) -> bool {
        self.found.load(Ordering::Acquire)
    }

    /// Test `puzzle` against the goal, storing `path` if it is the first hit.
    fn check(&self, puzzle: &Puzzle, path: &MovePath, ends_on_slice: bool) -> bool {
        if !self.goal.is_met(puzzle) {
            return false;
        }

        let mut slot = self.solution.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.is_none() {
            trace!("goal reached after {} plies", path.len());
            *slot = Some(Sequence::new(path.clone(), ends_on_slice));
            self.found.store(true, Ordering::Release);
        }
        true
    }
}

/// Search for a sequence taking `start` to the configured goal.
///
/// Exhausting the search without a hit is not an error; the result simply
/// carries no solution.
pub fn solve(start: &Puzzle, config: &SolverConfig) -> Result<SolverResult, SolverError> {
    match config.threads {
        Some(threads) => {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()?;
            Ok(pool.install(|| run(start, config)))
        }
        None => Ok(run(start, config)),
    }
}

fn run(start: &Puzzle, config: &SolverConfig) -> SolverResult {
    let start_time = Instant::now();
    info!(
        "Searching for {:?} with max depth {} ({:?})",
        config.goal, config.max_depth, config.strategy
    );

    let bounds = match config.strategy {
        SearchStrategy::DepthFirst => config.max_depth..=config.max_depth,
        SearchStrategy::IterativeDeepening => 0..=config.max_depth,
    };

    let mut nodes_searched = 0;
    let mut depth_bound = 0;
    let mut solution = None;
    for bound in bounds {
        debug!("Searching depth {}...", bound);
        depth_bound = bound;

        let ctx = SearchContext::new(&config.goal, bound);
        search_root(start, &ctx);
        nodes_searched += ctx.nodes.load(Ordering::Relaxed);

        let found = ctx.solution.into_inner().unwrap_or_else(PoisonError::into_inner);
        if let Some(path) = found {
            solution = Some(Solution::new(path));
            break;
        }
    }

    let time_elapsed_ms = start_time.elapsed().as_millis() as u64;
    match &solution {
        Some(s) => info!(
            "Found a {} move solution after {} nodes in {}ms",
            s.canonical.len(),
            nodes_searched,
            time_elapsed_ms
        ),
        None => info!(
            "Search exhausted after {} nodes in {}ms",
            nodes_searched, time_elapsed_ms
        ),
    }

    SolverResult {
        solution,
        nodes_searched,
        depth_bound,
        time_elapsed_ms,
    }
}

/// First ply: one task per top turn that keeps the top row sliceable.
fn search_root(start: &Puzzle, ctx: &SearchContext<'_>) {
    rayon::scope(|s| {
        for (top, top_next) in valid_top_turns(start) {
            s.spawn(move |_| {
                debug!("Spawned branch for top turn {}", top);
                let mut nodes = 0;
                search_bottom(&top_next, top, &MovePath::new(), 0, ctx, &mut nodes);
                ctx.nodes.fetch_add(nodes, Ordering::Relaxed);
            });
        }
    });
}

fn search(puzzle: &Puzzle, path: &MovePath, depth: usize, ctx: &SearchContext<'_>, nodes: &mut u64) {
    if depth > ctx.max_depth {
        return;
    }

    for (top, top_next) in valid_top_turns(puzzle) {
        if ctx.cancelled() {
            return;
        }
        search_bottom(&top_next, top, path, depth, ctx, nodes);
    }
}

/// Try every bottom turn under an already validated top turn.
fn search_bottom(
    puzzle: &Puzzle,
    top: i32,
    path: &MovePath,
    depth: usize,
    ctx: &SearchContext<'_>,
    nodes: &mut u64,
) {
    for (bottom, mut next) in valid_bottom_turns(puzzle) {
        if ctx.cancelled() {
            return;
        }
        *nodes += 1;

        let mut next_path = path.clone();
        next_path.push(encode_move(top, bottom));

        if ctx.check(&next, &next_path, false) {
            return;
        }

        // both halves of the axis were checked by the pruning filters
        if next.slice().is_err() {
            continue;
        }

        if ctx.check(&next, &next_path, true) {
            return;
        }

        search(&next, &next_path, depth + 1, ctx, nodes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::executor::verify_solution;

    fn scrambled(moves: &[(i32, i32)]) -> Puzzle {
        let mut puzzle = Puzzle::default();
        for &(top, bottom) in moves {
            puzzle.apply_move(top, bottom).unwrap();
        }
        puzzle
    }

    #[test]
    fn test_already_solved() {
        let result = solve(&Puzzle::default(), &SolverConfig::default()).unwrap();
        let solution = result.solution.unwrap();
        assert!(verify_solution(&Puzzle::default(), &solution.path, &Goal::ShapeSolved));

        let config = SolverConfig {
            max_depth: 0,
            threads: Some(1),
            ..Default::default()
        };
        let result = solve(&Puzzle::default(), &config).unwrap();
        let solution = result.solution.unwrap();
        assert_eq!(solution.path.len(), 1);
        assert!(solution.canonical.len() <= 1);
    }

    #[test]
    fn test_single_turn_scramble() {
        let mut puzzle = Puzzle::default();
        puzzle.turn(1, 0);

        let config = SolverConfig {
            max_depth: 0,
            ..Default::default()
        };
        let result = solve(&puzzle, &config).unwrap();
        let solution = result.solution.unwrap();
        assert!(verify_solution(&puzzle, &solution.path, &Goal::ShapeSolved));
        assert!(verify_solution(&puzzle, &solution.canonical, &Goal::ShapeSolved));
    }

    #[test]
    fn test_iterative_deepening_is_minimal() {
        let puzzle = scrambled(&[(3, 0), (-3, -3), (0, 3)]);
        assert!(!Goal::ShapeSolved.is_met(&puzzle));

        let config = SolverConfig {
            strategy: SearchStrategy::IterativeDeepening,
            threads: Some(2),
            ..Default::default()
        };
        let result = solve(&puzzle, &config).unwrap();
        assert_eq!(result.depth_bound, 2);
        let solution = result.solution.unwrap();
        assert_eq!(solution.path.len(), 3);
        assert!(verify_solution(&puzzle, &solution.path, &Goal::ShapeSolved));
    }

    #[test]
    fn test_exhausted_search() {
        let puzzle = scrambled(&[(3, 0), (-3, -3), (0, 3)]);
        let config = SolverConfig {
            max_depth: 1,
            ..Default::default()
        };
        let result = solve(&puzzle, &config).unwrap();
        assert!(result.solution.is_none());
        assert!(result.nodes_searched > 0);
    }

    #[test]
    fn test_exact_goal() {
        let puzzle = scrambled(&[(3, 0)]);
        let config = SolverConfig {
            strategy: SearchStrategy::IterativeDeepening,
            goal: Goal::Solved,
            max_depth: 1,
            ..Default::default()
        };
        let solution = solve(&puzzle, &config).unwrap().solution.unwrap();
        assert!(verify_solution(&puzzle, &solution.path, &Goal::Solved));
    }
}
