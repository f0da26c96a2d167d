//! Cube-shape solver for the two-layer Hexagon-1 puzzle.
//!
//! The puzzle is stored as two bit-packed rows (see [`puzzle`]). The solver
//! runs a bounded, parallel depth-first search for a sequence of turns and
//! slices that restores cube shape with every piece on its own face, then
//! strips cancelling moves from the path it found.

pub mod codec;
pub mod config;
pub mod executor;
pub mod notation;
pub mod pattern;
pub mod pruning;
pub mod puzzle;
pub mod solver;

// Re-export main types
pub use codec::{decode_move, encode_move, wrap_negative, wrap_positive, EncodedMove, MovePath};
pub use config::{ConfigError, ScrambleConfig};
pub use executor::{execute, verify_solution, ExecutionResult, Goal, StateReport};
pub use notation::{NotationError, Sequence};
pub use pattern::{build_pattern, PatternError, RowPattern};
pub use puzzle::{Puzzle, PuzzleError, Row};
pub use solver::{solve, SearchStrategy, Solution, SolverConfig, SolverError, SolverResult};
