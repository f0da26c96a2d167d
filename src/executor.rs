//! Replaying recorded move sequences and testing goal states.

use serde::{Deserialize, Serialize};

use crate::notation::Sequence;
use crate::pattern::RowPattern;
use crate::puzzle::{Puzzle, PuzzleError};

/// Target state of a search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Goal {
    /// Cube shape with every piece on its own face
    #[default]
    ShapeSolved,
    /// Exactly the solved state
    Solved,
    /// Shape-solved and matching a partial layout
    Matches { top: RowPattern, bottom: RowPattern },
}

impl Goal {
    pub fn is_met(&self, puzzle: &Puzzle) -> bool {
        match self {
            Goal::ShapeSolved => puzzle.cube_shape() && puzzle.is_row_orientation_solved(),
            Goal::Solved => puzzle.is_solved(),
            Goal::Matches { top, bottom } => {
                puzzle.is_solved_by_matches(top.value, top.mask, bottom.value, bottom.mask)
            }
        }
    }
}

/// Predicates of a puzzle state, as reported to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateReport {
    pub cube_shape: bool,
    pub can_slice: bool,
    pub row_orientation_solved: bool,
    pub solved: bool,
}

impl From<&Puzzle> for StateReport {
    fn from(puzzle: &Puzzle) -> Self {
        Self {
            cube_shape: puzzle.cube_shape(),
            can_slice: puzzle.can_slice(),
            row_orientation_solved: puzzle.is_row_orientation_solved(),
            solved: puzzle.is_solved(),
        }
    }
}

/// Result of replaying a sequence
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub puzzle: Puzzle,
    /// Moves that turned at least one row
    pub turns: usize,
    pub slices: usize,
}

/// Replay `sequence` on a copy of `start`.
///
/// Each move is a turn followed by a slice; the last move's slice only runs
/// when the sequence ends on one.
pub fn execute(start: &Puzzle, sequence: &Sequence) -> Result<ExecutionResult, PuzzleError> {
    let mut result = ExecutionResult {
        puzzle: *start,
        turns: 0,
        slices: 0,
    };

    let count = sequence.moves.len();
    for (i, m) in sequence.moves.iter().enumerate() {
        result.puzzle.turn(m.top(), m.bottom());
        if !m.is_slice_only() {
            result.turns += 1;
        }
        if i + 1 < count || sequence.ends_on_slice {
            result.puzzle.slice()?;
            result.slices += 1;
        }
    }

    Ok(result)
}

/// Does `sequence` take `start` to `goal`? Illegal slices count as failure.
pub fn verify_solution(start: &Puzzle, sequence: &Sequence, goal: &Goal) -> bool {
    execute(start, sequence)
        .map(|result| goal.is_met(&result.puzzle))
        .unwrap_or(false)
}
