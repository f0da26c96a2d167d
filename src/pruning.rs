//! Candidate turns and the slice-legality filters used by the search.
//!
//! Only turns that keep a row sliceable are worth trying, since every ply of
//! the search ends with a slice. The top row is filtered before any bottom
//! candidate is generated, which fixes the order branches are visited in.

use smallvec::SmallVec;

use crate::puzzle::Puzzle;

/// Turn amounts tried on each row, in search order.
///
/// In signed form: 0, +3, -3, +6, -6, 9, +1, -1, +2.
pub const CANDIDATE_TURNS: [i32; 9] = [0, 3, 15, 6, 12, 9, 1, 17, 2];

/// A puzzle after a candidate turn, paired with the turn that produced it
pub type Branches = SmallVec<[(i32, Puzzle); 9]>;

/// Top turns after which the top row can still be sliced.
pub fn valid_top_turns(puzzle: &Puzzle) -> Branches {
    CANDIDATE_TURNS
        .iter()
        .filter_map(|&turns| {
            let mut next = *puzzle;
            next.turn(turns, 0);
            next.can_slice_top().then_some((turns, next))
        })
        .collect()
}

/// Bottom turns after which the bottom row can still be sliced.
///
/// `puzzle` is expected to have passed [`valid_top_turns`] already.
pub fn valid_bottom_turns(puzzle: &Puzzle) -> Branches {
    CANDIDATE_TURNS
        .iter()
        .filter_map(|&turns| {
            let mut next = *puzzle;
            next.turn(0, turns);
            next.can_slice_bottom().then_some((turns, next))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::wrap_negative;

    #[test]
    fn test_candidate_turns_signed() {
        let signed: Vec<i32> = CANDIDATE_TURNS.iter().map(|&t| wrap_negative(t)).collect();
        assert_eq!(signed, vec![0, 3, -3, 6, -6, 9, 1, -1, 2]);
    }

    #[test]
    fn test_solved_branches() {
        let puzzle = Puzzle::default();

        // from solved, -1 and +2 push a corner across the top axis
        let top: Vec<i32> = valid_top_turns(&puzzle).iter().map(|(t, _)| *t).collect();
        assert_eq!(top, vec![0, 3, 15, 6, 12, 9, 1]);

        // and +1 across the bottom axis
        let bottom: Vec<i32> = valid_bottom_turns(&puzzle).iter().map(|(t, _)| *t).collect();
        assert_eq!(bottom, vec![0, 3, 15, 6, 12, 9, 17, 2]);
    }

    #[test]
    fn test_branches_are_independent_copies() {
        let puzzle = Puzzle::default();
        for (turns, next) in valid_top_turns(&puzzle) {
            let mut expected = puzzle;
            expected.turn(turns, 0);
            assert_eq!(next, expected);
            assert!(next.can_slice_top());
        }
        assert!(puzzle.is_solved());
    }
}
