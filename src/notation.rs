//! Move notation: canonicalizing recorded paths, rendering and parsing.
//!
//! A path is written as `top bottom` pairs separated by `/`, where each `/`
//! is a slice. `3 0 / -3 -3 /` turns the top by 3, slices, turns both rows
//! by -3 and slices again. An empty segment is a pure slice.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::{encode_move, EncodedMove, MovePath};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotationError {
    #[error("expected `top bottom` turn pair, found {0:?}")]
    MalformedMove(String),
    #[error("invalid turn amount {0:?}")]
    InvalidTurn(String),
}

/// A path of moves, each a turn followed by a slice, except possibly the
/// last whose slice is only executed if `ends_on_slice` is set.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sequence {
    pub moves: MovePath,
    pub ends_on_slice: bool,
}

impl Sequence {
    pub fn new(moves: MovePath, ends_on_slice: bool) -> Self {
        Self {
            moves,
            ends_on_slice,
        }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Strip cancelling moves.
    ///
    /// Adjacent pure slices cancel in pairs, so an odd run of them leaves a
    /// single slice after the preceding move. Adjacent moves whose turns are
    /// exact inverses cancel too, repeatedly, until nothing changes. A pure
    /// slice counts as its own inverse, so slices brought together by a
    /// cancellation pair off as well.
    pub fn canonicalize(&self) -> Sequence {
        let mut reduced = MovePath::new();
        for &m in &self.moves {
            match reduced.last() {
                Some(&last) if last.is_inverse_of(m) => {
                    reduced.pop();
                }
                _ => reduced.push(m),
            }
        }

        let mut ends_on_slice = self.ends_on_slice;
        // an unsliced pure slice is no move at all
        if !ends_on_slice && reduced.last().is_some_and(|m| m.is_slice_only()) {
            reduced.pop();
            ends_on_slice = true;
        }

        Sequence {
            ends_on_slice: ends_on_slice && !reduced.is_empty(),
            moves: reduced,
        }
    }

    /// Render in `top bottom / ` notation with signed turn amounts.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let count = self.moves.len();
        for (i, m) in self.moves.iter().enumerate() {
            if !m.is_slice_only() {
                let _ = write!(out, "{m} ");
            }
            if i + 1 < count || self.ends_on_slice {
                out.push_str("/ ");
            }
        }
        out
    }
}

fn parse_turn(token: &str) -> Result<i32, NotationError> {
    token
        .parse()
        .map_err(|_| NotationError::InvalidTurn(token.to_string()))
}

fn parse_move(segment: &str) -> Result<EncodedMove, NotationError> {
    let cleaned: String = segment
        .chars()
        .map(|c| if c == ',' { ' ' } else { c })
        .filter(|c| *c != '(' && *c != ')')
        .collect();
    let parts: Vec<&str> = cleaned.split_whitespace().collect();
    match parts.as_slice() {
        [top, bottom] => Ok(encode_move(parse_turn(top)?, parse_turn(bottom)?)),
        _ => Err(NotationError::MalformedMove(segment.trim().to_string())),
    }
}

/// Parse `top bottom / ...` notation. `(3,0) / (-3,-3) /` is accepted too.
pub fn parse(text: &str) -> Result<Sequence, NotationError> {
    let segments: Vec<&str> = text.split('/').collect();
    let last = segments.len() - 1;
    let mut sequence = Sequence::default();

    for (i, segment) in segments.iter().enumerate() {
        let blank = segment.trim().is_empty();
        if i == last {
            if blank {
                sequence.ends_on_slice = last > 0;
            } else {
                sequence.moves.push(parse_move(segment)?);
            }
        } else if blank {
            sequence.moves.push(EncodedMove::SLICE);
        } else {
            sequence.moves.push(parse_move(segment)?);
        }
    }
    Ok(sequence)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(moves: &[(i32, i32)], ends_on_slice: bool) -> Sequence {
        Sequence::new(
            moves.iter().map(|&(t, b)| encode_move(t, b)).collect(),
            ends_on_slice,
        )
    }

    #[test]
    fn test_inverse_pair_cancels() {
        assert!(seq(&[(3, 0), (-3, 0)], true).canonicalize().is_empty());
        assert!(seq(&[(1, -2), (-1, 2)], false).canonicalize().is_empty());
        assert_eq!(seq(&[(3, 0), (-3, 0)], true).canonicalize(), seq(&[], false));
        assert!(seq(&[(3, 0), (-3, 0)], true).canonicalize().render().is_empty());
    }

    #[test]
    fn test_nested_cancellation() {
        let path = seq(&[(6, 0), (3, 3), (1, 2), (-1, -2), (-3, -3), (0, 9)], true);
        assert_eq!(path.canonicalize(), seq(&[(6, 0), (0, 9)], true));
    }

    #[test]
    fn test_slice_runs() {
        // even runs vanish
        let even = seq(&[(3, 0), (0, 0), (0, 0), (0, 3)], true);
        assert_eq!(even.canonicalize(), seq(&[(3, 0), (0, 3)], true));

        // odd runs keep one slice after the preceding move
        let odd = seq(&[(3, 0), (0, 0), (0, 0), (0, 0), (0, 3)], true);
        assert_eq!(odd.canonicalize(), seq(&[(3, 0), (0, 0), (0, 3)], true));

        let leading = seq(&[(0, 0); 7], false)
            .moves
            .into_iter()
            .chain(seq(&[(0, 15), (3, 3)], true).moves)
            .collect();
        let leading = Sequence::new(leading, true);
        assert_eq!(leading.canonicalize(), seq(&[(0, 0), (0, 15), (3, 3)], true));
    }

    #[test]
    fn test_slices_exposed_by_cancellation() {
        let path = seq(&[(0, 0), (3, 0), (-3, 0), (0, 0), (6, 6)], true);
        assert_eq!(path.canonicalize(), seq(&[(6, 6)], true));
    }

    #[test]
    fn test_trailing_unsliced_slice() {
        assert_eq!(seq(&[(0, 0)], false).canonicalize(), seq(&[], false));
        assert_eq!(seq(&[(3, 3), (0, 0)], false).canonicalize(), seq(&[(3, 3)], true));
    }

    #[test]
    fn test_idempotent() {
        let paths = [
            seq(&[(0, 0), (0, 0), (0, 0), (0, 15), (3, 3)], true),
            seq(&[(17, 0)], false),
            seq(&[(3, 0), (0, 0), (0, 0), (-3, 0), (1, 1), (0, 0)], false),
            seq(&[(9, 9), (9, 9), (2, 0)], true),
        ];
        for path in paths {
            let once = path.canonicalize();
            assert_eq!(once.canonicalize(), once);
        }
    }

    #[test]
    fn test_render() {
        let path = seq(&[(3, 0), (-3, -3), (0, 3)], true);
        assert_eq!(path.render(), "3 0 / -3 -3 / 0 3 / ");

        let unsliced = seq(&[(3, 0), (17, 10)], false);
        assert_eq!(unsliced.render(), "3 0 / -1 -8 ");

        let with_slice = seq(&[(0, 0), (0, 15), (3, 3)], true);
        assert_eq!(with_slice.render(), "/ 0 -3 / 3 3 / ");

        assert_eq!(seq(&[], false).render(), "");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse("3 0 / -3 -3 / 0 3 /").unwrap(), seq(&[(3, 0), (-3, -3), (0, 3)], true));
        assert_eq!(parse("(3,0) / (-3,-3)").unwrap(), seq(&[(3, 0), (-3, -3)], false));
        assert_eq!(parse("/ 0 -3 / 3 3 / ").unwrap(), seq(&[(0, 0), (0, 15), (3, 3)], true));
        assert_eq!(parse("").unwrap(), seq(&[], false));
        assert_eq!(parse("/").unwrap(), seq(&[(0, 0)], true));

        let rendered = seq(&[(0, 0), (1, -1), (9, 6)], false);
        assert_eq!(parse(&rendered.render()).unwrap(), rendered);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse("3 / 0 0 /"),
            Err(NotationError::MalformedMove("3".to_string()))
        );
        assert_eq!(
            parse("3 x /"),
            Err(NotationError::InvalidTurn("x".to_string()))
        );
    }
}
