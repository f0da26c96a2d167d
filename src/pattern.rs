//! Partial layouts for [`Puzzle::is_solved_by_matches`](crate::Puzzle::is_solved_by_matches).
//!
//! A layout is written as a row of piece tokens, one per slot position:
//!
//! - `c1a`..`c6a`, `c1b`..`c6b`: a corner (two slots, left half first)
//! - `e1a`..`e6a`, `e1b`..`e6b`: an edge
//! - `x`: ignore one slot, `xx`: ignore two slots
//!
//! The `a` suffix marks a top-face piece and `b` a bottom-face piece.

use thiserror::Error;

use crate::codec::{SLOTS_PER_ROW, SLOT_SIZE};
use crate::puzzle::{slot, Row, SLOT_MASK};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("unknown piece token {0:?}")]
    UnknownToken(String),
    #[error("layout covers {0} slots, expected 18")]
    WrongLength(usize),
}

/// A row value together with the mask of slots it constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RowPattern {
    pub value: Row,
    pub mask: Row,
}

/// Slots produced by one token; `None` marks an ignored slot
fn token_slots(token: &str) -> Result<Vec<Option<u8>>, PatternError> {
    match token {
        "x" => return Ok(vec![None]),
        "xx" => return Ok(vec![None, None]),
        _ => {}
    }

    let unknown = || PatternError::UnknownToken(token.to_string());
    let bytes = token.as_bytes();
    if bytes.len() != 3 {
        return Err(unknown());
    }
    let number = match bytes[1] {
        b'1'..=b'6' => bytes[1] - b'0',
        _ => return Err(unknown()),
    };
    let face = match bytes[2] {
        b'a' => 0,
        b'b' => slot::FACE_PARITY,
        _ => return Err(unknown()),
    };

    match bytes[0] {
        b'c' => {
            let left = face | (2 * number - 1);
            Ok(vec![Some(left), Some(left | slot::HALF_PARITY)])
        }
        b'e' => Ok(vec![Some(face | (2 * number))]),
        _ => Err(unknown()),
    }
}

/// Build a row pattern from a whitespace separated layout.
pub fn build_pattern(layout: &str) -> Result<RowPattern, PatternError> {
    let mut slots = Vec::with_capacity(SLOTS_PER_ROW as usize);
    for token in layout.split_whitespace() {
        slots.extend(token_slots(token)?);
    }
    if slots.len() != SLOTS_PER_ROW as usize {
        return Err(PatternError::WrongLength(slots.len()));
    }

    let mut pattern = RowPattern::default();
    for entry in slots {
        pattern.value <<= SLOT_SIZE;
        pattern.mask <<= SLOT_SIZE;
        if let Some(s) = entry {
            pattern.value |= Row::from(s);
            pattern.mask |= SLOT_MASK;
        }
    }
    Ok(pattern)
}
