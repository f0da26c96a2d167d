//! Slot constants and the move codec.
//!
//! Every turn amount is taken modulo the 18 slots of a row. Moves are stored
//! as a single packed integer so that a recorded path is a flat list of
//! small values that can be copied cheaply between search branches.

use std::fmt;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Number of bits used by a single slot
pub const SLOT_SIZE: u32 = 6;
/// Number of slots in one row
pub const SLOTS_PER_ROW: i32 = 18;
/// Number of slots on one side of the slice axis
pub const SLOTS_PER_HALF: i32 = SLOTS_PER_ROW / 2;

const FIELD_MASK: u16 = (1 << SLOT_SIZE) - 1;

/// Wrap a turn amount into `[0, 18)`.
pub fn wrap_positive(turns: i32) -> i32 {
    turns.rem_euclid(SLOTS_PER_ROW)
}

/// Wrap a turn amount into `[-8, 9]`, the signed form used in notation.
///
/// Internal arithmetic always uses [`wrap_positive`].
pub fn wrap_negative(turns: i32) -> i32 {
    (wrap_positive(turns) + SLOTS_PER_HALF - 1) % SLOTS_PER_ROW - (SLOTS_PER_HALF - 1)
}

/// A (top, bottom) turn pair packed into one integer.
///
/// Both components are stored wrapped into `[0, 18)`, six bits each. The
/// all-zero move is a pure slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncodedMove(u16);

/// A recorded sequence of moves. Search paths never exceed a handful of
/// plies, so they live inline.
pub type MovePath = SmallVec<[EncodedMove; 16]>;

impl EncodedMove {
    /// The pure slice move
    pub const SLICE: EncodedMove = EncodedMove(0);

    /// Raw packed value
    pub fn bits(self) -> u16 {
        self.0
    }

    pub fn top(self) -> i32 {
        ((self.0 >> SLOT_SIZE) & FIELD_MASK) as i32
    }

    pub fn bottom(self) -> i32 {
        (self.0 & FIELD_MASK) as i32
    }

    /// True for the pure slice move (no rotation on either row)
    pub fn is_slice_only(self) -> bool {
        self.0 == 0
    }

    /// The move whose turns undo this one
    pub fn inverse(self) -> Self {
        encode_move(-self.top(), -self.bottom())
    }

    pub fn is_inverse_of(self, other: EncodedMove) -> bool {
        self.top() == wrap_positive(-other.top()) && self.bottom() == wrap_positive(-other.bottom())
    }
}

impl fmt::Display for EncodedMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", wrap_negative(self.top()), wrap_negative(self.bottom()))
    }
}

/// Encode a top and bottom turn into a single move.
pub fn encode_move(top_turns: i32, bottom_turns: i32) -> EncodedMove {
    let top = wrap_positive(top_turns) as u16;
    let bottom = wrap_positive(bottom_turns) as u16;
    EncodedMove((top << SLOT_SIZE) | bottom)
}

/// Decode a packed move into its `(top, bottom)` turns, each in `[0, 18)`.
pub fn decode_move(bits: u16) -> (i32, i32) {
    let top = ((bits >> SLOT_SIZE) & FIELD_MASK) as i32;
    let bottom = (bits & FIELD_MASK) as i32;
    (top, bottom)
}
