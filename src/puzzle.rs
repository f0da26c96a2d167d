//! Bit-packed representation of the Hexagon-1 puzzle.
//!
//! Each face is a [`Row`]: 18 contiguous 6-bit slots packed into the low
//! 108 bits of a `u128`. Slot position 0 is the most significant slot, slot
//! position 17 the least significant. The remaining 20 high bits are always
//! zero.
//!
//! A slot reads, most significant bit first:
//!
//! ```text
//!   [0]    face parity   0 = top face, 1 = bottom face
//!   [1]    half parity   0 = left half, 1 = right half of a corner
//!   [2..5] piece id      both halves of a corner share it
//!   [5]    corner flag   lowest id bit, 0 for every edge
//! ```
//!
//! The top row starts at C1 and runs clockwise; the bottom row starts at E3
//! and runs counterclockwise. With that layout a slice is a plain swap of
//! slot positions 0..9 between the rows.

use std::fmt;

use thiserror::Error;

use crate::codec::{encode_move, wrap_positive, EncodedMove, MovePath, SLOTS_PER_ROW, SLOT_SIZE};

pub type Row = u128;

/// Number of meaningful bits in a row
pub const ROW_BITS: u32 = SLOTS_PER_ROW as u32 * SLOT_SIZE;
/// Number of bits in half a row
pub const HALF_BITS: u32 = ROW_BITS / 2;

/// Isolates one slot
pub const SLOT_MASK: Row = (1 << SLOT_SIZE) - 1;
/// Isolates the 108 meaningful bits of a row
pub const ROW_MASK: Row = (1 << ROW_BITS) - 1;

pub const SOLVED_TOP: Row = 0x0000_0051_0834_C415_5187_5C82_5928_B6CC;
pub const SOLVED_BOTTOM: Row = 0x0000_09A5_D648_F38A_1C6C_AFBA_A9E6_89F7;

/// Slot positions 0..9, the half that moves during a slice
const HALF_MASK: Row = ((1 << HALF_BITS) - 1) << (ROW_BITS - HALF_BITS);

/// Corner flag of every slot that must hold an edge in cube shape
const TOP_CUBE_SHAPE: Row = 0x0000_0000_0400_0100_0040_0010_0004_0001;
const BOTTOM_CUBE_SHAPE: Row = 0x0000_0040_0010_0004_0001_0000_4000_1000;

/// Half parity of slot positions 0 and 9
const SLICE_MASK: Row = 0x0000_0400_0000_0000_0010_0000_0000_0000;

/// Face parity of every slot
const ROW_ORIENTATION_MASK: Row = 0x0000_0820_8208_2082_0820_8208_2082_0820;

/// Errors raised by puzzle operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PuzzleError {
    #[error("cannot slice: a corner straddles the slice axis")]
    IllegalSlice,
}

/// Rotate a row clockwise by `slots` slots.
///
/// Slots shifted off the low end re-enter at slot position 0.
pub fn turn_row(row: Row, slots: i32) -> Row {
    let slots = wrap_positive(slots) as u32;
    if slots == 0 {
        return row;
    }
    let shift = slots * SLOT_SIZE;
    let tail = (row & ((1 << shift) - 1)) << (ROW_BITS - shift);
    ((row >> shift) | tail) & ROW_MASK
}

/// Read the slot at `position` (0 = most significant).
pub fn slot_at(row: Row, position: usize) -> u8 {
    let shift = (SLOTS_PER_ROW as usize - 1 - position) as u32 * SLOT_SIZE;
    ((row >> shift) & SLOT_MASK) as u8
}

/// Slot fields
pub mod slot {
    pub const FACE_PARITY: u8 = 0b10_0000;
    pub const HALF_PARITY: u8 = 0b01_0000;
    pub const PIECE_ID: u8 = 0b00_1111;
    pub const CORNER_FLAG: u8 = 0b00_0001;

    pub fn is_bottom_face(slot: u8) -> bool {
        slot & FACE_PARITY != 0
    }

    pub fn is_right_half(slot: u8) -> bool {
        slot & HALF_PARITY != 0
    }

    pub fn is_corner(slot: u8) -> bool {
        slot & CORNER_FLAG != 0
    }

    pub fn piece_id(slot: u8) -> u8 {
        slot & PIECE_ID
    }
}

/// A mutable binary representation of the puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Puzzle {
    top: Row,
    bottom: Row,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self {
            top: SOLVED_TOP,
            bottom: SOLVED_BOTTOM,
        }
    }
}

impl Puzzle {
    /// Create a solved puzzle
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a puzzle from explicit rows. Padding bits are cleared.
    pub fn from_rows(top: Row, bottom: Row) -> Self {
        Self {
            top: top & ROW_MASK,
            bottom: bottom & ROW_MASK,
        }
    }

    pub fn top(&self) -> Row {
        self.top
    }

    pub fn bottom(&self) -> Row {
        self.bottom
    }

    /// Rotate both rows. Positive values turn clockwise.
    ///
    /// Never fails; slice legality is not checked here.
    pub fn turn(&mut self, top_turns: i32, bottom_turns: i32) {
        self.top = turn_row(self.top, top_turns);
        self.bottom = turn_row(self.bottom, bottom_turns);
    }

    /// Swap slot positions 0..9 of the top and bottom rows.
    ///
    /// Fails, leaving the puzzle untouched, if a corner straddles the axis.
    pub fn slice(&mut self) -> Result<(), PuzzleError> {
        if !self.can_slice() {
            return Err(PuzzleError::IllegalSlice);
        }

        let top_half = self.top & HALF_MASK;
        let bottom_half = self.bottom & HALF_MASK;

        self.top = (self.top & !HALF_MASK) | bottom_half;
        self.bottom = (self.bottom & !HALF_MASK) | top_half;
        Ok(())
    }

    /// Turn followed by a slice
    pub fn apply_move(&mut self, top_turns: i32, bottom_turns: i32) -> Result<(), PuzzleError> {
        self.turn(top_turns, bottom_turns);
        self.slice()
    }

    /// Turn followed by a slice, recording the move on success
    pub fn apply_move_recorded(
        &mut self,
        path: &mut MovePath,
        top_turns: i32,
        bottom_turns: i32,
    ) -> Result<(), PuzzleError> {
        self.apply_move(top_turns, bottom_turns)?;
        path.push(encode_move(top_turns, bottom_turns));
        Ok(())
    }

    /// Apply an already encoded move (turn then slice)
    pub fn apply_encoded(&mut self, m: EncodedMove) -> Result<(), PuzzleError> {
        self.apply_move(m.top(), m.bottom())
    }

    /// Whether every edge position of both rows holds an edge.
    ///
    /// There are exactly 12 edges, so once they all sit on edge positions the
    /// corners must fill the rest. Assuming no illegal slice was ever made
    /// this means the puzzle has the geometry of the solved state.
    pub fn cube_shape(&self) -> bool {
        self.top & TOP_CUBE_SHAPE == 0 && self.bottom & BOTTOM_CUBE_SHAPE == 0
    }

    /// Whether both rows are free of corners crossing the slice axis.
    ///
    /// Corner halves stay together, so a corner crosses the axis exactly
    /// when a right half sits on slot position 0 or 9.
    pub fn can_slice(&self) -> bool {
        self.can_slice_top() && self.can_slice_bottom()
    }

    pub fn can_slice_top(&self) -> bool {
        self.top & SLICE_MASK == 0
    }

    pub fn can_slice_bottom(&self) -> bool {
        self.bottom & SLICE_MASK == 0
    }

    /// Whether all top pieces are in the top row and all bottom pieces in the bottom row
    pub fn is_row_orientation_solved(&self) -> bool {
        self.top & ROW_ORIENTATION_MASK == 0 && !self.bottom & ROW_ORIENTATION_MASK == 0
    }

    /// Whether the puzzle is shape-solved and matches a partial layout.
    ///
    /// Bits outside `top_mask`/`bottom_mask` are ignored.
    pub fn is_solved_by_matches(
        &self,
        top_match: Row,
        top_mask: Row,
        bottom_match: Row,
        bottom_mask: Row,
    ) -> bool {
        if !self.cube_shape() || !self.is_row_orientation_solved() {
            return false;
        }

        self.top & top_mask == top_match & top_mask
            && self.bottom & bottom_mask == bottom_match & bottom_mask
    }

    pub fn is_solved(&self) -> bool {
        self.is_top_solved() && self.is_bottom_solved()
    }

    pub fn is_top_solved(&self) -> bool {
        self.top == SOLVED_TOP
    }

    pub fn is_bottom_solved(&self) -> bool {
        self.bottom == SOLVED_BOTTOM
    }
}

fn fmt_row(f: &mut fmt::Formatter<'_>, row: Row) -> fmt::Result {
    for position in 0..SLOTS_PER_ROW as usize {
        if position > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{:06b}", slot_at(row, position))?;
    }
    Ok(())
}

impl fmt::Display for Puzzle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Top:    ")?;
        fmt_row(f, self.top)?;
        f.write_str("\nBottom: ")?;
        fmt_row(f, self.bottom)?;
        writeln!(f)?;
        writeln!(f, "Cube Shape:  {}", self.cube_shape())?;
        writeln!(f, "Can Slice:   {}", self.can_slice())?;
        writeln!(f, "R.O. Solved: {}", self.is_row_orientation_solved())?;
        write!(f, "Is Solved:   {}", self.is_solved())
    }
}
