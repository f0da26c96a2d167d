//! Scramble input, as read from JSON.
//!
//! ```json
//! {
//!   "start": { "top": "510834C41551875C825928B6CC", "bottom": "9A5D648F38A1C6CAFBAA9E689F7" },
//!   "moves": [[0, 0], [3, 0], [-3, -3], [0, 3]],
//!   "notation": "1 0 /"
//! }
//! ```
//!
//! Every field is optional. The puzzle starts from `start` (solved if
//! absent), then `moves` are applied as turn-and-slice pairs, then
//! `notation` is replayed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::codec::MovePath;
use crate::executor::execute;
use crate::notation::{parse, NotationError};
use crate::puzzle::{Puzzle, PuzzleError, Row, ROW_MASK};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid scramble JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid {name} row {value:?}: expected at most 27 hex digits")]
    InvalidRow { name: &'static str, value: String },
    #[error("scramble move {index} ({top}, {bottom}) is illegal: {source}")]
    IllegalMove {
        index: usize,
        top: i32,
        bottom: i32,
        source: PuzzleError,
    },
    #[error("invalid scramble notation: {0}")]
    Notation(#[from] NotationError),
    #[error("scramble notation cannot be applied: {0}")]
    Replay(#[from] PuzzleError),
}

/// Explicit row values, as hex strings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartRows {
    pub top: String,
    pub bottom: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrambleConfig {
    #[serde(default)]
    pub start: Option<StartRows>,
    #[serde(default)]
    pub moves: Vec<[i32; 2]>,
    #[serde(default)]
    pub notation: Option<String>,
}

fn parse_row(name: &'static str, value: &str) -> Result<Row, ConfigError> {
    let digits = value.trim().trim_start_matches("0x").replace('_', "");
    let invalid = || ConfigError::InvalidRow {
        name,
        value: value.to_string(),
    };
    let row = Row::from_str_radix(&digits, 16).map_err(|_| invalid())?;
    if row & !ROW_MASK != 0 {
        return Err(invalid());
    }
    Ok(row)
}

impl ScrambleConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// A config that only replays a notation string
    pub fn from_notation(notation: &str) -> Self {
        Self {
            notation: Some(notation.to_string()),
            ..Default::default()
        }
    }

    /// Build the scrambled puzzle, returning it with the moves applied from `moves`.
    pub fn build(&self) -> Result<(Puzzle, MovePath), ConfigError> {
        let mut puzzle = match &self.start {
            Some(rows) => Puzzle::from_rows(
                parse_row("top", &rows.top)?,
                parse_row("bottom", &rows.bottom)?,
            ),
            None => Puzzle::default(),
        };

        let mut recorded = MovePath::new();
        for (index, &[top, bottom]) in self.moves.iter().enumerate() {
            puzzle
                .apply_move_recorded(&mut recorded, top, bottom)
                .map_err(|source| ConfigError::IllegalMove {
                    index,
                    top,
                    bottom,
                    source,
                })?;
        }

        if let Some(notation) = &self.notation {
            let sequence = parse(notation)?;
            puzzle = execute(&puzzle, &sequence)?.puzzle;
            recorded.extend(sequence.moves);
        }

        Ok((puzzle, recorded))
    }
}
