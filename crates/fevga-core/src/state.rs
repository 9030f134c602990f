//! Wire codec for board states.
//!
//! A state travels as a comma-separated integer list: the 28 checker
//! slots (home trays, points, bars), the three rolled dice, the two
//! entry flags, and the variant tag — 34 fields. Decoding places the
//! dice into the die slots (doubles are replicated into all four,
//! Tabula keeps its third die) and forces both entry flags for
//! Backgammon, which has no entry phase.

use std::fmt;
use std::str::FromStr;

use crate::board::{Board, BOARD_SPACES, SPACE_ENTERED_ONE, SPACE_ENTERED_TWO, SPACE_VARIANT};
use crate::error::StateError;
use crate::variant::Variant;

/// Number of comma-separated fields in a wire state.
pub const STATE_FIELDS: usize = 34;

impl FromStr for Board {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Board, StateError> {
        let fields: Vec<&str> = s.split(',').map(str::trim).collect();
        if fields.len() != STATE_FIELDS {
            return Err(StateError::WrongFieldCount {
                expected: STATE_FIELDS,
                found: fields.len(),
            });
        }
        let mut values = [0i8; STATE_FIELDS];
        for (index, field) in fields.iter().enumerate() {
            values[index] = field.parse().map_err(|_| StateError::InvalidInteger {
                index,
                field: (*field).to_string(),
            })?;
        }

        let (roll1, roll2, roll3) = (values[28], values[29], values[30]);
        for roll in [roll1, roll2, roll3] {
            if !(0..=6).contains(&roll) {
                return Err(StateError::InvalidRoll { value: roll });
            }
        }

        let mut raw = [0i8; BOARD_SPACES];
        raw[..28].copy_from_slice(&values[..28]);
        raw[SPACE_ENTERED_ONE] = (values[31] != 0) as i8;
        raw[SPACE_ENTERED_TWO] = (values[32] != 0) as i8;
        raw[SPACE_VARIANT] = values[33];
        if Variant::from_tag(values[33]) == Some(Variant::Backgammon) {
            raw[SPACE_ENTERED_ONE] = 1;
            raw[SPACE_ENTERED_TWO] = 1;
        }

        let board = Board::from_slots(raw).with_roll(roll1, roll2, roll3);
        board.validate()?;
        Ok(board)
    }
}

impl fmt::Display for Board {
    /// Render the wire form. Round-trips with [`FromStr`] for freshly
    /// decoded states; boards with partially consumed dice re-encode the
    /// remaining dice best-effort.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for space in 0..28 {
            write!(f, "{},", self[space])?;
        }
        let dice = self.dice();
        let roll3 = if self.variant() == Variant::Tabula && dice[0] != dice[1] {
            dice[2]
        } else {
            0
        };
        write!(
            f,
            "{},{},{},{},{},{}",
            dice[0],
            dice[1],
            roll3,
            self[SPACE_ENTERED_ONE],
            self[SPACE_ENTERED_TWO],
            self[SPACE_VARIANT],
        )
    }
}
