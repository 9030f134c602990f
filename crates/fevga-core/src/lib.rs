//! Core backgammon types: board representation, move generation, and game rules.

mod board;
mod error;
mod movegen;
mod moves;
mod play;
mod player;
mod state;
mod variant;

pub use board::{
    Board, PrettyBoard, BOARD_SPACES, SPACE_BAR_ONE, SPACE_BAR_TWO, SPACE_ENTERED_ONE,
    SPACE_ENTERED_TWO, SPACE_HOME_ONE, SPACE_HOME_TWO, SPACE_ROLL1, SPACE_ROLL2, SPACE_ROLL3,
    SPACE_ROLL4, SPACE_VARIANT,
};
pub use error::{BoardError, StateError};
pub use play::{CheckerMove, Play};
pub use player::Player;
pub use state::STATE_FIELDS;
pub use variant::Variant;
