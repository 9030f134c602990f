//! BEI command parsing.

use fevga_core::{Board, Variant};

use crate::error::BeiError;

/// A parsed BEI command line.
#[derive(Debug)]
pub enum Command {
    /// `bei` -- protocol handshake; must be the first line.
    Handshake,
    /// `move <state>` -- rank the legal plays for the given state.
    Move(Board),
    /// `choose <state>` -- pick the Acey-Deucey doubles value.
    Choose(Board),
}

/// Parse a single line of BEI input into a [`Command`].
pub fn parse_command(line: &str) -> Result<Command, BeiError> {
    let line = line.trim();
    if line == "bei" {
        return Ok(Command::Handshake);
    }
    if let Some(state) = line.strip_prefix("move ") {
        return Ok(Command::Move(state.trim().parse()?));
    }
    if let Some(state) = line.strip_prefix("choose ") {
        let board: Board = state.trim().parse()?;
        if board.variant() != Variant::AceyDeucey {
            return Err(BeiError::ChooseWithoutAcey);
        }
        return Ok(Command::Choose(board));
    }
    Err(BeiError::UnknownCommand {
        command: line.to_string(),
    })
}
