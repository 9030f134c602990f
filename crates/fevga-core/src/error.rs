//! Error types for board validation and wire-state decoding.

/// Errors from structural validation of a [`Board`](crate::board::Board).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A side does not total exactly 15 checkers.
    #[error("expected 15 checkers for player {player}, found {count}")]
    WrongCheckerCount {
        /// Which player has the wrong total (1 or 2).
        player: u8,
        /// Number of checkers found.
        count: i32,
    },
    /// A die slot holds a value outside 0..=6.
    #[error("die slot holds {value}, expected 0..=6")]
    InvalidDie {
        /// The offending slot value.
        value: i8,
    },
    /// A bar slot holds a negative count.
    #[error("bar counts must be nonnegative, found {one}/{two}")]
    NegativeBar {
        /// Player one's bar slot value.
        one: i8,
        /// Player two's bar slot value.
        two: i8,
    },
    /// A home tray carries the wrong sign (player one's is nonnegative,
    /// player two's nonpositive).
    #[error("home tray signs are wrong: {one}/{two}")]
    BadHomeSign {
        /// Player one's home tray value.
        one: i8,
        /// Player two's home tray value.
        two: i8,
    },
    /// The variant slot holds an unknown tag.
    #[error("unknown variant tag {tag}")]
    UnknownVariant {
        /// The unrecognized tag value.
        tag: i8,
    },
}

/// Errors that occur when decoding a wire state into a board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The state does not have the expected number of comma-separated
    /// fields.
    #[error("expected {expected} state fields, found {found}")]
    WrongFieldCount {
        /// Number of fields expected.
        expected: usize,
        /// Number of fields found.
        found: usize,
    },
    /// A field is not a small integer.
    #[error("state field {index} is not an integer: \"{field}\"")]
    InvalidInteger {
        /// Zero-based field index.
        index: usize,
        /// The offending field text.
        field: String,
    },
    /// A rolled die is outside 0..=6.
    #[error("roll value out of range: {value}")]
    InvalidRoll {
        /// The offending roll value.
        value: i8,
    },
    /// The decoded board fails structural validation.
    #[error("invalid board: {source}")]
    InvalidBoard {
        /// The underlying board validation error.
        #[from]
        source: BoardError,
    },
}
