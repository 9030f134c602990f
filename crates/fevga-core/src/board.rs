//! The board: checker counts, dice, bars, home trays, and variant tag.

use std::fmt;
use std::ops::{Index, IndexMut};

use crate::error::BoardError;
use crate::player::Player;
use crate::variant::Variant;

/// Home tray of player one. In Acey-Deucey and Tabula this slot also
/// holds the starting stack before the player has entered.
pub const SPACE_HOME_ONE: usize = 0;
/// Home tray of player two (stored as a negative count).
pub const SPACE_HOME_TWO: usize = 25;
/// Bar of player one (nonnegative count).
pub const SPACE_BAR_ONE: usize = 26;
/// Bar of player two (nonnegative count).
pub const SPACE_BAR_TWO: usize = 27;
/// First die slot. A nonzero value is an unused pip count 1..6.
pub const SPACE_ROLL1: usize = 28;
pub const SPACE_ROLL2: usize = 29;
pub const SPACE_ROLL3: usize = 30;
pub const SPACE_ROLL4: usize = 31;
/// Entry flag of player one (Acey-Deucey/Tabula; always 1 in Backgammon).
pub const SPACE_ENTERED_ONE: usize = 32;
/// Entry flag of player two.
pub const SPACE_ENTERED_TWO: usize = 33;
/// Variant tag, see [`Variant`].
pub const SPACE_VARIANT: usize = 34;

/// Number of slots in the board vector.
pub const BOARD_SPACES: usize = 35;

/// Complete game state in 35 signed bytes: 24 points (positive counts
/// belong to player one), two home trays, two bars, four die slots, two
/// entry flags, and the variant tag.
///
/// Boards are plain values; every mutation primitive consumes `self` and
/// returns the successor board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board([i8; BOARD_SPACES]);

impl Board {
    /// Starting position for the given variant, with no dice rolled.
    pub fn starting(variant: Variant) -> Board {
        match variant {
            Variant::Backgammon => Board([
                0, -2, 0, 0, 0, 0, 5, 0, 3, 0, 0, 0, -5, 5, 0, 0, 0, -3, 0, -5, 0, 0, 0, 0, 2,
                0, 0, 0, 0, 0, 0, 0, 1, 1, 0,
            ]),
            Variant::AceyDeucey | Variant::Tabula => {
                let mut b = [0i8; BOARD_SPACES];
                b[SPACE_HOME_ONE] = 15;
                b[SPACE_HOME_TWO] = -15;
                b[SPACE_VARIANT] = variant.tag();
                Board(b)
            }
        }
    }

    /// Build a board from its raw slot values. No validation is applied;
    /// see [`Board::validate`].
    pub const fn from_slots(slots: [i8; BOARD_SPACES]) -> Board {
        Board(slots)
    }

    /// Return a copy with one slot overwritten.
    pub fn with(mut self, space: usize, value: i8) -> Board {
        self.0[space] = value;
        self
    }

    /// Home tray slot of the given player.
    #[inline]
    pub const fn home_space(player: Player) -> usize {
        match player {
            Player::One => SPACE_HOME_ONE,
            Player::Two => SPACE_HOME_TWO,
        }
    }

    /// Bar slot of the given player.
    #[inline]
    pub const fn bar_space(player: Player) -> usize {
        match player {
            Player::One => SPACE_BAR_ONE,
            Player::Two => SPACE_BAR_TWO,
        }
    }

    /// Entry flag slot of the given player.
    #[inline]
    pub const fn entered_space(player: Player) -> usize {
        match player {
            Player::One => SPACE_ENTERED_ONE,
            Player::Two => SPACE_ENTERED_TWO,
        }
    }

    /// The variant this board is played under. An unknown tag reads as
    /// Backgammon; the state decoder rejects unknown tags up front.
    #[inline]
    pub fn variant(&self) -> Variant {
        Variant::from_tag(self.0[SPACE_VARIANT]).unwrap_or(Variant::Backgammon)
    }

    /// Whether every checker of the player has entered the board at least
    /// once. Backgammon has no entry phase and always reports true.
    #[inline]
    pub fn entered(&self, player: Player) -> bool {
        !self.variant().enters_from_home() || self.0[Board::entered_space(player)] != 0
    }

    /// Nonnegative count of the player's checkers at a checker slot
    /// (points, home trays, bars). Returns 0 for slots the player does
    /// not occupy, regardless of the slot's storage convention.
    pub fn checkers(&self, player: Player, space: usize) -> i8 {
        let v = self.0[space];
        match player {
            Player::One => {
                if space == SPACE_HOME_TWO || space == SPACE_BAR_TWO {
                    0
                } else {
                    v.max(0)
                }
            }
            Player::Two => {
                if space == SPACE_HOME_ONE || space == SPACE_BAR_ONE {
                    0
                } else if space == SPACE_BAR_TWO {
                    v
                } else {
                    (-v).max(0)
                }
            }
        }
    }

    /// The four die slots.
    #[inline]
    pub fn dice(&self) -> [i8; 4] {
        [
            self.0[SPACE_ROLL1],
            self.0[SPACE_ROLL2],
            self.0[SPACE_ROLL3],
            self.0[SPACE_ROLL4],
        ]
    }

    /// Copy with the rolled dice placed into the die slots: doubles fill
    /// all four slots, Tabula carries its third die, slot four is unused
    /// otherwise.
    pub fn with_roll(mut self, roll1: i8, roll2: i8, roll3: i8) -> Board {
        self.0[SPACE_ROLL1] = roll1;
        self.0[SPACE_ROLL2] = roll2;
        self.0[SPACE_ROLL3] = 0;
        self.0[SPACE_ROLL4] = 0;
        if roll1 == roll2 && roll1 != 0 {
            self.0[SPACE_ROLL3] = roll1;
            self.0[SPACE_ROLL4] = roll1;
        } else if self.variant() == Variant::Tabula {
            self.0[SPACE_ROLL3] = roll3;
        }
        self
    }

    /// Validate the structural invariants: 15 checkers per side, die
    /// values in range, nonnegative bars, home tray signs, and a known
    /// variant tag.
    pub fn validate(&self) -> Result<(), BoardError> {
        if Variant::from_tag(self.0[SPACE_VARIANT]).is_none() {
            return Err(BoardError::UnknownVariant {
                tag: self.0[SPACE_VARIANT],
            });
        }
        if self.0[SPACE_BAR_ONE] < 0 || self.0[SPACE_BAR_TWO] < 0 {
            return Err(BoardError::NegativeBar {
                one: self.0[SPACE_BAR_ONE],
                two: self.0[SPACE_BAR_TWO],
            });
        }
        if self.0[SPACE_HOME_ONE] < 0 || self.0[SPACE_HOME_TWO] > 0 {
            return Err(BoardError::BadHomeSign {
                one: self.0[SPACE_HOME_ONE],
                two: self.0[SPACE_HOME_TWO],
            });
        }
        for slot in SPACE_ROLL1..=SPACE_ROLL4 {
            let value = self.0[slot];
            if !(0..=6).contains(&value) {
                return Err(BoardError::InvalidDie { value });
            }
        }
        for player in Player::ALL {
            let mut total = 0i32;
            for space in 0..28 {
                total += self.checkers(player, space) as i32;
            }
            if total != 15 {
                return Err(BoardError::WrongCheckerCount {
                    player: player.index() as u8 + 1,
                    count: total,
                });
            }
        }
        Ok(())
    }

    /// Return a pretty-printable wrapper for this board.
    pub fn pretty(&self) -> PrettyBoard<'_> {
        PrettyBoard(self)
    }
}

impl Index<usize> for Board {
    type Output = i8;

    #[inline]
    fn index(&self, space: usize) -> &i8 {
        &self.0[space]
    }
}

impl IndexMut<usize> for Board {
    #[inline]
    fn index_mut(&mut self, space: usize) -> &mut i8 {
        &mut self.0[space]
    }
}

/// Wrapper rendering the 24 points as two rows, with the trays, bars,
/// and dice summarized underneath.
pub struct PrettyBoard<'a>(&'a Board);

impl fmt::Display for PrettyBoard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let b = self.0;
        for space in 13..=24 {
            write!(f, "{:>4}", b[space])?;
        }
        writeln!(f)?;
        for space in (1..=12).rev() {
            write!(f, "{:>4}", b[space])?;
        }
        writeln!(f)?;
        writeln!(
            f,
            "home {}/{} bar {}/{} dice {:?} entered {}/{} ({})",
            b[SPACE_HOME_ONE],
            b[SPACE_HOME_TWO],
            b[SPACE_BAR_ONE],
            b[SPACE_BAR_TWO],
            b.dice(),
            b[SPACE_ENTERED_ONE],
            b[SPACE_ENTERED_TWO],
            b.variant(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_positions_validate() {
        for variant in Variant::ALL {
            Board::starting(variant).validate().unwrap();
        }
    }

    #[test]
    fn starting_backgammon_layout() {
        let b = Board::starting(Variant::Backgammon);
        assert_eq!(b.checkers(Player::One, 24), 2);
        assert_eq!(b.checkers(Player::One, 13), 5);
        assert_eq!(b.checkers(Player::One, 8), 3);
        assert_eq!(b.checkers(Player::One, 6), 5);
        assert_eq!(b.checkers(Player::Two, 1), 2);
        assert_eq!(b.checkers(Player::Two, 12), 5);
        assert_eq!(b.checkers(Player::Two, 17), 3);
        assert_eq!(b.checkers(Player::Two, 19), 5);
        assert!(b.entered(Player::One));
        assert!(b.entered(Player::Two));
    }

    #[test]
    fn starting_acey_stacks() {
        let b = Board::starting(Variant::AceyDeucey);
        assert_eq!(b.checkers(Player::One, SPACE_HOME_ONE), 15);
        assert_eq!(b.checkers(Player::Two, SPACE_HOME_TWO), 15);
        assert!(!b.entered(Player::One));
        assert!(!b.entered(Player::Two));
    }

    #[test]
    fn checkers_ignores_the_wrong_side() {
        let b = Board::starting(Variant::Backgammon);
        assert_eq!(b.checkers(Player::Two, 24), 0);
        assert_eq!(b.checkers(Player::One, 1), 0);
        assert_eq!(b.checkers(Player::One, SPACE_BAR_TWO), 0);
        assert_eq!(b.checkers(Player::Two, SPACE_HOME_ONE), 0);
    }

    #[test]
    fn bar_counts_are_per_player() {
        let b = Board::starting(Variant::Backgammon)
            .with(SPACE_BAR_ONE, 2)
            .with(SPACE_BAR_TWO, 3);
        assert_eq!(b.checkers(Player::One, SPACE_BAR_ONE), 2);
        assert_eq!(b.checkers(Player::Two, SPACE_BAR_TWO), 3);
        assert_eq!(b.checkers(Player::Two, SPACE_BAR_ONE), 0);
        assert_eq!(b.checkers(Player::One, SPACE_BAR_TWO), 0);
    }

    #[test]
    fn with_roll_doubles_fill_all_slots() {
        let b = Board::starting(Variant::Backgammon).with_roll(4, 4, 0);
        assert_eq!(b.dice(), [4, 4, 4, 4]);
    }

    #[test]
    fn with_roll_non_double() {
        let b = Board::starting(Variant::Backgammon).with_roll(6, 5, 0);
        assert_eq!(b.dice(), [6, 5, 0, 0]);
    }

    #[test]
    fn with_roll_tabula_third_die() {
        let b = Board::starting(Variant::Tabula).with_roll(6, 5, 2);
        assert_eq!(b.dice(), [6, 5, 2, 0]);
    }

    #[test]
    fn pretty_print() {
        let output = format!("{}", Board::starting(Variant::Backgammon).pretty());
        assert!(output.contains("home 0/0"));
        assert!(output.contains("(backgammon)"));
    }

    #[test]
    fn validate_rejects_bad_boards() {
        let b = Board::starting(Variant::Backgammon).with(SPACE_ROLL1, 7);
        assert!(matches!(b.validate(), Err(BoardError::InvalidDie { .. })));

        let b = Board::starting(Variant::Backgammon).with(24, 1);
        assert!(matches!(
            b.validate(),
            Err(BoardError::WrongCheckerCount { .. })
        ));

        let b = Board::starting(Variant::Backgammon).with(SPACE_VARIANT, 9);
        assert!(matches!(
            b.validate(),
            Err(BoardError::UnknownVariant { .. })
        ));
    }
}
