//! Board mutation primitives: moving checkers and consuming dice.

use tracing::error;

use crate::board::{
    Board, SPACE_BAR_ONE, SPACE_BAR_TWO, SPACE_HOME_ONE, SPACE_HOME_TWO, SPACE_ROLL1, SPACE_ROLL4,
};
use crate::player::Player;
use crate::variant::Variant;

/// Storage delta for adding one of the player's checkers at a slot.
/// Player two's bar counts up while its points and home tray count down.
fn unit(player: Player, space: usize) -> i8 {
    match player {
        Player::One => 1,
        Player::Two => {
            if space == SPACE_BAR_TWO {
                1
            } else {
                -1
            }
        }
    }
}

impl Board {
    /// Move one of the player's checkers from `from` to `to`, sending a
    /// lone opposing blot at `to` to the opponent's bar. Sets the entered
    /// flag once the entry stack empties (Acey-Deucey/Tabula).
    ///
    /// # Panics
    ///
    /// Panics if `from` holds no checker of the player or `to` is blocked
    /// by two or more opposing checkers. The move generator never emits
    /// such moves; reaching this is a corrupt board.
    pub fn move_checker(mut self, from: usize, to: usize, player: Player) -> Board {
        if self.checkers(player, from) == 0 {
            error!(board = %self, from, to, %player, "illegal move: no checker at from space");
            panic!("illegal move: no checker at space {from} for player {player}");
        }
        let opponent = player.opponent();
        match self.checkers(opponent, to) {
            0 => {}
            1 => {
                // A hit: the blot restarts from the opponent's bar.
                self[to] = 0;
                let bar = Board::bar_space(opponent);
                self[bar] += unit(opponent, bar);
            }
            _ => {
                error!(board = %self, from, to, %player, "illegal move: destination is blocked");
                panic!("illegal move: space {to} is blocked for player {player}");
            }
        }
        self[from] -= unit(player, from);
        self[to] += unit(player, to);
        let home = Board::home_space(player);
        if self.variant().enters_from_home() && from == home && self.checkers(player, home) == 0 {
            self[Board::entered_space(player)] = 1;
        }
        self
    }

    /// Consume the die that plays a move from `from` to `to`: the first
    /// slot matching the pip distance exactly, or — bearing off in
    /// Backgammon with nothing left behind the move — the first larger
    /// die.
    ///
    /// # Panics
    ///
    /// Panics if the move has no pip distance or no unused die fits.
    pub fn use_roll(mut self, from: usize, to: usize, player: Player) -> Board {
        let delta = self.space_diff(player, from, to);
        if delta == 0 {
            error!(board = %self, from, to, %player, "use_roll: move has no pip distance");
            panic!("use_roll: move {from}->{to} has no pip distance");
        }
        let allow_greater = self.allow_greater(player, delta);
        let slot = (SPACE_ROLL1..=SPACE_ROLL4).find(|&slot| {
            let die = self[slot];
            if allow_greater { die >= delta } else { die == delta }
        });
        match slot {
            Some(slot) => self[slot] = 0,
            None => {
                error!(board = %self, from, to, %player, "use_roll: no unused die fits the move");
                panic!("use_roll: no unused die for move {from}->{to}");
            }
        }
        self
    }

    /// Whether an unused die can play a move from `from` to `to`. This is
    /// the non-panicking counterpart of [`Board::use_roll`], plus the
    /// Tabula restriction that the home quadrant is off limits until the
    /// player has entered.
    pub fn have_roll(&self, from: usize, to: usize, player: Player) -> bool {
        let delta = self.space_diff(player, from, to);
        if delta == 0 {
            return false;
        }
        if self.variant() == Variant::Tabula && !self.entered(player) && (13..=24).contains(&to) {
            return false;
        }
        let allow_greater = self.allow_greater(player, delta);
        self.dice()
            .iter()
            .any(|&die| if allow_greater { die >= delta } else { die == delta })
    }

    /// Whether a die larger than `delta` may be spent. Only Backgammon
    /// permits the bear-off overshoot, and only when no checker sits on a
    /// home point farther from the tray than the distance being played.
    fn allow_greater(&self, player: Player, delta: i8) -> bool {
        if self.variant() != Variant::Backgammon || !self.may_bear_off(player) {
            return false;
        }
        for value in (delta + 1)..=6 {
            let point = match player {
                Player::One => value as usize,
                Player::Two => 25 - value as usize,
            };
            if self.checkers(player, point) != 0 {
                return false;
            }
        }
        true
    }

    /// Variant-aware pip distance of a move, or 0 when the slot pair is
    /// not structurally a move (bar to bar, bar to home, a slot that is
    /// not the player's, out of range, ...).
    pub fn space_diff(&self, player: Player, from: usize, to: usize) -> i8 {
        if from > 27 || to > 27 {
            return 0;
        }
        if to == SPACE_BAR_ONE || to == SPACE_BAR_TWO {
            return 0;
        }
        let variant = self.variant();
        let entering = from == Board::bar_space(player)
            || (from == Board::home_space(player) && variant.enters_from_home());
        if from == SPACE_BAR_ONE || from == SPACE_BAR_TWO || from == SPACE_HOME_ONE || from == SPACE_HOME_TWO
        {
            if !entering || to == SPACE_HOME_ONE || to == SPACE_HOME_TWO {
                return 0;
            }
            // Re-entry from the bar and entry from the starting stack
            // measure the same way: from just beyond the entry edge.
            return match (player, variant) {
                (Player::One, Variant::Tabula) => to as i8,
                (Player::One, _) => 25 - to as i8,
                (Player::Two, _) => to as i8,
            };
        }
        if to == Board::home_space(player) {
            return match (player, variant) {
                (Player::One, Variant::Tabula) => 25 - from as i8,
                (Player::One, _) => from as i8,
                (Player::Two, _) => 25 - from as i8,
            };
        }
        if to == SPACE_HOME_ONE || to == SPACE_HOME_TWO {
            // The opponent's tray is never a destination.
            return 0;
        }
        (to as i8 - from as i8).abs()
    }

    /// Whether the player may start bearing off: entered, nothing on the
    /// bar, and every checker inside the home quadrant (1..6 or 19..24;
    /// 13..24 for both players in Tabula).
    pub fn may_bear_off(&self, player: Player) -> bool {
        if !self.entered(player) || self.checkers(player, Board::bar_space(player)) != 0 {
            return false;
        }
        if self.variant() == Variant::Tabula {
            return self.second_half(player);
        }
        let home = match player {
            Player::One => 1..=6,
            Player::Two => 19..=24,
        };
        (1..=24).all(|space| home.contains(&space) || self.checkers(player, space) == 0)
    }

    /// Whether the two sides can no longer make contact: bars empty, both
    /// sides entered, and the checkers have passed each other. Tabula
    /// positions never race (both players run the same track).
    pub fn past(&self) -> bool {
        if self.variant() == Variant::Tabula {
            return false;
        }
        if self[SPACE_BAR_ONE] != 0 || self[SPACE_BAR_TWO] != 0 {
            return false;
        }
        if !self.entered(Player::One) || !self.entered(Player::Two) {
            return false;
        }
        let mut one_rearmost = 0;
        let mut two_rearmost = 0;
        for space in 1..25 {
            let v = self[space];
            if v > 0 {
                one_rearmost = space;
            } else if v < 0 && two_rearmost == 0 {
                two_rearmost = space;
            }
        }
        one_rearmost < two_rearmost
    }

    /// Tabula: whether every checker of the player has reached the second
    /// half of the track (no checkers on points 1..12).
    pub fn second_half(&self, player: Player) -> bool {
        (1..=12).all(|space| self.checkers(player, space) == 0)
    }
}
