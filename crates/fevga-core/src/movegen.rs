//! Legal play generation.

use crate::board::Board;
use crate::play::{CheckerMove, Play};
use crate::player::Player;
use crate::variant::Variant;

impl Board {
    /// All legal single moves for the player under the current dice.
    ///
    /// Checkers on the bar must re-enter before anything else moves. In
    /// Acey-Deucey and Tabula an unentered player may also bring checkers
    /// in from the starting stack.
    pub fn single_moves(&self, player: Player) -> Vec<CheckerMove> {
        let mut moves = Vec::new();
        let variant = self.variant();
        let opponent = player.opponent();
        let home = Board::home_space(player);
        let opponent_home = Board::home_space(opponent);
        let bar = Board::bar_space(player);
        let opponent_bar = Board::bar_space(opponent);
        let may_bear_off = self.may_bear_off(player);
        let on_bar = self.checkers(player, bar) != 0;

        // Entry from the starting stack. The bar still takes precedence.
        if variant.enters_from_home()
            && !self.entered(player)
            && !on_bar
            && self.checkers(player, home) != 0
        {
            for to in 1..=24 {
                if self.checkers(opponent, to) > 1 {
                    continue;
                }
                if self.have_roll(home, to, player) {
                    moves.push(CheckerMove::new(home, to));
                }
            }
        }

        let descending = player == Player::One && variant != Variant::Tabula;
        for from in 1..28 {
            if from == home || from == opponent_home || from == opponent_bar {
                continue;
            }
            if self.checkers(player, from) == 0 || (on_bar && from != bar) {
                continue;
            }
            if descending {
                for to in 0..from {
                    if to == opponent_home || (to == home && !may_bear_off) {
                        continue;
                    }
                    if self.checkers(opponent, to) > 1 {
                        continue;
                    }
                    if self.have_roll(from, to, player) {
                        moves.push(CheckerMove::new(from, to));
                    }
                }
            } else {
                let start = if from == bar { 1 } else { from + 1 };
                for to in start..=24 {
                    if self.checkers(opponent, to) > 1 {
                        continue;
                    }
                    if self.have_roll(from, to, player) {
                        moves.push(CheckerMove::new(from, to));
                    }
                }
                // Wrapping into the tray (player two, or player one in
                // Tabula, whose tray sits behind slot 24).
                if may_bear_off && from <= 24 && self.have_roll(from, home, player) {
                    moves.push(CheckerMove::new(from, home));
                }
            }
        }
        moves
    }

    /// All distinct legal plays for the player, with the board each play
    /// leads to. Plays are composed depth-first up to four moves, only
    /// maximal-length plays are kept (as many pips as possible must be
    /// played), a lone playable move must spend the bigger die, and
    /// permutation-equivalent plays appear once.
    pub fn available(&self, player: Player) -> (Vec<Play>, Vec<Board>) {
        let mut plays = Vec::new();
        let mut boards = Vec::new();
        let mut prefix = Play::EMPTY;
        self.expand(player, &mut prefix, &mut plays, &mut boards);

        let max_len = plays.iter().map(Play::len).max().unwrap_or(0);
        let mut kept_plays = Vec::with_capacity(plays.len());
        let mut kept_boards = Vec::with_capacity(plays.len());
        if max_len == 1 {
            let spent: Vec<i8> = boards.iter().map(|b| self.die_spent(b)).collect();
            let best = spent.iter().copied().max().unwrap_or(0);
            for ((play, board), die) in plays.iter().zip(&boards).zip(&spent) {
                if *die == best {
                    kept_plays.push(*play);
                    kept_boards.push(*board);
                }
            }
        } else {
            for (play, board) in plays.iter().zip(&boards) {
                if play.len() == max_len {
                    kept_plays.push(*play);
                    kept_boards.push(*board);
                }
            }
        }
        (kept_plays, kept_boards)
    }

    fn expand(
        &self,
        player: Player,
        prefix: &mut Play,
        plays: &mut Vec<Play>,
        boards: &mut Vec<Board>,
    ) {
        let singles = if prefix.len() == 4 {
            Vec::new()
        } else {
            self.single_moves(player)
        };
        if singles.is_empty() {
            if !prefix.is_empty() && !plays.iter().any(|p| p.equivalent(prefix)) {
                plays.push(*prefix);
                boards.push(*self);
            }
            return;
        }
        for mv in singles {
            let next = self
                .use_roll(mv.from(), mv.to(), player)
                .move_checker(mv.from(), mv.to(), player);
            prefix.push(mv);
            next.expand(player, prefix, plays, boards);
            prefix.pop();
        }
    }

    /// Total pip value of the dice spent between this board and `after`.
    fn die_spent(&self, after: &Board) -> i8 {
        let sum = |b: &Board| b.dice().iter().map(|&d| d as i32).sum::<i32>();
        (sum(self) - sum(after)) as i8
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{
        BOARD_SPACES, SPACE_BAR_ONE, SPACE_ENTERED_ONE, SPACE_ENTERED_TWO, SPACE_HOME_ONE,
        SPACE_HOME_TWO, SPACE_VARIANT,
    };

    fn backgammon_with_roll(roll1: i8, roll2: i8) -> Board {
        Board::starting(Variant::Backgammon).with_roll(roll1, roll2, 0)
    }

    fn assert_no_equivalent_pair(plays: &[Play]) {
        for i in 0..plays.len() {
            for j in (i + 1)..plays.len() {
                assert!(
                    !plays[i].equivalent(&plays[j]),
                    "plays {} and {} are permutations of each other",
                    plays[i],
                    plays[j]
                );
            }
        }
    }

    fn assert_replayable(board: &Board, player: Player, plays: &[Play], boards: &[Board]) {
        assert_eq!(plays.len(), boards.len());
        for (play, expected) in plays.iter().zip(boards) {
            let mut b = *board;
            for mv in play.moves() {
                b = b
                    .use_roll(mv.from(), mv.to(), player)
                    .move_checker(mv.from(), mv.to(), player);
            }
            assert_eq!(&b, expected, "replaying {play} diverged from the companion board");
        }
    }

    #[test]
    fn opening_three_one() {
        let board = backgammon_with_roll(3, 1);
        let (plays, boards) = board.available(Player::One);
        assert!(!plays.is_empty());
        assert!(plays.iter().all(|p| p.len() == 2), "both dice are playable");
        assert_no_equivalent_pair(&plays);
        assert_replayable(&board, Player::One, &plays, &boards);

        let golden = Play::from_moves(&[CheckerMove::new(8, 5), CheckerMove::new(6, 5)]);
        assert!(
            plays.iter().any(|p| p.equivalent(&golden)),
            "the 5-point play must be among the candidates"
        );
    }

    #[test]
    fn opening_doubles_play_four_moves() {
        let board = backgammon_with_roll(3, 3);
        let (plays, boards) = board.available(Player::One);
        assert!(!plays.is_empty());
        assert!(plays.iter().all(|p| p.len() == 4));
        assert_no_equivalent_pair(&plays);
        assert_replayable(&board, Player::One, &plays, &boards);
    }

    #[test]
    fn bar_checkers_move_first() {
        let board = backgammon_with_roll(6, 2)
            .with(24, 1)
            .with(SPACE_BAR_ONE, 1);
        let (plays, _) = board.available(Player::One);
        assert!(!plays.is_empty());
        for play in &plays {
            assert_eq!(
                play.moves()[0].from(),
                SPACE_BAR_ONE,
                "play {play} does not start from the bar"
            );
        }
    }

    #[test]
    fn bear_off_pair_is_a_single_unique_play() {
        let mut raw = [0i8; BOARD_SPACES];
        raw[SPACE_HOME_ONE] = 11;
        raw[2] = 2;
        raw[3] = 1;
        raw[4] = 1;
        raw[SPACE_HOME_TWO] = -15;
        raw[SPACE_ENTERED_ONE] = 1;
        raw[SPACE_ENTERED_TWO] = 1;
        let board = Board::from_slots(raw).with_roll(3, 3, 0).with(30, 0).with(31, 0);
        let (plays, boards) = board.available(Player::One);
        assert_eq!(plays.len(), 1, "expected one unique play, got {plays:?}");
        let golden = Play::from_moves(&[
            CheckerMove::new(3, SPACE_HOME_ONE),
            CheckerMove::new(4, 1),
        ]);
        assert!(plays[0].equivalent(&golden), "got {}", plays[0]);
        assert_replayable(&board, Player::One, &plays, &boards);
    }

    #[test]
    fn lone_move_spends_the_bigger_die() {
        let mut raw = [0i8; BOARD_SPACES];
        raw[SPACE_HOME_ONE] = 14;
        raw[24] = 1;
        raw[17] = -3;
        raw[12] = -5;
        raw[10] = -5;
        raw[1] = -2;
        raw[SPACE_ENTERED_ONE] = 1;
        raw[SPACE_ENTERED_TWO] = 1;
        let board = Board::from_slots(raw).with_roll(5, 2, 0);
        let (plays, _) = board.available(Player::One);
        assert_eq!(plays.len(), 1, "got {plays:?}");
        assert_eq!(
            plays[0],
            Play::from_moves(&[CheckerMove::new(24, 19)]),
            "the five must be played, not the two"
        );
    }

    #[test]
    fn acey_entry_plays() {
        let board = Board::starting(Variant::AceyDeucey).with_roll(1, 2, 0);
        let (plays, boards) = board.available(Player::One);
        assert_eq!(plays.len(), 3, "got {plays:?}");
        assert!(plays.iter().all(|p| p.len() == 2));
        assert!(plays.iter().all(|p| p.moves()[0].from() == SPACE_HOME_ONE));
        assert_no_equivalent_pair(&plays);
        assert_replayable(&board, Player::One, &plays, &boards);
    }

    #[test]
    fn tabula_blocks_home_quadrant_until_entered() {
        let mut raw = [0i8; BOARD_SPACES];
        raw[SPACE_HOME_ONE] = 1;
        raw[12] = 14;
        raw[SPACE_HOME_TWO] = -15;
        raw[SPACE_VARIANT] = Variant::Tabula.tag();
        let board = Board::from_slots(raw).with_roll(1, 2, 0);
        assert!(
            !board.have_roll(12, 13, Player::One),
            "the home quadrant is closed before entering"
        );
        let entered = board
            .use_roll(SPACE_HOME_ONE, 2, Player::One)
            .move_checker(SPACE_HOME_ONE, 2, Player::One);
        assert!(entered.entered(Player::One));
        assert!(entered.have_roll(12, 13, Player::One));
    }

    #[test]
    fn tabula_wraps_into_the_tray() {
        let mut raw = [0i8; BOARD_SPACES];
        raw[22] = 15;
        raw[SPACE_HOME_TWO] = -15;
        raw[SPACE_ENTERED_ONE] = 1;
        raw[SPACE_ENTERED_TWO] = 1;
        raw[SPACE_VARIANT] = Variant::Tabula.tag();
        let board = Board::from_slots(raw).with_roll(3, 4, 0);
        let singles = board.single_moves(Player::One);
        assert!(
            singles.contains(&CheckerMove::new(22, SPACE_HOME_ONE)),
            "25 - 22 = 3 bears off, got {singles:?}"
        );
        assert!(!singles.contains(&CheckerMove::new(22, 24)), "no die shows 2");
    }

    #[test]
    fn no_moves_on_a_closed_board() {
        // Player one is on the bar and every entry point is blocked.
        let mut raw = [0i8; BOARD_SPACES];
        raw[SPACE_BAR_ONE] = 1;
        raw[SPACE_HOME_ONE] = 14;
        for space in 19..=24 {
            raw[space] = -2;
        }
        raw[12] = -3;
        raw[SPACE_ENTERED_ONE] = 1;
        raw[SPACE_ENTERED_TWO] = 1;
        let board = Board::from_slots(raw).with_roll(6, 5, 0);
        let (plays, boards) = board.available(Player::One);
        assert!(plays.is_empty());
        assert!(boards.is_empty());
    }

    #[test]
    fn forced_partial_play_keeps_the_playable_move() {
        // 6-6 with only one six playable: the play has a single move.
        let mut raw = [0i8; BOARD_SPACES];
        raw[SPACE_HOME_ONE] = 14;
        raw[24] = 1;
        raw[18] = 0;
        raw[12] = -2;
        raw[SPACE_HOME_TWO] = -13;
        raw[SPACE_ENTERED_ONE] = 1;
        raw[SPACE_ENTERED_TWO] = 1;
        let board = Board::from_slots(raw).with_roll(6, 6, 0);
        let (plays, _) = board.available(Player::One);
        assert_eq!(plays.len(), 1, "got {plays:?}");
        assert_eq!(plays[0], Play::from_moves(&[CheckerMove::new(24, 18)]));
    }
}
