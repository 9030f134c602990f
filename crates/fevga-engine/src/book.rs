//! First-roll opening book for standard Backgammon.

use fevga_core::{Board, CheckerMove, Play, Variant, SPACE_ROLL1, SPACE_ROLL2};

/// Preferred reply for each opening roll, keyed by the sorted dice pair
/// (high die first). Doubles never occur on the opening roll.
const OPENINGS: [((i8, i8), [(usize, usize); 2]); 15] = [
    ((2, 1), [(13, 11), (24, 23)]),
    ((3, 1), [(8, 5), (6, 5)]),
    ((3, 2), [(24, 21), (13, 11)]),
    ((4, 1), [(24, 23), (13, 9)]),
    ((4, 2), [(8, 4), (6, 4)]),
    ((4, 3), [(24, 20), (13, 10)]),
    ((5, 1), [(24, 23), (13, 8)]),
    ((5, 2), [(13, 11), (13, 8)]),
    ((5, 3), [(8, 3), (6, 3)]),
    ((5, 4), [(24, 20), (13, 8)]),
    ((6, 1), [(13, 7), (8, 7)]),
    ((6, 2), [(24, 18), (13, 11)]),
    ((6, 3), [(24, 18), (13, 10)]),
    ((6, 4), [(24, 18), (13, 9)]),
    ((6, 5), [(24, 18), (18, 13)]),
];

/// The book play for `board`, when it is the canonical Backgammon
/// opening position with an untouched non-double roll.
pub(crate) fn opening_play(board: &Board) -> Option<Play> {
    if board.variant() != Variant::Backgammon || !is_opening(board) {
        return None;
    }
    let (roll1, roll2) = (board[SPACE_ROLL1], board[SPACE_ROLL2]);
    let (high, low) = if roll1 >= roll2 { (roll1, roll2) } else { (roll2, roll1) };
    let (_, moves) = OPENINGS.iter().find(|&&((h, l), _)| h == high && l == low)?;
    let moves: Vec<CheckerMove> = moves
        .iter()
        .map(|&(from, to)| CheckerMove::new(from, to))
        .collect();
    Some(Play::from_moves(&moves))
}

/// Whether the checker slots match the Backgammon starting layout.
fn is_opening(board: &Board) -> bool {
    let start = Board::starting(Variant::Backgammon);
    (0..28).all(|space| board[space] == start[space])
}

#[cfg(test)]
mod tests {
    use super::*;
    use fevga_core::Player;

    #[test]
    fn every_roll_has_an_entry() {
        let start = Board::starting(Variant::Backgammon);
        for high in 2..=6i8 {
            for low in 1..high {
                let play = opening_play(&start.with_roll(high, low, 0))
                    .unwrap_or_else(|| panic!("no book entry for {high}-{low}"));
                assert_eq!(play.len(), 2);
            }
        }
    }

    #[test]
    fn dice_order_does_not_matter() {
        let start = Board::starting(Variant::Backgammon);
        let a = opening_play(&start.with_roll(3, 1, 0)).unwrap();
        let b = opening_play(&start.with_roll(1, 3, 0)).unwrap();
        assert_eq!(a, b);
        assert!(a.equivalent(&Play::from_moves(&[
            CheckerMove::new(8, 5),
            CheckerMove::new(6, 5),
        ])));
    }

    #[test]
    fn only_the_untouched_opening_matches() {
        let start = Board::starting(Variant::Backgammon).with_roll(6, 5, 0);
        assert!(opening_play(&start).is_some());
        let moved = start.move_checker(24, 23, Player::One);
        assert!(opening_play(&moved).is_none());
        let acey = Board::starting(Variant::AceyDeucey).with_roll(6, 5, 0);
        assert!(opening_play(&acey).is_none());
    }

    #[test]
    fn book_entries_are_legal_plays() {
        let start = Board::starting(Variant::Backgammon);
        for high in 2..=6i8 {
            for low in 1..high {
                let board = start.with_roll(high, low, 0);
                let play = opening_play(&board).unwrap();
                let (plays, _) = board.available(Player::One);
                assert!(
                    plays.iter().any(|p| p.equivalent(&play)),
                    "book play {play} for {high}-{low} is not generated"
                );
            }
        }
    }
}
