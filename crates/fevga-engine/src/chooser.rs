//! Doubles selection for Acey-Deucey.

use fevga_core::{Board, Player, Variant, SPACE_ROLL1, SPACE_ROLL4};

use crate::analysis::Analysis;
use crate::analyzer;

/// Pick the doubles value whose best resulting play scores lowest,
/// trying each value 1..6 with all four die slots filled. Only
/// Acey-Deucey offers the choice; other variants return 0.
///
/// Opponent replies are skipped: the choice ranks the player's own
/// static outcomes, which keeps the six trials cheap and deterministic.
pub fn choose_doubles(board: &Board) -> i8 {
    if board.variant() != Variant::AceyDeucey {
        return 0;
    }
    let mut best = 1i8;
    let mut best_score = f64::INFINITY;
    let mut results: Vec<Analysis> = Vec::new();
    for doubles in 1..=6i8 {
        let mut b = *board;
        for slot in SPACE_ROLL1..=SPACE_ROLL4 {
            b[slot] = doubles;
        }
        let (plays, _) = b.available(Player::One);
        analyzer::analyze(&b, &plays, true, &mut results);
        if let Some(top) = results.first() {
            if top.score < best_score {
                best_score = top.score;
                best = doubles;
            }
        }
    }
    best
}
