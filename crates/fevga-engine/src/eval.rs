//! Static position evaluation.
//!
//! Scores are pseudo-pip counts: lower is better for the evaluated side.
//! The weights are design-tuned knobs, kept as named constants.

use fevga_core::{Board, Player, Variant, SPACE_BAR_TWO, SPACE_HOME_ONE, SPACE_HOME_TWO};

use crate::analysis::Analysis;

/// Weight applied to the blot exposure term.
pub const WEIGHT_BLOT: f64 = 1.1;
/// Weight applied to pips earned by hitting; hits lower the score.
pub const WEIGHT_HIT: f64 = -0.9;
/// Weight applied to the opponent's expected reply score.
pub const WEIGHT_OPP_SCORE: f64 = -1.5;
/// Score that forces a candidate to the front of the ranking, used for
/// race starts and opening-book plays.
pub const SCORE_FORCED: f64 = -1_000_000.0;

/// Penalty for checkers that still have to travel to the home quadrant
/// (or sit on the bar / in the starting stack).
const OUT_OF_QUADRANT: i32 = 24;

/// Divisor for blots the opponent can no longer reach.
const PAST_BLOT_DIVISOR: i32 = 4;

/// Remaining travel distance of a checker at `space`; 25 for checkers on
/// the bar or in the starting stack.
pub fn space_value(player: Player, space: usize, variant: Variant) -> i32 {
    if space == SPACE_HOME_ONE || space >= SPACE_HOME_TWO {
        return 25;
    }
    match (player, variant) {
        (Player::One, Variant::Tabula) | (Player::Two, _) => 25 - space as i32,
        (Player::One, _) => space as i32,
    }
}

/// Heuristic pseudo-distance of a checker at `space`. Distant checkers
/// are weighted exponentially so that escaping back checkers dominates
/// the evaluation.
pub fn pseudo_pips(player: Player, space: usize, variant: Variant) -> i32 {
    let sv = space_value(player, space, variant);
    let mut v = 6 + sv + 2 * (0.2 * sv as f64).exp() as i32;
    let outside = match (player, variant) {
        (_, Variant::Tabula) => space < 13 || space > 24,
        (Player::One, _) => space > 6 || space == SPACE_HOME_ONE,
        (Player::Two, _) => space < 19 || space == SPACE_BAR_TWO || space == SPACE_HOME_TWO,
    };
    if outside {
        v += OUT_OF_QUADRANT;
    }
    v
}

/// Weighted pip count of the player over the bar, the starting stack,
/// and the points.
pub fn pips(board: &Board, player: Player) -> i32 {
    let variant = board.variant();
    let bar = Board::bar_space(player);
    let mut total = board.checkers(player, bar) as i32 * pseudo_pips(player, bar, variant);
    if !board.entered(player) {
        let home = Board::home_space(player);
        total += board.checkers(player, home) as i32 * pseudo_pips(player, home, variant);
    }
    for space in 1..25 {
        total += board.checkers(player, space) as i32 * pseudo_pips(player, space, variant);
    }
    total
}

/// Exposure of the player's blots, weighted by the opponent's
/// pseudo-pips at each blot. Blots the opponent's rearmost checker has
/// already passed count a quarter.
pub fn blots(board: &Board, player: Player) -> i32 {
    let variant = board.variant();
    let opponent = player.opponent();
    let opponent_ascends = opponent == Player::Two || variant == Variant::Tabula;
    let rearmost = rearmost(board, opponent, opponent_ascends);
    let mut total = 0;
    for space in 1..25 {
        if board.checkers(player, space) != 1 {
            continue;
        }
        let mut v = pseudo_pips(opponent, space, variant);
        let reachable = if opponent_ascends {
            space as i32 > rearmost
        } else {
            (space as i32) < rearmost
        };
        if !reachable {
            v /= PAST_BLOT_DIVISOR;
        }
        total += v;
    }
    total
}

/// First point the player could still hit from, in its direction of
/// travel. Checkers on the bar or in the starting stack re-enter behind
/// everything, so the whole board stays reachable.
fn rearmost(board: &Board, player: Player, ascends: bool) -> i32 {
    if board.checkers(player, Board::bar_space(player)) != 0 || !board.entered(player) {
        return if ascends { 0 } else { 25 };
    }
    if ascends {
        (1..25)
            .find(|&space| board.checkers(player, space) != 0)
            .unwrap_or(25) as i32
    } else {
        (1..25)
            .rev()
            .find(|&space| board.checkers(player, space) != 0)
            .unwrap_or(0) as i32
    }
}

/// Blot weight, scaled up while the opponent builds a prime across the
/// 19..24 points that player one's back checkers must cross.
fn blot_weight(board: &Board, player: Player) -> f64 {
    if player != Player::One {
        return WEIGHT_BLOT;
    }
    let blocks = (19..25)
        .filter(|&space| board.checkers(Player::Two, space) > 1)
        .count();
    let priming = match blocks {
        6 => 1.5,
        5 => 1.25,
        4 => 1.1,
        _ => 1.0,
    };
    WEIGHT_BLOT * priming
}

/// Static evaluation of `board` for `player` into the analysis record.
/// Blot exposure and hit credit only matter while contact is possible.
pub(crate) fn evaluate(board: &Board, player: Player, hit_score: i32, a: &mut Analysis) {
    let pips = pips(board, player);
    let mut score = pips as f64;
    let mut blot_pips = 0;
    if !a.past {
        blot_pips = blots(board, player);
        score += blot_pips as f64 * blot_weight(board, player) + hit_score as f64 * WEIGHT_HIT;
    }
    a.pips = pips;
    a.blots = blot_pips;
    a.hits = hit_score;
    a.player_score = score;
}
