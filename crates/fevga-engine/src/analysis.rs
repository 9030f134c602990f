//! Analysis records produced by the analyzer.

use std::fmt;

use fevga_core::{Board, Play, Player};

/// One evaluated candidate play (or opponent reply).
///
/// The static fields describe the position after the play from the
/// mover's perspective; the `opp_*` fields are expectations over the
/// opponent's best replies across all 21 dice outcomes.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Board after the play was applied.
    pub board: Board,
    /// The play this record evaluates.
    pub play: Play,
    /// Whether the position the play was made from was already a race.
    pub past: bool,
    /// Weighted pip count after the play.
    pub pips: i32,
    /// Blot exposure after the play.
    pub blots: i32,
    /// Pseudo-pips earned by hitting while composing the play.
    pub hits: i32,
    /// Static score of the play; lower is better.
    pub player_score: f64,
    /// Mean opponent pip count over the reply distribution.
    pub opp_pips: f64,
    /// Mean opponent blot exposure.
    pub opp_blots: f64,
    /// Mean opponent hit credit.
    pub opp_hits: f64,
    /// Mean opponent reply score.
    pub opp_score: f64,
    /// Combined score used for ranking; lower is better.
    pub score: f64,
    /// Which side this record evaluates.
    pub(crate) player: Player,
    /// Roll-probability weight when the record is an opponent reply
    /// (1 for doubles, 2 otherwise).
    pub(crate) chance: i8,
}

impl Analysis {
    pub(crate) fn new(board: Board, play: Play, past: bool, player: Player, chance: i8) -> Analysis {
        Analysis {
            board,
            play,
            past,
            pips: 0,
            blots: 0,
            hits: 0,
            player_score: 0.0,
            opp_pips: 0.0,
            opp_blots: 0.0,
            opp_hits: 0.0,
            opp_score: 0.0,
            score: 0.0,
            player,
            chance,
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "moves: {} score: {:.2} - score: {:.2} pips: {} blots: {} hits: {} / score: {:.2} pips: {:.2} blots: {:.2} hits: {:.2}",
            self.play,
            self.score,
            self.player_score,
            self.pips,
            self.blots,
            self.hits,
            self.opp_score,
            self.opp_pips,
            self.opp_blots,
            self.opp_hits,
        )
    }
}
