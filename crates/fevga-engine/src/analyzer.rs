//! Candidate-play analysis: a two-ply expected-value search.
//!
//! Every candidate play is scored by its own static evaluation plus the
//! expected static evaluation of the opponent's best reply, averaged
//! over all 21 distinct dice outcomes. Candidate, roll, and reply
//! evaluations all run as independent tasks on the worker pool; the
//! driver blocks on a wait group, then averages, applies the forced
//! overrides, and sorts.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::debug;

use fevga_core::{Board, Play, Player};

use crate::analysis::Analysis;
use crate::book;
use crate::eval::{self, SCORE_FORCED, WEIGHT_OPP_SCORE};
use crate::pool::{WaitGroup, WorkerPool};

/// The 21 distinct unordered outcomes of two dice with their probability
/// weight out of 36: doubles count once, everything else twice.
const ROLLS: [(i8, i8, i8); 21] = [
    (1, 1, 1),
    (2, 2, 1),
    (3, 3, 1),
    (4, 4, 1),
    (5, 5, 1),
    (6, 6, 1),
    (2, 1, 2),
    (3, 1, 2),
    (4, 1, 2),
    (5, 1, 2),
    (6, 1, 2),
    (3, 2, 2),
    (4, 2, 2),
    (5, 2, 2),
    (6, 2, 2),
    (4, 3, 2),
    (5, 3, 2),
    (6, 3, 2),
    (5, 4, 2),
    (6, 4, 2),
    (6, 5, 2),
];

/// Shared per-candidate state: the record a worker fills in and the
/// reply list the opponent tasks append to.
struct Candidate {
    analysis: Mutex<Analysis>,
    replies: Mutex<Vec<Analysis>>,
}

/// Analyze `plays` for player one on `board`, filling `out` with one
/// record per play, sorted ascending by score. Index 0 is the
/// recommended play. `skip_opponent` stops at the static evaluation
/// (used by the doubles chooser).
///
/// `out` is cleared first; passing the same buffer across calls reuses
/// its allocation.
pub fn analyze(board: &Board, plays: &[Play], skip_opponent: bool, out: &mut Vec<Analysis>) {
    out.clear();
    if plays.is_empty() {
        return;
    }

    let started = Instant::now();
    let positions = Arc::new(AtomicU64::new(0));
    let past = board.past();
    let pool = WorkerPool::global();
    let group = WaitGroup::new();

    let candidates: Vec<Arc<Candidate>> = plays
        .iter()
        .map(|&play| {
            Arc::new(Candidate {
                analysis: Mutex::new(Analysis::new(*board, play, past, Player::One, 1)),
                replies: Mutex::new(Vec::new()),
            })
        })
        .collect();

    for candidate in &candidates {
        group.add(1);
        let candidate = Arc::clone(candidate);
        let group = group.clone();
        let positions = Arc::clone(&positions);
        pool.submit(move || {
            analyze_candidate(&candidate, skip_opponent, &group, &positions);
            group.done();
        });
    }
    group.wait();

    for candidate in candidates {
        let mut a = candidate
            .analysis
            .lock()
            .expect("analysis mutex poisoned")
            .clone();
        let replies = candidate.replies.lock().expect("replies mutex poisoned");
        if !skip_opponent && !a.past && !replies.is_empty() {
            let n = replies.len() as f64;
            a.opp_pips = replies.iter().map(|r| r.pips as f64).sum::<f64>() / n;
            a.opp_blots = replies.iter().map(|r| r.blots as f64).sum::<f64>() / n;
            a.opp_hits = replies.iter().map(|r| r.hits as f64).sum::<f64>() / n;
            a.opp_score = replies.iter().map(|r| r.player_score).sum::<f64>() / n;
            a.score = a.player_score + WEIGHT_OPP_SCORE * a.opp_score;
        } else {
            a.score = a.player_score;
        }
        if !a.past && a.board.past() {
            // Break contact as soon as the race can be started.
            a.score = SCORE_FORCED;
        }
        out.push(a);
    }

    if let Some(book_play) = book::opening_play(board) {
        for a in out.iter_mut() {
            if a.play.equivalent(&book_play) {
                a.score = SCORE_FORCED;
            }
        }
    }

    out.sort_by(|a, b| a.score.total_cmp(&b.score));

    let evaluated = positions.load(Ordering::Relaxed);
    let elapsed = started.elapsed().as_secs_f64().max(1e-9);
    debug!(
        candidates = out.len(),
        positions = evaluated,
        pps = (evaluated as f64 / elapsed) as u64,
        "analysis complete"
    );
}

/// Apply a play, tallying the pseudo-pips of every blot hit on the way.
fn apply_play(board: Board, play: &Play, player: Player) -> (Board, i32) {
    let opponent = player.opponent();
    let mut b = board;
    let mut hits = 0;
    for mv in play.moves() {
        if b.checkers(opponent, mv.to()) == 1 {
            hits += eval::pseudo_pips(opponent, mv.to(), b.variant());
        }
        b = b
            .use_roll(mv.from(), mv.to(), player)
            .move_checker(mv.from(), mv.to(), player);
    }
    (b, hits)
}

/// Evaluate one candidate play and fan out the opponent's replies.
fn analyze_candidate(
    candidate: &Arc<Candidate>,
    skip_opponent: bool,
    group: &WaitGroup,
    positions: &Arc<AtomicU64>,
) {
    let (after, past) = {
        let mut a = candidate.analysis.lock().expect("analysis mutex poisoned");
        let (after, hits) = apply_play(a.board, &a.play, Player::One);
        a.board = after;
        eval::evaluate(&after, Player::One, hits, &mut a);
        (after, a.past)
    };
    positions.fetch_add(1, Ordering::Relaxed);
    if skip_opponent || past {
        return;
    }
    for (roll1, roll2, chance) in ROLLS {
        group.add(1);
        let candidate = Arc::clone(candidate);
        let group = group.clone();
        let positions = Arc::clone(positions);
        WorkerPool::global().submit(move || {
            analyze_roll(&candidate, after, roll1, roll2, chance, &group, &positions);
            group.done();
        });
    }
}

/// Generate and fan out the opponent's plays for one dice outcome. With
/// no legal reply the standstill position is recorded instead.
fn analyze_roll(
    candidate: &Arc<Candidate>,
    board: Board,
    roll1: i8,
    roll2: i8,
    chance: i8,
    group: &WaitGroup,
    positions: &Arc<AtomicU64>,
) {
    let b = board.with_roll(roll1, roll2, 0);
    let (plays, _) = b.available(Player::Two);
    if plays.is_empty() {
        let mut a = Analysis::new(b, Play::EMPTY, b.past(), Player::Two, chance);
        eval::evaluate(&b, Player::Two, 0, &mut a);
        positions.fetch_add(1, Ordering::Relaxed);
        record_reply(candidate, a);
        return;
    }
    for play in plays {
        group.add(1);
        let candidate = Arc::clone(candidate);
        let group = group.clone();
        let positions = Arc::clone(positions);
        WorkerPool::global().submit(move || {
            analyze_opponent_play(&candidate, b, play, chance, &positions);
            group.done();
        });
    }
}

/// Evaluate one opponent reply and record it into the candidate's reply
/// list, weighted by the roll probability.
fn analyze_opponent_play(
    candidate: &Arc<Candidate>,
    board: Board,
    play: Play,
    chance: i8,
    positions: &Arc<AtomicU64>,
) {
    let mut a = Analysis::new(board, play, board.past(), Player::Two, chance);
    let (after, hits) = apply_play(board, &play, Player::Two);
    a.board = after;
    eval::evaluate(&after, Player::Two, hits, &mut a);
    positions.fetch_add(1, Ordering::Relaxed);
    record_reply(candidate, a);
}

/// Push a reply record `chance` times so that a plain mean over the list
/// reproduces the probability-weighted expectation.
fn record_reply(candidate: &Arc<Candidate>, a: Analysis) {
    let mut replies = candidate.replies.lock().expect("replies mutex poisoned");
    for _ in 1..a.chance {
        replies.push(a.clone());
    }
    replies.push(a);
}
