//! Single-threaded alpha-beta negamax search with iterative deepening.
//! See [`smp`] for the multi-threaded driver.

pub mod smp;

use crate::board::{evaluate, generate_legal_moves, is_king_threatened, Board};
use crate::config;
use crate::history::History;
use crate::moves::Move;
use crate::piece::Color;
use crate::timer::MoveTimer;
use crate::transposition::{Bound, TranspositionEntry, TranspositionTable};

#[cfg(feature = "logging")]
use log::{debug, trace, warn};

/// The outcome of a (possibly interrupted) search.
#[derive(Clone, Debug)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth_searched: u32,
    pub nodes: u64,
    pub timed_out: bool,
}

/// Depth sequence used by iterative deepening: 0, 1, then every other
/// odd depth (3, 5, 7, ...).
fn next_depth(previous: u32, iteration: u32) -> u32 {
    match iteration {
        0 => 0,
        1 => 1,
        _ => previous + 2,
    }
}

/// Runs iterative deepening up to `max_depth`, stopping early if
/// `timer` fires or is cancelled. Returns the best complete-iteration
/// result; if even depth 0 is interrupted, returns a `timed_out`
/// result with no move.
pub fn iteratively_deepen(
    board: &Board,
    side: Color,
    history: &mut History,
    tt: &mut TranspositionTable,
    max_depth: u32,
    timer: &MoveTimer,
) -> SearchResult {
    let mut best = SearchResult {
        best_move: None,
        score: 0,
        depth_searched: 0,
        nodes: 0,
        timed_out: false,
    };
    let mut nodes_total = 0u64;
    let mut depth = 0u32;
    let mut iteration = 0u32;

    loop {
        depth = next_depth(depth, iteration);
        if depth > max_depth {
            break;
        }
        let mut scratch = board.clone();
        let mut nodes_this_iteration = 0u64;
        let outcome = search(
            &mut scratch,
            side,
            depth as i32,
            -config::checkmate_score(0) - 1,
            config::checkmate_score(0) + 1,
            history,
            tt,
            timer,
            &mut nodes_this_iteration,
            0,
        );
        nodes_total += nodes_this_iteration;

        if timer.cancelled() {
            #[cfg(feature = "logging")]
            warn!("search cancelled before completing depth {depth}");
            best.timed_out = true;
            best.nodes = nodes_total;
            return best;
        }

        let (mv, score) = outcome;
        if let Some(mv) = mv {
            best = SearchResult {
                best_move: Some(mv),
                score,
                depth_searched: depth,
                nodes: nodes_total,
                timed_out: false,
            };
            #[cfg(feature = "logging")]
            debug!(
                "depth {depth} score {score} best {mv:?} nodes {nodes_total}"
            );
        } else if best.best_move.is_none() {
            // No legal moves at the root: checkmate or stalemate.
            best = SearchResult {
                best_move: None,
                score,
                depth_searched: depth,
                nodes: nodes_total,
                timed_out: false,
            };
        }

        if timer.triggered() {
            best.timed_out = best.best_move.is_none();
            best.nodes = nodes_total;
            return best;
        }
        if score_is_mate(best.score) {
            break;
        }
        iteration += 1;
    }

    best.nodes = nodes_total;
    best
}

fn score_is_mate(score: i32) -> bool {
    score.abs() > config::MAX_NON_CHECKMATE_SCORE
}

/// Negamax search rooted at `board` for `side`, returning the best
/// move and its score from `side`'s perspective, or `None` if the
/// timer interrupted the search before any move completed.
#[allow(clippy::too_many_arguments)]
fn search(
    board: &mut Board,
    side: Color,
    depth: i32,
    mut alpha: i32,
    beta: i32,
    history: &mut History,
    tt: &mut TranspositionTable,
    timer: &MoveTimer,
    nodes: &mut u64,
    ply: i32,
) -> (Option<Move>, i32) {
    *nodes += 1;

    if let Some(draw) = terminal_draw_score(board, history) {
        return (None, draw);
    }

    let moves = generate_legal_moves(board, side);
    if moves.is_empty() {
        let checkmated = is_king_threatened(board, side);
        let score = if checkmated {
            -config::checkmate_score(ply)
        } else {
            0
        };
        tt.store(TranspositionEntry {
            hash: board.hash(),
            score,
            depth_searched: depth as u32,
            bound: Bound::Exact,
            best_move: None,
            stored_for: side,
        });
        return (None, score);
    }

    if depth <= 0 {
        return (None, evaluate_leaf(board, side, ply));
    }

    let mut best_move = None;
    let mut best_score = i32::MIN;

    for (i, &mv) in moves.iter().enumerate() {
        if i % 64 == 0 && timer.should_stop() {
            return (best_move, best_score);
        }

        let undo = board.make_move(mv);
        history.push_tentative(board);

        let score = if let Some(entry) = tt.lookup(board.hash(), board.current_turn()) {
            if entry.depth_searched as i32 >= depth - 1 && matches!(entry.bound, Bound::Exact) {
                entry.score
            } else {
                -search_inner(
                    board,
                    board.current_turn(),
                    depth - 1,
                    -beta,
                    -alpha,
                    history,
                    tt,
                    timer,
                    nodes,
                    ply + 1,
                )
            }
        } else {
            -search_inner(
                board,
                board.current_turn(),
                depth - 1,
                -beta,
                -alpha,
                history,
                tt,
                timer,
                nodes,
                ply + 1,
            )
        };

        history.pop_tentative();
        board.take_back(mv, undo);

        tt.store(TranspositionEntry {
            hash: board.hash(),
            score,
            depth_searched: depth as u32,
            bound: Bound::Exact,
            best_move: Some(mv),
            stored_for: side,
        });

        if score > best_score {
            best_score = score;
            best_move = Some(mv);
        }
        if best_score > alpha {
            alpha = best_score;
        }
        if alpha >= beta {
            #[cfg(feature = "logging")]
            trace!("cutoff at ply {ply} after move {mv:?}");
            break;
        }

        if timer.cancelled() {
            break;
        }
    }

    (best_move, best_score)
}

#[allow(clippy::too_many_arguments)]
fn search_inner(
    board: &mut Board,
    side: Color,
    depth: i32,
    alpha: i32,
    beta: i32,
    history: &mut History,
    tt: &mut TranspositionTable,
    timer: &MoveTimer,
    nodes: &mut u64,
    ply: i32,
) -> i32 {
    search(board, side, depth, alpha, beta, history, tt, timer, nodes, ply).1
}

fn terminal_draw_score(board: &Board, history: &History) -> Option<i32> {
    if board.has_insufficient_material() {
        return Some(0);
    }
    // Reached already means the ordinary threshold (threefold / 100
    // half-moves without progress) was hit; Accepted means it was
    // declined once and bumped to the mandatory fivefold / 150
    // threshold. Either way a draw is available here, so search
    // scores the node as one.
    if history.threefold_repetition_status(board).is_some() {
        return Some(0);
    }
    if History::fifty_move_status(board).is_some() {
        return Some(0);
    }
    None
}

fn evaluate_leaf(board: &Board, side: Color, ply: i32) -> i32 {
    let opponent = side.opposite();
    let in_check = is_king_threatened(board, side);
    let opponent_in_check = is_king_threatened(board, opponent);
    evaluate(board, side, in_check && generate_legal_moves(board, side).is_empty(), opponent_in_check && generate_legal_moves(board, opponent).is_empty(), ply)
}
