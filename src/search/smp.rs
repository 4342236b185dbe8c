//! Multi-threaded search.
//!
//! Each worker owns its own `Board`, `History`, and
//! `TranspositionTable`, deep-cloned from the position at the start of
//! the search -- nothing heavy is shared. The only shared state is the
//! [`MoveTimer`] and a mutex-guarded monotonically increasing depth
//! counter handed out to workers as they finish each iteration.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

#[cfg(feature = "logging")]
use log::debug;

use crate::board::Board;
use crate::config;
use crate::history::History;
use crate::piece::Color;
use crate::timer::MoveTimer;
use crate::transposition::TranspositionTable;

use super::{iteratively_deepen, SearchResult};

/// 32 MiB worker stack -- iterative deepening recurses deeply enough
/// to need headroom beyond the default thread stack.
const SEARCH_STACK_SIZE: usize = 32 * 1024 * 1024;

struct NextDepth {
    previous: u32,
    iteration: u32,
    max_depth: u32,
}

impl NextDepth {
    fn take(&mut self) -> Option<u32> {
        let depth = match self.iteration {
            0 => 0,
            1 => 1,
            _ => self.previous + 2,
        };
        if depth > self.max_depth {
            return None;
        }
        self.previous = depth;
        self.iteration += 1;
        Some(depth)
    }
}

/// Runs `num_threads` workers against `board`, each independently
/// iteratively deepening and pulling its next depth from a shared
/// counter, until `timer` fires or `max_depth` is exhausted by every
/// worker. Returns the result from the deepest completed iteration.
pub fn search_multi_threaded(
    board: &Board,
    side: Color,
    num_threads: usize,
    max_depth: u32,
    time_budget: Duration,
) -> SearchResult {
    let num_threads = num_threads.max(1);
    let timer = MoveTimer::new();
    let timer_thread = timer.start(time_budget);

    if num_threads == 1 {
        let mut history = History::new();
        let mut tt = TranspositionTable::new(config::MAX_TRANSPOSITIONS);
        let result = iteratively_deepen(board, side, &mut history, &mut tt, max_depth, &timer);
        timer.cancel();
        let _ = timer_thread.join();
        return result;
    }

    let next_depth = Arc::new(Mutex::new(NextDepth {
        previous: 0,
        iteration: 0,
        max_depth,
    }));
    let results: Arc<Mutex<Vec<SearchResult>>> = Arc::new(Mutex::new(Vec::with_capacity(num_threads)));

    thread::scope(|scope| {
        for worker_id in 0..num_threads {
            let board = board.clone();
            let timer = timer.clone();
            let next_depth = Arc::clone(&next_depth);
            let results = Arc::clone(&results);
            thread::Builder::new()
                .name(format!("search-{worker_id}"))
                .stack_size(SEARCH_STACK_SIZE)
                .spawn_scoped(scope, move || {
                    let mut history = History::new();
                    let mut tt = TranspositionTable::new(config::MAX_TRANSPOSITIONS);
                    loop {
                        if timer.should_stop() {
                            return;
                        }
                        let Some(depth) = next_depth.lock().take() else {
                            return;
                        };
                        let result =
                            iteratively_deepen(&board, side, &mut history, &mut tt, depth, &timer);
                        #[cfg(feature = "logging")]
                        debug!("worker {worker_id} completed depth {depth}");
                        if !result.timed_out {
                            results.lock().push(result);
                        }
                        if result.timed_out {
                            return;
                        }
                    }
                })
                .expect("failed to spawn search worker");
        }
    });

    timer.cancel();
    let _ = timer_thread.join();

    let mut results = results.lock().clone();
    results.sort_by_key(|r| r.depth_searched);
    results
        .pop()
        .unwrap_or(SearchResult {
            best_move: None,
            score: 0,
            depth_searched: 0,
            nodes: 0,
            timed_out: true,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_thread_path_matches_direct_call() {
        let board = Board::starting_position();
        let result = search_multi_threaded(&board, Color::White, 1, 1, Duration::from_secs(5));
        assert!(result.best_move.is_some());
    }

    #[test]
    fn multi_thread_search_returns_a_move() {
        let board = Board::starting_position();
        let result = search_multi_threaded(&board, Color::White, 2, 2, Duration::from_secs(5));
        assert!(result.best_move.is_some());
    }

    #[test]
    fn next_depth_counter_yields_0_1_3_5() {
        let mut nd = NextDepth {
            previous: 0,
            iteration: 0,
            max_depth: 10,
        };
        let seq: Vec<u32> = std::iter::from_fn(|| nd.take()).take(4).collect();
        assert_eq!(seq, vec![0, 1, 3, 5]);
    }
}
