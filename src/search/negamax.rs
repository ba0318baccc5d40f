//! Negamax worker: alpha-beta with transposition table, quiescence and
//! principal-variation search
//!
//! A `Searcher` is the per-worker search state: one transposition table and
//! one history table, both surviving across jobs within a single
//! whole-engine search and reset when the next search begins. Scores are
//! always from the side to move's perspective, so a child's score is negated
//! on the way up.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::board::{Board, COLORS};
use crate::config::SearchConfig;
use crate::eval::evaluate;
use crate::movegen::{conversion_moves, ordered_moves};
use crate::rules::{apply_move, check_win};
use crate::search::tt::{EntryType, TranspositionTable, TtStats};
use crate::search::zobrist::ZobristTable;

/// Alpha-beta infinity; above any evaluation, safely negatable
pub const INF: i32 = 1_000_000;

/// Per-worker transposition table size
const TT_SIZE_MB: usize = 16;

/// Depth-limited negamax searcher with private caches.
pub struct Searcher {
    config: SearchConfig,
    zobrist: Arc<ZobristTable>,
    tt: TranspositionTable,
    history: Vec<u32>,
    nodes: u64,
    /// Cooperative cancellation: once the orchestrator gives up on a depth,
    /// in-flight and queued jobs bail out early. Their scores are discarded.
    stop: Arc<AtomicBool>,
}

impl Searcher {
    #[must_use]
    pub fn new(config: SearchConfig, zobrist: Arc<ZobristTable>, stop: Arc<AtomicBool>) -> Self {
        let cells = config.board_size * config.board_size;
        Self {
            tt: TranspositionTable::new(TT_SIZE_MB),
            history: vec![0; cells],
            nodes: 0,
            config,
            zobrist,
            stop,
        }
    }

    /// Reset for a new whole-engine search: fresh configuration, Zobrist
    /// tables and stop flag, cleared transposition and history tables.
    pub fn reset(
        &mut self,
        config: SearchConfig,
        zobrist: Arc<ZobristTable>,
        stop: Arc<AtomicBool>,
    ) {
        let cells = config.board_size * config.board_size;
        self.tt.clear();
        self.history.clear();
        self.history.resize(cells, 0);
        self.nodes = 0;
        self.config = config;
        self.zobrist = zobrist;
        self.stop = stop;
    }

    #[inline]
    fn stopped(&self) -> bool {
        // Check every 1024 nodes to keep the atomic load off the hot path
        self.nodes & 1023 == 0 && self.stop.load(Ordering::Relaxed)
    }

    /// Nodes visited since construction or the last reset
    #[must_use]
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Transposition table occupancy
    #[must_use]
    pub fn tt_stats(&self) -> TtStats {
        self.tt.stats()
    }

    /// Negamax with alpha-beta. Returns the score of `board` from the
    /// perspective of the player at `player_index`, who is to move.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        player_index: usize,
        turn_count: u32,
    ) -> i32 {
        self.nodes += 1;
        if self.stopped() {
            return 0;
        }

        let orig_alpha = alpha;
        let hash = self.zobrist.hash(board, player_index);
        if let Some(score) = self.tt.probe(hash, depth, alpha, beta) {
            return score;
        }

        if depth == 0 {
            return self.quiescence(
                board,
                self.config.q_search_max_depth,
                alpha,
                beta,
                player_index,
                turn_count,
            );
        }

        let color = COLORS[player_index];
        let sign = color.team().sign();
        if check_win(board).is_some() {
            return evaluate(board, &self.config) * sign;
        }

        let mut moves = ordered_moves(board, turn_count, color, &self.config);
        if moves.is_empty() {
            return evaluate(board, &self.config) * sign;
        }

        // Fold the history table into the ordering scores
        let size = self.config.board_size;
        for scored in &mut moves {
            let hist: u32 = scored
                .mv
                .placements
                .iter()
                .map(|p| self.history[p.to_index(size)])
                .sum();
            scored.score += hist as i32;
        }
        moves.sort_unstable_by(|a, b| b.score.cmp(&a.score));

        let next = (player_index + 1) % 4;
        let mut best = -INF;
        for (i, scored) in moves.iter().enumerate() {
            let (child, _) = apply_move(board, &scored.mv, color);
            let score = if i == 0 {
                // Principal variation: full window
                -self.search(&child, depth - 1, -beta, -alpha, next, turn_count + 1)
            } else {
                // Null-window scout; widen only when it lands inside the window
                let mut s =
                    -self.search(&child, depth - 1, -alpha - 1, -alpha, next, turn_count + 1);
                if s > alpha && s < beta {
                    s = -self.search(&child, depth - 1, -beta, -alpha, next, turn_count + 1);
                }
                s
            };

            best = best.max(score);
            alpha = alpha.max(best);
            if alpha >= beta {
                let weight = u32::from(depth) * u32::from(depth);
                for p in &scored.mv.placements {
                    self.history[p.to_index(size)] += weight;
                }
                break;
            }
        }

        let entry_type = if best <= orig_alpha {
            EntryType::UpperBound
        } else if best >= beta {
            EntryType::LowerBound
        } else {
            EntryType::Exact
        };
        self.tt.store(hash, depth, best, entry_type);
        best
    }

    /// Conversion-only extension below the horizon. Stand-pat cuts off
    /// quiet positions; only moves that flip enemy pieces are searched,
    /// highest conversion count first.
    fn quiescence(
        &mut self,
        board: &Board,
        depth: u8,
        mut alpha: i32,
        beta: i32,
        player_index: usize,
        turn_count: u32,
    ) -> i32 {
        self.nodes += 1;
        if self.stopped() {
            return 0;
        }

        let color = COLORS[player_index];
        let sign = color.team().sign();
        if check_win(board).is_some() {
            return evaluate(board, &self.config) * sign;
        }

        let stand_pat = evaluate(board, &self.config) * sign;
        if stand_pat >= beta {
            return beta;
        }
        alpha = alpha.max(stand_pat);
        if depth == 0 {
            return alpha;
        }

        let moves = conversion_moves(board, turn_count, color, &self.config);
        if moves.is_empty() {
            return alpha;
        }

        let next = (player_index + 1) % 4;
        for scored in &moves {
            let (child, _) = apply_move(board, &scored.mv, color);
            let score =
                -self.quiescence(&child, depth - 1, -beta, -alpha, next, turn_count + 1);
            alpha = alpha.max(score);
            if alpha >= beta {
                return beta;
            }
        }
        alpha
    }
}
