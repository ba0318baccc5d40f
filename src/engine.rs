//! Search orchestrator
//!
//! The engine owns a pool of worker threads, one negamax searcher each.
//! A search request is answered by iterative deepening: at every depth one
//! job per root move is dispatched round-robin across the pool, the replies
//! are aggregated only once the depth is complete, and the best root move is
//! promoted to the front of the list for the next depth. A deadline races
//! the deepening; on expiry the best move of the last fully completed depth
//! is returned and late replies are discarded.
//!
//! Workers share nothing: each receives the configuration and the Zobrist
//! tables in an init message and keeps its transposition and history tables
//! private. Boards cross the channel by value.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::{Board, Move, COLORS};
use crate::config::SearchConfig;
use crate::error::EngineError;
use crate::movegen::ordered_moves;
use crate::rules::apply_move;
use crate::search::{Searcher, ZobristTable, INF};

/// A search request: the position, the seat to move, the turn counter and
/// the configuration block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub board: Board,
    pub player_index: usize,
    pub turn_count: u32,
    #[serde(default)]
    pub config: SearchConfig,
}

/// The engine's answer. `best_move` is `None` when the position admits no
/// legal move (the caller treats that as a draw); `depth` is the deepest
/// fully completed iteration and is 0 when the deadline fired before depth 1
/// finished.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchReply {
    pub best_move: Option<Move>,
    pub score: i32,
    pub depth: u8,
    pub nodes: u64,
    pub elapsed_ms: u64,
}

/// Orchestrator-to-worker messages
enum WorkerRequest {
    /// Start of a new whole-engine search: adopt the configuration, Zobrist
    /// tables and stop flag, clear all cached state
    Init {
        config: SearchConfig,
        zobrist: Arc<ZobristTable>,
        stop: Arc<AtomicBool>,
    },
    /// Search one position and reply with its scalar score
    Job(SearchJob),
}

struct SearchJob {
    job_id: u64,
    board: Board,
    depth: u8,
    alpha: i32,
    beta: i32,
    player_index: usize,
    turn_count: u32,
}

/// Worker-to-orchestrator reply
struct WorkerReply {
    job_id: u64,
    score: i32,
    nodes: u64,
}

struct WorkerHandle {
    sender: Sender<WorkerRequest>,
    thread: JoinHandle<()>,
}

/// Parallel iterative-deepening search engine.
///
/// The pool is created once and reused across requests; a worker that died
/// (panicked or disconnected) is replaced at the start of the next request.
pub struct SearchEngine {
    workers: Vec<Option<WorkerHandle>>,
    reply_tx: Sender<WorkerReply>,
    reply_rx: Receiver<WorkerReply>,
    next_job_id: u64,
    /// Stop flag of the current search; replaced on every request
    abort: Arc<AtomicBool>,
}

impl SearchEngine {
    /// Engine with one worker per logical core.
    #[must_use]
    pub fn new() -> Self {
        let cores = thread::available_parallelism().map_or(1, |n| n.get());
        Self::with_pool_size(cores.max(1))
    }

    /// Engine with an explicit pool size (at least 1).
    #[must_use]
    pub fn with_pool_size(pool_size: usize) -> Self {
        let pool_size = pool_size.max(1);
        let (reply_tx, reply_rx) = channel();
        let workers = (0..pool_size)
            .map(|id| Some(spawn_worker(id, reply_tx.clone())))
            .collect();
        Self {
            workers,
            reply_tx,
            reply_rx,
            next_job_id: 0,
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Number of workers in the pool
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.workers.len()
    }

    /// Answer a search request.
    ///
    /// Validates the request, broadcasts the configuration to the pool and
    /// runs the deepening loop against the request's time budget.
    pub fn search(&mut self, request: &SearchRequest) -> Result<SearchReply, EngineError> {
        let started = Instant::now();
        let config = &request.config;
        config.validate()?;
        if request.board.size() != config.board_size {
            return Err(EngineError::InvalidRequest(format!(
                "board is {}x{} but the configuration says {}",
                request.board.size(),
                request.board.size(),
                config.board_size
            )));
        }
        if request.player_index >= COLORS.len() {
            return Err(EngineError::InvalidRequest(format!(
                "player_index must be 0..4, got {}",
                request.player_index
            )));
        }
        if request.turn_count == 0 {
            return Err(EngineError::InvalidRequest(
                "turn_count starts at 1".into(),
            ));
        }

        // Replies from an abandoned depth of the previous request may still
        // be queued; job ids are per-engine unique, so draining is safe
        while self.reply_rx.try_recv().is_ok() {}

        self.respawn_dead_workers();
        self.abort = Arc::new(AtomicBool::new(false));
        let zobrist = Arc::new(ZobristTable::new(config.board_size));
        self.broadcast_init(config, &zobrist);

        let color = COLORS[request.player_index];
        let mut root_moves = ordered_moves(&request.board, request.turn_count, color, config);
        if root_moves.is_empty() {
            info!("no legal move");
            return Ok(SearchReply {
                best_move: None,
                score: 0,
                depth: 0,
                nodes: 0,
                elapsed_ms: started.elapsed().as_millis() as u64,
            });
        }

        let deadline = started + Duration::from_millis(config.ai_search_time_ms);
        let next_player = (request.player_index + 1) % COLORS.len();
        let mut best: Option<(Move, i32, u8)> = None;
        let mut total_nodes = 0u64;

        info!(
            root_moves = root_moves.len(),
            workers = self.workers.len(),
            budget_ms = config.ai_search_time_ms,
            "search started"
        );

        for depth in 1..=config.ai_max_depth {
            if Instant::now() >= deadline {
                break;
            }

            // One job per root move, spread round-robin over the pool
            let mut pending: HashMap<u64, usize> = HashMap::new();
            let mut scores: Vec<Option<i32>> = vec![None; root_moves.len()];
            for (index, root) in root_moves.iter().enumerate() {
                let (child, _) = apply_move(&request.board, &root.mv, color);
                let job_id = self.next_job_id;
                self.next_job_id += 1;
                let job = SearchJob {
                    job_id,
                    board: child,
                    depth: depth - 1,
                    alpha: -INF,
                    beta: INF,
                    player_index: next_player,
                    turn_count: request.turn_count + 1,
                };
                if self.dispatch(index, job) {
                    pending.insert(job_id, index);
                } else {
                    // Worker gone: sentinel score keeps aggregation moving
                    scores[index] = Some(INF);
                }
            }

            let mut aborted = false;
            while !pending.is_empty() {
                let now = Instant::now();
                if now >= deadline {
                    aborted = true;
                    break;
                }
                match self.reply_rx.recv_timeout(deadline - now) {
                    Ok(reply) => {
                        if let Some(index) = pending.remove(&reply.job_id) {
                            scores[index] = Some(reply.score);
                            total_nodes += reply.nodes;
                        } else {
                            debug!(job_id = reply.job_id, "stale reply discarded");
                        }
                    }
                    Err(RecvTimeoutError::Timeout) => {
                        aborted = true;
                        break;
                    }
                    Err(RecvTimeoutError::Disconnected) => {
                        warn!("worker pool disconnected");
                        aborted = true;
                        break;
                    }
                }
            }

            if aborted {
                debug!(depth, "depth abandoned at deadline");
                self.abort.store(true, Ordering::Relaxed);
                break;
            }

            // Child scores are from the opponent's perspective; negating
            // them values each root move for the side to move. Ties keep
            // the earlier (better ordered) move.
            let mut best_index = 0;
            let mut best_value = -INF;
            for (index, score) in scores.iter().enumerate() {
                let value = -score.unwrap_or(INF);
                if value > best_value {
                    best_value = value;
                    best_index = index;
                }
            }

            best = Some((root_moves[best_index].mv.clone(), best_value, depth));
            debug!(depth, score = best_value, "depth complete");

            // Principal variation first on the next iteration
            let promoted = root_moves.remove(best_index);
            root_moves.insert(0, promoted);
        }

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let reply = match best {
            Some((mv, score, depth)) => {
                info!(depth, score, elapsed_ms, "search finished");
                SearchReply {
                    best_move: Some(mv),
                    score,
                    depth,
                    nodes: total_nodes,
                    elapsed_ms,
                }
            }
            None => {
                // Deadline fired before depth 1 completed; fall back to the
                // generator's first choice
                warn!(elapsed_ms, "no depth completed, using first root move");
                SearchReply {
                    best_move: Some(root_moves[0].mv.clone()),
                    score: root_moves[0].score,
                    depth: 0,
                    nodes: total_nodes,
                    elapsed_ms,
                }
            }
        };
        Ok(reply)
    }

    /// Send `job` to the worker owning `slot` (round-robin by root index).
    /// Returns false when that worker is gone.
    fn dispatch(&mut self, slot: usize, job: SearchJob) -> bool {
        let worker_index = slot % self.workers.len();
        let Some(worker) = &self.workers[worker_index] else {
            return false;
        };
        if worker.sender.send(WorkerRequest::Job(job)).is_err() {
            warn!(worker = worker_index, "worker died, job resolved as lost");
            self.workers[worker_index] = None;
            return false;
        }
        true
    }

    fn broadcast_init(&mut self, config: &SearchConfig, zobrist: &Arc<ZobristTable>) {
        for (index, slot) in self.workers.iter_mut().enumerate() {
            if let Some(worker) = slot {
                let init = WorkerRequest::Init {
                    config: config.clone(),
                    zobrist: Arc::clone(zobrist),
                    stop: Arc::clone(&self.abort),
                };
                if worker.sender.send(init).is_err() {
                    warn!(worker = index, "worker died during init");
                    *slot = None;
                }
            }
        }
        // A worker lost during init still gets replaced next request; jobs
        // routed to an empty slot resolve as lost
    }

    fn respawn_dead_workers(&mut self) {
        for (index, slot) in self.workers.iter_mut().enumerate() {
            let dead = match slot {
                None => true,
                Some(worker) => worker.thread.is_finished(),
            };
            if dead {
                info!(worker = index, "respawning worker");
                *slot = Some(spawn_worker(index, self.reply_tx.clone()));
            }
        }
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for SearchEngine {
    fn drop(&mut self) {
        // Cancel whatever is still queued, then close the request channels
        // so the workers drain and exit
        self.abort.store(true, Ordering::Relaxed);
        let handles: Vec<WorkerHandle> = self.workers.drain(..).flatten().collect();
        for handle in handles {
            drop(handle.sender);
            let _ = handle.thread.join();
        }
    }
}

fn spawn_worker(id: usize, reply_tx: Sender<WorkerReply>) -> WorkerHandle {
    let (sender, receiver) = channel::<WorkerRequest>();
    let thread = thread::Builder::new()
        .name(format!("quadra-worker-{id}"))
        .spawn(move || worker_loop(receiver, reply_tx))
        .expect("spawning a worker thread");
    WorkerHandle { sender, thread }
}

/// Worker thread body: adopt state on init, answer jobs until the engine
/// hangs up.
fn worker_loop(requests: Receiver<WorkerRequest>, replies: Sender<WorkerReply>) {
    let mut searcher: Option<Searcher> = None;
    let mut stop_flag: Option<Arc<AtomicBool>> = None;
    for request in requests {
        match request {
            WorkerRequest::Init {
                config,
                zobrist,
                stop,
            } => {
                stop_flag = Some(Arc::clone(&stop));
                match searcher.as_mut() {
                    Some(existing) => existing.reset(config, zobrist, stop),
                    None => searcher = Some(Searcher::new(config, zobrist, stop)),
                }
            }
            WorkerRequest::Job(job) => {
                let cancelled = stop_flag
                    .as_ref()
                    .is_some_and(|flag| flag.load(Ordering::Relaxed));
                let Some(searcher) = searcher.as_mut() else {
                    // Job before init: answer with the sentinel so the
                    // orchestrator never deadlocks
                    let _ = replies.send(WorkerReply {
                        job_id: job.job_id,
                        score: INF,
                        nodes: 0,
                    });
                    continue;
                };
                if cancelled {
                    // Backlog of an abandoned depth; the reply is discarded
                    // either way, so skip the search
                    if replies
                        .send(WorkerReply {
                            job_id: job.job_id,
                            score: INF,
                            nodes: 0,
                        })
                        .is_err()
                    {
                        break;
                    }
                    continue;
                }
                let nodes_before = searcher.nodes();
                let score = searcher.search(
                    &job.board,
                    job.depth,
                    job.alpha,
                    job.beta,
                    job.player_index,
                    job.turn_count,
                );
                let reply = WorkerReply {
                    job_id: job.job_id,
                    score,
                    nodes: searcher.nodes() - nodes_before,
                };
                if replies.send(reply).is_err() {
                    break;
                }
            }
        }
    }
}
