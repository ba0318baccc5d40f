//! Parallel AI engine for a four-player, two-team territorial board game
//!
//! Four colors (A, B, C, D) sit around an N×N board; A and C play against
//! B and D. A turn places one or two pieces, flanked enemy lines convert to
//! the mover's color, and a team wins by connecting opposite board edges
//! with a single color. The engine answers "given this position, what
//! should this seat play?" within a wall-clock budget.
//!
//! # Architecture
//!
//! - [`board`]: grid, pieces, regions and the near relation
//! - [`rules`]: placement legality, conversion resolution, win detection
//! - [`eval`]: static position evaluation
//! - [`movegen`]: candidate move enumeration and ordering
//! - [`search`]: Zobrist hashing, transposition table, negamax worker
//! - [`engine`]: worker pool, iterative deepening, time management
//!
//! # Quick Start
//!
//! ```
//! use quadra::{Board, SearchConfig, SearchEngine, SearchRequest};
//!
//! let mut engine = SearchEngine::with_pool_size(2);
//! let request = SearchRequest {
//!     board: Board::new(7),
//!     player_index: 0,
//!     turn_count: 1,
//!     config: SearchConfig::with_board_size(7)
//!         .with_time_ms(200)
//!         .with_max_depth(2),
//! };
//!
//! let reply = engine.search(&request).expect("valid configuration");
//! assert!(reply.best_move.is_some());
//! ```
//!
//! # Concurrency model
//!
//! The orchestrator and its workers share no mutable state. Configuration
//! and Zobrist tables are broadcast once per search; every job carries a
//! board snapshot by value and comes back as a single scalar. Each worker
//! keeps a private transposition table and history table that live for the
//! duration of one search.

pub mod board;
pub mod config;
pub mod engine;
pub mod error;
pub mod eval;
pub mod movegen;
pub mod rules;
pub mod search;

// Re-export commonly used types
pub use board::{Board, Color, Move, Piece, Pos, Posture, Team, COLORS};
pub use config::SearchConfig;
pub use engine::{SearchEngine, SearchReply, SearchRequest};
pub use error::EngineError;
