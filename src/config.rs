//! Engine configuration

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Immutable search configuration, broadcast to every worker at the start
/// of a search.
///
/// The alliance structure (A with C against B with D) is part of the game
/// itself and lives on [`crate::board::Color`]; everything tunable is here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Board side length
    pub board_size: usize,
    /// Wall-clock budget for one search request, in milliseconds
    pub ai_search_time_ms: u64,
    /// Iterative-deepening depth cap
    pub ai_max_depth: u8,
    /// Extra plies of conversion-only search below depth 0
    pub q_search_max_depth: u8,
    /// How many top-scored singletons feed double-move pairing
    pub candidate_singles_limit: usize,
    /// Material weight per piece
    pub piece_value: i32,
    /// Ordering bonus per adjacent enemy piece
    pub contact_bonus: i32,
    /// Weight of squared component extent in the evaluation
    pub extent_bonus_multiplier: i32,
    /// Ordering penalty for placing into a corner
    pub corner_placement_penalty: i32,
    /// Evaluation penalty per occupied corner
    pub static_corner_penalty: i32,
    /// Terminal score magnitude; larger than any non-terminal evaluation
    pub win_score: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            board_size: 11,
            ai_search_time_ms: 3000,
            ai_max_depth: 24,
            q_search_max_depth: 2,
            candidate_singles_limit: 30,
            piece_value: 100,
            contact_bonus: 5,
            extent_bonus_multiplier: 5,
            corner_placement_penalty: 200,
            static_corner_penalty: 50,
            win_score: 100_000,
        }
    }
}

impl SearchConfig {
    /// Config for a given board size, other settings at their defaults
    #[must_use]
    pub fn with_board_size(board_size: usize) -> Self {
        Self {
            board_size,
            ..Default::default()
        }
    }

    /// Set the time budget
    #[must_use]
    pub fn with_time_ms(mut self, ms: u64) -> Self {
        self.ai_search_time_ms = ms;
        self
    }

    /// Set the depth cap
    #[must_use]
    pub fn with_max_depth(mut self, depth: u8) -> Self {
        self.ai_max_depth = depth;
        self
    }

    /// Reject configurations the engine cannot search
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.board_size < 3 {
            return Err(EngineError::InvalidConfig(format!(
                "board_size must be at least 3, got {}",
                self.board_size
            )));
        }
        if self.board_size > u8::MAX as usize {
            return Err(EngineError::InvalidConfig(format!(
                "board_size must fit coordinates in a byte, got {}",
                self.board_size
            )));
        }
        if self.ai_search_time_ms == 0 {
            return Err(EngineError::InvalidConfig(
                "ai_search_time_ms must be positive".into(),
            ));
        }
        if self.ai_max_depth == 0 {
            return Err(EngineError::InvalidConfig(
                "ai_max_depth must be positive".into(),
            ));
        }
        if self.win_score <= 0 {
            return Err(EngineError::InvalidConfig(
                "win_score must be positive".into(),
            ));
        }
        Ok(())
    }
}
