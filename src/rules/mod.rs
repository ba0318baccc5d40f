//! Game rules for the four-player territory game
//!
//! This module implements the rule set:
//! - Placement legality (region hierarchy, near exclusion)
//! - Conversion resolution (flanked enemy lines recolored to the mover)
//! - Win detection (edge-to-edge connectivity through non-corner squares)

pub mod conversion;
pub mod placement;
pub mod win;

// Re-exports for convenient access
pub use conversion::{apply_move, conversions_from};
pub use placement::{is_valid_placement, legal_single_placements};
pub use win::{check_win, WinInfo};
