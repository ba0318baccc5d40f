//! Board representation for the four-player territory game

pub mod board;
pub mod region;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::Board;
pub use region::{near, Region, RegionMap};

use serde::{Deserialize, Serialize};

/// Default board side length
pub const DEFAULT_BOARD_SIZE: usize = 11;

/// Seat order around the table; turn order cycles through this array
pub const COLORS: [Color; 4] = [Color::A, Color::B, Color::C, Color::D];

/// Piece colors. A and C are partners, as are B and D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    A,
    B,
    C,
    D,
}

impl Color {
    /// Seat index of this color (A=0, B=1, C=2, D=3)
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Color::A => 0,
            Color::B => 1,
            Color::C => 2,
            Color::D => 3,
        }
    }

    /// Team partner of this color
    #[inline]
    pub fn ally(self) -> Color {
        match self {
            Color::A => Color::C,
            Color::B => Color::D,
            Color::C => Color::A,
            Color::D => Color::B,
        }
    }

    /// Team this color belongs to
    #[inline]
    pub fn team(self) -> Team {
        match self {
            Color::A | Color::C => Team::One,
            Color::B | Color::D => Team::Two,
        }
    }

    /// True when `other` belongs to the opposing team
    #[inline]
    pub fn is_enemy_of(self, other: Color) -> bool {
        self.team() != other.team()
    }
}

/// One of the two alliances: team 1 = {A, C}, team 2 = {B, D}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    One,
    Two,
}

impl Team {
    /// Evaluation sign convention: team 1 positive, team 2 negative
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Team::One => 1,
            Team::Two => -1,
        }
    }

    #[inline]
    pub fn opponent(self) -> Team {
        match self {
            Team::One => Team::Two,
            Team::Two => Team::One,
        }
    }
}

/// Piece posture.
///
/// A piece is `New` on the turn its owner placed it; it becomes `Old` when
/// that color's next turn begins. Only `Old` pieces can be converted along
/// a flanked line; a `New` piece blocks the scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Posture {
    New,
    Old,
}

/// A piece on the board. Pieces never move or disappear; conversion changes
/// only the color, never the posture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub color: Color,
    pub posture: Posture,
}

impl Piece {
    #[inline]
    pub fn new(color: Color, posture: Posture) -> Self {
        Self { color, posture }
    }
}

/// Position on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub row: u8,
    pub col: u8,
}

impl Pos {
    #[inline]
    pub fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Flat row-major index for a board of side `size`
    #[inline]
    pub fn to_index(self, size: usize) -> usize {
        self.row as usize * size + self.col as usize
    }

    #[inline]
    pub fn from_index(idx: usize, size: usize) -> Self {
        Self {
            row: (idx / size) as u8,
            col: (idx % size) as u8,
        }
    }

    #[inline]
    pub fn is_valid(row: i32, col: i32, size: usize) -> bool {
        row >= 0 && row < size as i32 && col >= 0 && col < size as i32
    }
}

impl PartialOrd for Pos {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pos {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }
}

/// A move: one or two placements applied atomically in a single turn.
///
/// Exactly one placement is made on the very first turn of the game; later
/// turns place two when at least two legal singletons exist. Placements of
/// one move are pairwise non-near.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub placements: Vec<Pos>,
}

impl Move {
    #[inline]
    pub fn single(p: Pos) -> Self {
        Self { placements: vec![p] }
    }

    #[inline]
    pub fn double(p1: Pos, p2: Pos) -> Self {
        Self {
            placements: vec![p1, p2],
        }
    }
}

/// The 8 compass directions used by conversion scans, neighbor checks and
/// connectivity
pub const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];
