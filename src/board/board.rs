//! Board grid with piece lifecycle helpers

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Color, Piece, Pos, Posture};

/// Game board: a flat row-major grid of optional pieces.
///
/// Boards are treated as immutable snapshots inside the search — applying a
/// move clones the board and the search never mutates its input. The only
/// mutators are the lifecycle steps used by move application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Option<Piece>>,
}

impl Board {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Piece at `pos`, if any
    #[inline]
    pub fn get(&self, pos: Pos) -> Option<Piece> {
        self.cells[pos.to_index(self.size)]
    }

    #[inline]
    pub fn set(&mut self, pos: Pos, piece: Piece) {
        self.cells[pos.to_index(self.size)] = Some(piece);
    }

    #[inline]
    pub fn is_empty_at(&self, pos: Pos) -> bool {
        self.cells[pos.to_index(self.size)].is_none()
    }

    /// Check if the whole board is empty
    #[inline]
    pub fn is_board_empty(&self) -> bool {
        self.cells.iter().all(|c| c.is_none())
    }

    /// Total pieces on board
    #[inline]
    pub fn piece_count(&self) -> u32 {
        self.cells.iter().filter(|c| c.is_some()).count() as u32
    }

    /// Iterate over all occupied squares
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.map(|piece| (Pos::from_index(idx, self.size), piece))
        })
    }

    /// Recolor the piece at `pos`, keeping its posture. No-op on empty cells.
    #[inline]
    pub fn recolor(&mut self, pos: Pos, color: Color) {
        if let Some(piece) = &mut self.cells[pos.to_index(self.size)] {
            piece.color = color;
        }
    }

    /// Age every `New` piece of `color` to `Old`.
    ///
    /// Runs at the moment a color's turn begins, so within that turn none of
    /// the mover's earlier pieces block or shield anything. Idempotent.
    pub fn age_new_pieces(&mut self, color: Color) {
        for cell in &mut self.cells {
            if let Some(piece) = cell {
                if piece.color == color && piece.posture == Posture::New {
                    piece.posture = Posture::Old;
                }
            }
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size as u8 {
            for col in 0..self.size as u8 {
                let ch = match self.get(Pos::new(row, col)) {
                    None => '.',
                    Some(piece) => {
                        let base = match piece.color {
                            Color::A => 'a',
                            Color::B => 'b',
                            Color::C => 'c',
                            Color::D => 'd',
                        };
                        // Uppercase marks a freshly placed piece
                        if piece.posture == Posture::New {
                            base.to_ascii_uppercase()
                        } else {
                            base
                        }
                    }
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
