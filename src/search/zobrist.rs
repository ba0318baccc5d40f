//! Zobrist hashing for position identification
//!
//! Tables are generated per board size from a fixed-seed ChaCha stream, so
//! the same position always hashes the same across runs and processes. The
//! hash folds in the side to move. 32 bits keep table entries small;
//! collisions are tolerated because the transposition table is an
//! accelerator, not a source of truth.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::board::{Board, Piece, Posture};

/// Number of distinct piece kinds per square: 4 colors x 2 postures
const PIECE_KINDS: usize = 8;

/// Fixed stream seed; hashes must be reproducible
const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

/// Zobrist table for one board size.
pub struct ZobristTable {
    size: usize,
    piece_keys: Vec<[u32; PIECE_KINDS]>,
    turn_keys: [u32; 4],
}

impl ZobristTable {
    #[must_use]
    pub fn new(size: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(ZOBRIST_SEED);
        let mut piece_keys = vec![[0u32; PIECE_KINDS]; size * size];
        for cell in &mut piece_keys {
            for key in cell.iter_mut() {
                *key = rng.gen();
            }
        }
        let mut turn_keys = [0u32; 4];
        for key in &mut turn_keys {
            *key = rng.gen();
        }
        Self {
            size,
            piece_keys,
            turn_keys,
        }
    }

    #[inline]
    fn piece_kind(piece: Piece) -> usize {
        piece.color.index() + if piece.posture == Posture::Old { 4 } else { 0 }
    }

    /// Hash `board` with `player_index` to move.
    #[must_use]
    pub fn hash(&self, board: &Board, player_index: usize) -> u32 {
        let mut h = 0u32;
        for (pos, piece) in board.pieces() {
            h ^= self.piece_keys[pos.to_index(self.size)][Self::piece_kind(piece)];
        }
        h ^ self.turn_keys[player_index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Color, Pos};

    #[test]
    fn test_deterministic_across_tables() {
        let za = ZobristTable::new(11);
        let zb = ZobristTable::new(11);
        let mut board = Board::new(11);
        board.set(Pos::new(5, 5), Piece::new(Color::A, Posture::Old));
        assert_eq!(za.hash(&board, 0), zb.hash(&board, 0));
    }

    #[test]
    fn test_side_to_move_changes_hash() {
        let zt = ZobristTable::new(11);
        let board = Board::new(11);
        let hashes: Vec<u32> = (0..4).map(|p| zt.hash(&board, p)).collect();
        for i in 0..4 {
            for j in i + 1..4 {
                assert_ne!(hashes[i], hashes[j]);
            }
        }
    }

    #[test]
    fn test_posture_changes_hash() {
        let zt = ZobristTable::new(11);
        let pos = Pos::new(4, 4);
        let mut new_piece = Board::new(11);
        new_piece.set(pos, Piece::new(Color::B, Posture::New));
        let mut old_piece = Board::new(11);
        old_piece.set(pos, Piece::new(Color::B, Posture::Old));
        assert_ne!(zt.hash(&new_piece, 1), zt.hash(&old_piece, 1));
    }

    #[test]
    fn test_path_independence() {
        let zt = ZobristTable::new(11);
        let mut first = Board::new(11);
        first.set(Pos::new(2, 2), Piece::new(Color::A, Posture::Old));
        first.set(Pos::new(8, 8), Piece::new(Color::D, Posture::New));

        let mut second = Board::new(11);
        second.set(Pos::new(8, 8), Piece::new(Color::D, Posture::New));
        second.set(Pos::new(2, 2), Piece::new(Color::A, Posture::Old));

        assert_eq!(zt.hash(&first, 2), zt.hash(&second, 2));
    }

    #[test]
    fn test_hash_stable_under_serialization() {
        let zt = ZobristTable::new(11);
        let mut board = Board::new(11);
        board.set(Pos::new(3, 4), Piece::new(Color::C, Posture::Old));
        board.set(Pos::new(7, 1), Piece::new(Color::B, Posture::New));

        let json = serde_json::to_string(&board).unwrap();
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(zt.hash(&board, 3), zt.hash(&restored, 3));
    }
}
