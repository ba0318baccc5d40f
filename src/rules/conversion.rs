//! Conversion resolution and move application
//!
//! Conversion pattern: from a freshly placed anchor, each of the 8 compass
//! directions is scanned for a run of old enemy pieces of one color closed
//! by a piece of the mover's own color. The run is recolored to the mover;
//! posture never changes. A `New` piece adjacent to the anchor shields the
//! whole direction.

use crate::board::{Board, Color, Move, Piece, Pos, Posture, DIRECTIONS};

/// Find the cells converted by a piece of `color` standing at `anchor`.
///
/// Per direction: the adjacent cell must hold an old enemy piece, which
/// fixes the line color; the run extends over old pieces of that color and
/// commits only when a piece of exactly `color` closes it. Anything else
/// (an ally, a different enemy color, any new piece, an empty cell, the
/// board edge) ends the direction without a commit.
pub fn conversions_from(board: &Board, anchor: Pos, color: Color) -> Vec<Pos> {
    let size = board.size();
    let mut converted = Vec::new();

    for &(dr, dc) in &DIRECTIONS {
        let r = anchor.row as i32 + dr;
        let c = anchor.col as i32 + dc;
        if !Pos::is_valid(r, c, size) {
            continue;
        }
        let first_pos = Pos::new(r as u8, c as u8);
        let Some(first) = board.get(first_pos) else {
            continue;
        };
        // A new piece or a teammate next to the anchor stops the scan
        if first.posture == Posture::New || !first.color.is_enemy_of(color) {
            continue;
        }

        let line_color = first.color;
        let mut run = vec![first_pos];
        let mut step = 2;
        loop {
            let r = anchor.row as i32 + dr * step;
            let c = anchor.col as i32 + dc * step;
            if !Pos::is_valid(r, c, size) {
                break;
            }
            let pos = Pos::new(r as u8, c as u8);
            let Some(piece) = board.get(pos) else {
                break;
            };
            if piece.color == color {
                // Closer found: the whole run flips
                converted.append(&mut run);
                break;
            }
            if piece.color == line_color && piece.posture == Posture::Old {
                run.push(pos);
                step += 1;
                continue;
            }
            break;
        }
    }

    converted
}

/// Apply `mv` for `color` to a snapshot of `board`.
///
/// Steps, in order: copy the board, age the mover's `New` pieces to `Old`,
/// put down every placement as `New`, then resolve conversions per placement
/// in move order (each anchor sees the recolors of earlier anchors).
///
/// Returns the resulting board and the number of converted pieces.
pub fn apply_move(board: &Board, mv: &Move, color: Color) -> (Board, u32) {
    let mut next = board.clone();
    next.age_new_pieces(color);

    for &placement in &mv.placements {
        next.set(placement, Piece::new(color, Posture::New));
    }

    let mut converted = 0u32;
    for &placement in &mv.placements {
        let captured = conversions_from(&next, placement, color);
        converted += captured.len() as u32;
        for pos in captured {
            next.recolor(pos, color);
        }
    }

    (next, converted)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn old(color: Color) -> Piece {
        Piece::new(color, Posture::Old)
    }

    #[test]
    fn test_no_conversion_without_closer() {
        // a . b with A placing between them: the line has no closing A piece
        let mut board = Board::new(11);
        board.set(Pos::new(5, 3), old(Color::A));
        board.set(Pos::new(5, 5), old(Color::B));

        let (after, converted) = apply_move(&board, &Move::single(Pos::new(5, 4)), Color::A);
        assert_eq!(converted, 0);
        assert_eq!(after.get(Pos::new(5, 5)), Some(old(Color::B)));
    }

    #[test]
    fn test_single_conversion_along_row() {
        // a b . with A placing on the right: leftward scan finds the old B
        // and the closing A, flipping (5,4) to A
        let mut board = Board::new(11);
        board.set(Pos::new(5, 3), old(Color::A));
        board.set(Pos::new(5, 4), old(Color::B));

        let anchor = Pos::new(5, 5);
        let (after, converted) = apply_move(&board, &Move::single(anchor), Color::A);
        assert_eq!(converted, 1);
        assert_eq!(after.get(Pos::new(5, 4)), Some(old(Color::A)));
        assert_eq!(
            after.get(anchor),
            Some(Piece::new(Color::A, Posture::New))
        );
    }

    #[test]
    fn test_new_piece_shields_the_line() {
        let mut board = Board::new(11);
        board.set(Pos::new(5, 3), old(Color::A));
        board.set(Pos::new(5, 4), Piece::new(Color::B, Posture::New));

        let (after, converted) = apply_move(&board, &Move::single(Pos::new(5, 5)), Color::A);
        assert_eq!(converted, 0);
        assert_eq!(
            after.get(Pos::new(5, 4)),
            Some(Piece::new(Color::B, Posture::New))
        );
    }

    #[test]
    fn test_run_of_two_flips_together() {
        // a b b . : both B pieces flip when A closes the line
        let mut board = Board::new(11);
        board.set(Pos::new(5, 2), old(Color::A));
        board.set(Pos::new(5, 3), old(Color::B));
        board.set(Pos::new(5, 4), old(Color::B));

        let (after, converted) = apply_move(&board, &Move::single(Pos::new(5, 5)), Color::A);
        assert_eq!(converted, 2);
        assert_eq!(after.get(Pos::new(5, 3)), Some(old(Color::A)));
        assert_eq!(after.get(Pos::new(5, 4)), Some(old(Color::A)));
    }

    #[test]
    fn test_mixed_enemy_colors_break_the_run() {
        // a d b . : the run color is fixed by the adjacent B; the D behind it
        // is neither the line color nor the closer, so nothing flips
        let mut board = Board::new(11);
        board.set(Pos::new(5, 2), old(Color::A));
        board.set(Pos::new(5, 3), old(Color::D));
        board.set(Pos::new(5, 4), old(Color::B));

        let (_, converted) = apply_move(&board, &Move::single(Pos::new(5, 5)), Color::A);
        assert_eq!(converted, 0);
    }

    #[test]
    fn test_ally_does_not_close() {
        // c b . : C is A's partner but only an exact-color closer commits
        let mut board = Board::new(11);
        board.set(Pos::new(5, 3), old(Color::C));
        board.set(Pos::new(5, 4), old(Color::B));

        let (after, converted) = apply_move(&board, &Move::single(Pos::new(5, 5)), Color::A);
        assert_eq!(converted, 0);
        assert_eq!(after.get(Pos::new(5, 4)), Some(old(Color::B)));
    }

    #[test]
    fn test_adjacent_ally_stops_direction() {
        // a c b a : the adjacent C is a teammate, so the scan never starts
        let mut board = Board::new(11);
        board.set(Pos::new(5, 2), old(Color::A));
        board.set(Pos::new(5, 3), old(Color::C));
        board.set(Pos::new(5, 4), old(Color::B));

        let conversions = conversions_from(&board, Pos::new(5, 5), Color::A);
        assert!(conversions.is_empty());
    }

    #[test]
    fn test_conversion_keeps_posture() {
        let mut board = Board::new(11);
        board.set(Pos::new(5, 3), old(Color::A));
        board.set(Pos::new(5, 4), old(Color::B));

        let (after, _) = apply_move(&board, &Move::single(Pos::new(5, 5)), Color::A);
        let flipped = after.get(Pos::new(5, 4)).unwrap();
        assert_eq!(flipped.posture, Posture::Old);
    }

    #[test]
    fn test_apply_move_ages_own_new_pieces() {
        let mut board = Board::new(11);
        board.set(Pos::new(4, 4), Piece::new(Color::A, Posture::New));
        board.set(Pos::new(6, 6), Piece::new(Color::B, Posture::New));

        let (after, _) = apply_move(&board, &Move::single(Pos::new(8, 8)), Color::A);
        assert_eq!(after.get(Pos::new(4, 4)), Some(old(Color::A)));
        // Other colors keep their posture
        assert_eq!(
            after.get(Pos::new(6, 6)),
            Some(Piece::new(Color::B, Posture::New))
        );
    }

    #[test]
    fn test_apply_move_piece_count_delta_is_move_size() {
        let mut board = Board::new(11);
        board.set(Pos::new(5, 2), old(Color::A));
        board.set(Pos::new(5, 3), old(Color::B));
        board.set(Pos::new(5, 4), old(Color::B));
        let before = board.piece_count();

        let mv = Move::double(Pos::new(5, 5), Pos::new(8, 8));
        let (after, converted) = apply_move(&board, &mv, Color::A);
        assert_eq!(converted, 2);
        // Conversions recolor, they never add or remove pieces
        assert_eq!(after.piece_count(), before + mv.placements.len() as u32);
    }

    #[test]
    fn test_both_placements_down_before_conversions_resolve() {
        // Both placements of a double are on the board before any direction
        // is scanned, so the second placement can close the first one's line.
        let mut board = Board::new(11);
        board.set(Pos::new(5, 5), old(Color::B));
        board.set(Pos::new(5, 6), old(Color::B));
        board.set(Pos::new(5, 7), old(Color::B));

        let mv = Move::double(Pos::new(5, 4), Pos::new(5, 8));
        let (after, converted) = apply_move(&board, &mv, Color::A);
        assert_eq!(converted, 3);
        for col in 5..=7 {
            assert_eq!(after.get(Pos::new(5, col)), Some(old(Color::A)));
        }
    }

    #[test]
    fn test_aging_is_idempotent() {
        let mut board = Board::new(11);
        board.set(Pos::new(4, 4), Piece::new(Color::A, Posture::New));
        board.set(Pos::new(5, 5), old(Color::A));

        let mut once = board.clone();
        once.age_new_pieces(Color::A);
        let mut twice = once.clone();
        twice.age_new_pieces(Color::A);
        assert_eq!(once, twice);
    }
}
