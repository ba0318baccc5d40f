//! Board-level tests

use super::*;

#[test]
fn test_color_teams_and_allies() {
    assert_eq!(Color::A.ally(), Color::C);
    assert_eq!(Color::C.ally(), Color::A);
    assert_eq!(Color::B.ally(), Color::D);
    assert_eq!(Color::D.ally(), Color::B);

    assert_eq!(Color::A.team(), Team::One);
    assert_eq!(Color::C.team(), Team::One);
    assert_eq!(Color::B.team(), Team::Two);
    assert_eq!(Color::D.team(), Team::Two);

    assert!(Color::A.is_enemy_of(Color::B));
    assert!(Color::A.is_enemy_of(Color::D));
    assert!(!Color::A.is_enemy_of(Color::C));
    assert!(!Color::A.is_enemy_of(Color::A));
}

#[test]
fn test_team_signs() {
    assert_eq!(Team::One.sign(), 1);
    assert_eq!(Team::Two.sign(), -1);
    assert_eq!(Team::One.opponent(), Team::Two);
}

#[test]
fn test_seat_order() {
    for (idx, color) in COLORS.iter().enumerate() {
        assert_eq!(color.index(), idx);
    }
}

#[test]
fn test_pos_index_roundtrip() {
    for size in [5usize, 11, 15] {
        for idx in 0..size * size {
            let pos = Pos::from_index(idx, size);
            assert_eq!(pos.to_index(size), idx);
        }
    }
}

#[test]
fn test_board_set_get() {
    let mut board = Board::new(11);
    assert!(board.is_board_empty());

    let pos = Pos::new(5, 5);
    board.set(pos, Piece::new(Color::A, Posture::New));
    assert!(!board.is_board_empty());
    assert!(!board.is_empty_at(pos));
    assert_eq!(board.get(pos), Some(Piece::new(Color::A, Posture::New)));
    assert_eq!(board.piece_count(), 1);
}

#[test]
fn test_board_pieces_iterator() {
    let mut board = Board::new(11);
    board.set(Pos::new(0, 1), Piece::new(Color::B, Posture::Old));
    board.set(Pos::new(10, 9), Piece::new(Color::D, Posture::New));

    let pieces: Vec<_> = board.pieces().collect();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].0, Pos::new(0, 1));
    assert_eq!(pieces[1].0, Pos::new(10, 9));
}

#[test]
fn test_recolor_preserves_posture() {
    let mut board = Board::new(11);
    let pos = Pos::new(3, 3);
    board.set(pos, Piece::new(Color::B, Posture::Old));
    board.recolor(pos, Color::A);
    assert_eq!(board.get(pos), Some(Piece::new(Color::A, Posture::Old)));
}

#[test]
fn test_age_new_pieces_only_touches_one_color() {
    let mut board = Board::new(11);
    board.set(Pos::new(1, 1), Piece::new(Color::A, Posture::New));
    board.set(Pos::new(2, 2), Piece::new(Color::A, Posture::Old));
    board.set(Pos::new(3, 3), Piece::new(Color::B, Posture::New));

    board.age_new_pieces(Color::A);
    assert_eq!(
        board.get(Pos::new(1, 1)),
        Some(Piece::new(Color::A, Posture::Old))
    );
    assert_eq!(
        board.get(Pos::new(2, 2)),
        Some(Piece::new(Color::A, Posture::Old))
    );
    assert_eq!(
        board.get(Pos::new(3, 3)),
        Some(Piece::new(Color::B, Posture::New))
    );
}

#[test]
fn test_board_serde_roundtrip() {
    let mut board = Board::new(11);
    board.set(Pos::new(0, 5), Piece::new(Color::A, Posture::Old));
    board.set(Pos::new(5, 5), Piece::new(Color::C, Posture::New));
    board.set(Pos::new(10, 10), Piece::new(Color::D, Posture::Old));

    let json = serde_json::to_string(&board).unwrap();
    let restored: Board = serde_json::from_str(&json).unwrap();
    assert_eq!(board, restored);
}

#[test]
fn test_board_display() {
    let mut board = Board::new(3);
    board.set(Pos::new(0, 0), Piece::new(Color::A, Posture::Old));
    board.set(Pos::new(1, 1), Piece::new(Color::B, Posture::New));

    let rendered = board.to_string();
    let lines: Vec<&str> = rendered.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with('a'));
    assert!(lines[1].contains('B'));
}

#[test]
fn test_move_constructors() {
    let single = Move::single(Pos::new(4, 4));
    assert_eq!(single.placements.len(), 1);

    let double = Move::double(Pos::new(2, 2), Pos::new(8, 8));
    assert_eq!(double.placements.len(), 2);
}
