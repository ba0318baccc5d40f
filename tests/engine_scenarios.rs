//! End-to-end engine scenarios through the public API

use quadra::board::{Posture, Region, RegionMap};
use quadra::{Board, Color, Piece, Pos, SearchConfig, SearchEngine, SearchRequest};

fn put(board: &mut Board, row: u8, col: u8, color: Color) {
    board.set(Pos::new(row, col), Piece::new(color, Posture::Old));
}

#[test]
fn opening_on_empty_board_is_an_interior_single() {
    let mut engine = SearchEngine::with_pool_size(2);
    let request = SearchRequest {
        board: Board::new(11),
        player_index: 0,
        turn_count: 1,
        config: SearchConfig::default().with_time_ms(300).with_max_depth(2),
    };

    let reply = engine.search(&request).expect("valid request");
    let mv = reply.best_move.expect("the opening always has a move");
    assert_eq!(mv.placements.len(), 1);

    let regions = RegionMap::new(11);
    let pos = mv.placements[0];
    assert_eq!(regions.get(pos), Region::Interior);
    assert!((2..=8).contains(&pos.row) && (2..=8).contains(&pos.col));
}

#[test]
fn timeout_reply_reflects_a_completed_depth() {
    let mut board = Board::new(11);
    put(&mut board, 4, 4, Color::A);
    put(&mut board, 4, 6, Color::B);
    put(&mut board, 6, 4, Color::C);
    put(&mut board, 6, 6, Color::D);
    put(&mut board, 5, 8, Color::B);

    let mut engine = SearchEngine::with_pool_size(2);
    let request = SearchRequest {
        board,
        player_index: 0,
        turn_count: 9,
        config: SearchConfig::default().with_time_ms(50).with_max_depth(24),
    };

    let reply = engine.search(&request).expect("valid request");
    let mv = reply.best_move.expect("a move always comes back");

    // The reply is either the best of a fully searched depth or, when not
    // even depth 1 finished in 50 ms, the generator's first candidate. It
    // is never a partially aggregated depth, and it stays within the cap.
    assert!(reply.depth <= 24);
    assert!(!mv.placements.is_empty() && mv.placements.len() <= 2);
    assert!(reply.elapsed_ms < 5000);
}

#[test]
fn stuffed_board_is_reported_as_no_move() {
    let mut board = Board::new(11);
    for row in 0..11u8 {
        for col in 0..11u8 {
            put(&mut board, row, col, Color::D);
        }
    }

    let mut engine = SearchEngine::with_pool_size(1);
    let request = SearchRequest {
        board,
        player_index: 2,
        turn_count: 40,
        config: SearchConfig::default().with_time_ms(100),
    };

    let reply = engine.search(&request).expect("valid request");
    assert!(reply.best_move.is_none());
}

#[test]
fn request_and_reply_survive_json() {
    let mut board = Board::new(11);
    put(&mut board, 5, 5, Color::B);

    let request = SearchRequest {
        board,
        player_index: 0,
        turn_count: 3,
        config: SearchConfig::default().with_time_ms(200).with_max_depth(1),
    };

    // The request round-trips, and the engine accepts the parsed copy
    let json = serde_json::to_string(&request).expect("serializable request");
    let parsed: SearchRequest = serde_json::from_str(&json).expect("parseable request");
    assert_eq!(parsed.board, request.board);
    assert_eq!(parsed.config, request.config);

    let mut engine = SearchEngine::with_pool_size(2);
    let reply = engine.search(&parsed).expect("valid request");

    let reply_json = serde_json::to_string(&reply).expect("serializable reply");
    let parsed_reply: quadra::SearchReply =
        serde_json::from_str(&reply_json).expect("parseable reply");
    assert_eq!(parsed_reply.best_move, reply.best_move);
    assert_eq!(parsed_reply.score, reply.score);
}

#[test]
fn engine_survives_many_small_requests() {
    let mut engine = SearchEngine::with_pool_size(2);
    for turn in 1..=3 {
        let request = SearchRequest {
            board: Board::new(7),
            player_index: (turn as usize - 1) % 4,
            turn_count: turn,
            config: SearchConfig::with_board_size(7)
                .with_time_ms(150)
                .with_max_depth(2),
        };
        let reply = engine.search(&request).expect("valid request");
        assert!(reply.best_move.is_some());
    }
}
