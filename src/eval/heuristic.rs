//! Static evaluation of a position
//!
//! Scores are always from team 1's perspective; the search multiplies by the
//! side-to-move sign. Terms:
//! - terminal: +/- win_score when a color has a spanning path
//! - material: piece-count advantage weighted by piece_value
//! - corners: a flat penalty per occupied corner against its owner's team
//! - territory: per 8-connected same-team component, the square of its
//!   bounding-box extent (max of height and width) weighted by
//!   extent_bonus_multiplier

use crate::board::{Board, Piece, Pos, Team, DIRECTIONS};
use crate::config::SearchConfig;
use crate::rules::check_win;

#[inline]
fn team_slot(piece: Piece) -> usize {
    match piece.color.team() {
        Team::One => 0,
        Team::Two => 1,
    }
}

/// Evaluate `board` from team 1's perspective.
#[must_use]
pub fn evaluate(board: &Board, config: &SearchConfig) -> i32 {
    if let Some(win) = check_win(board) {
        return match win.color.team() {
            Team::One => config.win_score,
            Team::Two => -config.win_score,
        };
    }

    let size = board.size();
    let last = (size - 1) as u8;
    let mut count = [0i32; 2];
    let mut corner_penalty = [0i32; 2];

    for (pos, piece) in board.pieces() {
        let slot = team_slot(piece);
        count[slot] += 1;
        let in_corner =
            (pos.row == 0 || pos.row == last) && (pos.col == 0 || pos.col == last);
        if in_corner {
            corner_penalty[slot] += config.static_corner_penalty;
        }
    }

    let extent_bonus = extent_bonuses(board, config);

    let piece_advantage = (count[0] - count[1]) * config.piece_value;
    piece_advantage + (extent_bonus[0] - extent_bonus[1]) - corner_penalty[0]
        + corner_penalty[1]
}

/// Flood-fill same-team components and accumulate their squared extents.
fn extent_bonuses(board: &Board, config: &SearchConfig) -> [i32; 2] {
    let size = board.size();
    let mut visited = vec![false; size * size];
    let mut bonus = [0i32; 2];
    let mut stack = Vec::new();

    for (pos, piece) in board.pieces() {
        let start_idx = pos.to_index(size);
        if visited[start_idx] {
            continue;
        }
        let team = piece.color.team();
        let slot = team_slot(piece);

        let (mut min_r, mut max_r) = (pos.row, pos.row);
        let (mut min_c, mut max_c) = (pos.col, pos.col);
        visited[start_idx] = true;
        stack.push(pos);

        while let Some(cell) = stack.pop() {
            min_r = min_r.min(cell.row);
            max_r = max_r.max(cell.row);
            min_c = min_c.min(cell.col);
            max_c = max_c.max(cell.col);

            for &(dr, dc) in &DIRECTIONS {
                let r = cell.row as i32 + dr;
                let c = cell.col as i32 + dc;
                if !Pos::is_valid(r, c, size) {
                    continue;
                }
                let next = Pos::new(r as u8, c as u8);
                let idx = next.to_index(size);
                if visited[idx] {
                    continue;
                }
                match board.get(next) {
                    Some(neighbor) if neighbor.color.team() == team => {
                        visited[idx] = true;
                        stack.push(next);
                    }
                    _ => {}
                }
            }
        }

        let extent = (max_r - min_r).max(max_c - min_c) as i32;
        bonus[slot] += extent * extent * config.extent_bonus_multiplier;
    }

    bonus
}
