//! Win detection: edge-to-edge connectivity
//!
//! A color wins when an 8-connected path of its pieces joins the top and
//! bottom rows, or the left and right columns. Corner squares never take
//! part in a path, so both endpoints are non-corner edge cells. Colors are
//! tested in seat order and the first winner found is reported.

use std::collections::VecDeque;

use crate::board::{Board, Color, Pos, COLORS, DIRECTIONS};

/// A detected win: the color and one connecting path, listed from the
/// starting edge to the opposite edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WinInfo {
    pub color: Color,
    pub path: Vec<Pos>,
}

/// Test every color for a spanning path. North/south connections are tried
/// before east/west.
pub fn check_win(board: &Board) -> Option<WinInfo> {
    for &color in &COLORS {
        if let Some(path) = spanning_path(board, color, true)
            .or_else(|| spanning_path(board, color, false))
        {
            return Some(WinInfo { color, path });
        }
    }
    None
}

/// Breadth-first search for a monochrome path between opposite edges.
/// `vertical` selects top-to-bottom; otherwise left-to-right.
fn spanning_path(board: &Board, color: Color, vertical: bool) -> Option<Vec<Pos>> {
    let size = board.size();
    let last = (size - 1) as u8;
    let is_corner =
        |p: Pos| (p.row == 0 || p.row == last) && (p.col == 0 || p.col == last);
    let holds_color = |p: Pos| board.get(p).map(|piece| piece.color) == Some(color);

    let mut parent: Vec<Option<Pos>> = vec![None; size * size];
    let mut visited = vec![false; size * size];
    let mut queue = VecDeque::new();

    for i in 0..size as u8 {
        let start = if vertical {
            Pos::new(0, i)
        } else {
            Pos::new(i, 0)
        };
        if is_corner(start) || !holds_color(start) {
            continue;
        }
        visited[start.to_index(size)] = true;
        queue.push_back(start);
    }

    while let Some(pos) = queue.pop_front() {
        let reached_far_edge = if vertical { pos.row == last } else { pos.col == last };
        if reached_far_edge {
            return Some(reconstruct(&parent, pos, size));
        }
        for &(dr, dc) in &DIRECTIONS {
            let r = pos.row as i32 + dr;
            let c = pos.col as i32 + dc;
            if !Pos::is_valid(r, c, size) {
                continue;
            }
            let next = Pos::new(r as u8, c as u8);
            let idx = next.to_index(size);
            if visited[idx] || is_corner(next) || !holds_color(next) {
                continue;
            }
            visited[idx] = true;
            parent[idx] = Some(pos);
            queue.push_back(next);
        }
    }
    None
}

fn reconstruct(parent: &[Option<Pos>], end: Pos, size: usize) -> Vec<Pos> {
    let mut path = vec![end];
    let mut cursor = end;
    while let Some(prev) = parent[cursor.to_index(size)] {
        path.push(prev);
        cursor = prev;
    }
    path.reverse();
    path
}
