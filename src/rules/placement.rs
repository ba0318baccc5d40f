//! Placement legality
//!
//! A placement target must be unoccupied, must not be near any placement
//! already chosen this turn, and must satisfy the region rule: interior
//! squares are always available, while preborder, border and corner squares
//! each require an occupied neighbor one step lower in the hierarchy.
//! Occupancy alone matters; the neighbor's color and posture do not.
//!
//! On a completely empty board the only legal targets are interior squares,
//! so the first placement of a game always lands there.

use crate::board::{near, Board, Pos, Region, RegionMap, DIRECTIONS};

/// Check whether `pos` is a legal placement on `board`, given the placements
/// already chosen earlier in the same turn.
pub fn is_valid_placement(
    board: &Board,
    pos: Pos,
    turn_placements: &[Pos],
    regions: &RegionMap,
) -> bool {
    if !board.is_empty_at(pos) {
        return false;
    }
    if turn_placements.iter().any(|&chosen| near(chosen, pos)) {
        return false;
    }

    match regions.get(pos) {
        Region::Interior => true,
        // Safety clamp: nothing but the interior opens a game
        _ if board.is_board_empty() && turn_placements.is_empty() => false,
        Region::Preborder => has_occupied_neighbor(board, pos, Region::Interior, regions),
        Region::Border => has_occupied_neighbor(board, pos, Region::Preborder, regions),
        Region::Corner => corner_diagonal_occupied(board, pos, regions),
    }
}

/// Enumerate every legal single placement (no placements chosen yet).
pub fn legal_single_placements(board: &Board, regions: &RegionMap) -> Vec<Pos> {
    let size = board.size() as u8;
    let mut placements = Vec::new();
    for row in 0..size {
        for col in 0..size {
            let pos = Pos::new(row, col);
            if is_valid_placement(board, pos, &[], regions) {
                placements.push(pos);
            }
        }
    }
    placements
}

/// True when one of the 8 neighbors of `pos` is occupied and lies in
/// `required` region.
fn has_occupied_neighbor(board: &Board, pos: Pos, required: Region, regions: &RegionMap) -> bool {
    let size = board.size();
    for &(dr, dc) in &DIRECTIONS {
        let r = pos.row as i32 + dr;
        let c = pos.col as i32 + dc;
        if !Pos::is_valid(r, c, size) {
            continue;
        }
        let neighbor = Pos::new(r as u8, c as u8);
        if regions.get(neighbor) == required && !board.is_empty_at(neighbor) {
            return true;
        }
    }
    false
}

/// A corner has exactly one diagonal neighbor (necessarily preborder); the
/// corner is legal only when that diagonal is occupied.
fn corner_diagonal_occupied(board: &Board, pos: Pos, regions: &RegionMap) -> bool {
    let last = (board.size() - 1) as u8;
    let row = if pos.row == 0 { 1 } else { last - 1 };
    let col = if pos.col == 0 { 1 } else { last - 1 };
    let diagonal = Pos::new(row, col);
    regions.get(diagonal) == Region::Preborder && !board.is_empty_at(diagonal)
}
