//! Candidate move enumeration and ordering
//!
//! Moves are one or two placements. The generator enumerates legal
//! singletons, scores them (corner placements penalized, enemy contact
//! rewarded), and either returns them sorted best-first or pairs the top
//! singletons into non-near doubles. A restricted variant keeps only moves
//! that convert at least one enemy piece, for the quiescence search.

use crate::board::{near, Board, Color, Move, Pos, Posture, Region, RegionMap, DIRECTIONS};
use crate::config::SearchConfig;
use crate::rules::{apply_move, legal_single_placements};

/// A candidate move with its ordering score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoredMove {
    pub mv: Move,
    pub score: i32,
}

/// Number of placements for this turn: one on the game's first turn,
/// otherwise two when at least two legal singletons exist.
#[inline]
fn pawns_to_place(turn_count: u32, legal_singles: usize) -> usize {
    if turn_count == 1 {
        1
    } else {
        legal_singles.min(2)
    }
}

/// Enumerate the moves available to `color`, sorted best-first.
#[must_use]
pub fn ordered_moves(
    board: &Board,
    turn_count: u32,
    color: Color,
    config: &SearchConfig,
) -> Vec<ScoredMove> {
    let regions = RegionMap::new(board.size());
    let singles = legal_single_placements(board, &regions);
    let pawns = pawns_to_place(turn_count, singles.len());
    if pawns == 0 {
        return Vec::new();
    }

    let mut scored: Vec<(Pos, i32)> = singles
        .into_iter()
        .map(|pos| (pos, score_single(board, pos, color, &regions, config)))
        .collect();
    scored.sort_unstable_by(|a, b| b.1.cmp(&a.1));

    if pawns == 1 {
        return scored
            .into_iter()
            .map(|(pos, score)| ScoredMove {
                mv: Move::single(pos),
                score,
            })
            .collect();
    }

    // Pair the best singletons into non-near doubles
    let limit = config.candidate_singles_limit.min(scored.len());
    let candidates = &scored[..limit];
    let mut doubles = Vec::new();
    for (i, &(first, first_score)) in candidates.iter().enumerate() {
        for &(second, second_score) in &candidates[i + 1..] {
            if !near(first, second) {
                doubles.push(ScoredMove {
                    mv: Move::double(first, second),
                    score: first_score + second_score,
                });
            }
        }
    }
    if !doubles.is_empty() {
        doubles.sort_unstable_by(|a, b| b.score.cmp(&a.score));
        return doubles;
    }

    // The candidate slice was too crowded; any non-near pair will do
    for (i, &(first, first_score)) in scored.iter().enumerate() {
        for &(second, second_score) in &scored[i + 1..] {
            if !near(first, second) {
                return vec![ScoredMove {
                    mv: Move::double(first, second),
                    score: first_score + second_score,
                }];
            }
        }
    }

    // No pair exists anywhere: fall back to the best singleton
    let (pos, score) = scored[0];
    vec![ScoredMove {
        mv: Move::single(pos),
        score,
    }]
}

/// Moves that convert at least one enemy piece when fully applied, sorted
/// by conversion count descending. Used by the quiescence search.
///
/// A placement can only start a conversion when an old enemy piece sits
/// next to it on the pre-move board (recoloring and aging never add enemy
/// pieces), so candidates without such a contact skip the trial
/// application entirely.
#[must_use]
pub fn conversion_moves(
    board: &Board,
    turn_count: u32,
    color: Color,
    config: &SearchConfig,
) -> Vec<ScoredMove> {
    let mut converting: Vec<ScoredMove> = ordered_moves(board, turn_count, color, config)
        .into_iter()
        .filter(|candidate| {
            candidate
                .mv
                .placements
                .iter()
                .any(|&p| touches_old_enemy(board, p, color))
        })
        .filter_map(|candidate| {
            let (_, converted) = apply_move(board, &candidate.mv, color);
            (converted > 0).then_some(ScoredMove {
                mv: candidate.mv,
                score: converted as i32,
            })
        })
        .collect();
    converting.sort_unstable_by(|a, b| b.score.cmp(&a.score));
    converting
}

/// True when a neighbor of `pos` holds an old enemy piece
fn touches_old_enemy(board: &Board, pos: Pos, color: Color) -> bool {
    let size = board.size();
    DIRECTIONS.iter().any(|&(dr, dc)| {
        let r = pos.row as i32 + dr;
        let c = pos.col as i32 + dc;
        Pos::is_valid(r, c, size)
            && board.get(Pos::new(r as u8, c as u8)).is_some_and(|piece| {
                piece.posture == Posture::Old && piece.color.is_enemy_of(color)
            })
    })
}

/// Heuristic score of a single placement for `color`
fn score_single(
    board: &Board,
    pos: Pos,
    color: Color,
    regions: &RegionMap,
    config: &SearchConfig,
) -> i32 {
    let mut score = 0;
    if regions.get(pos) == Region::Corner {
        score -= config.corner_placement_penalty;
    }

    let size = board.size();
    for &(dr, dc) in &DIRECTIONS {
        let r = pos.row as i32 + dr;
        let c = pos.col as i32 + dc;
        if !Pos::is_valid(r, c, size) {
            continue;
        }
        if let Some(piece) = board.get(Pos::new(r as u8, c as u8)) {
            if piece.color.is_enemy_of(color) {
                score += config.contact_bonus;
            }
        }
    }
    score
}
