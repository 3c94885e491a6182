//! One-ply heuristic move selection for the engine-controlled side.
//!
//! Every legal point gets a score made of:
//! - a uniform random base in `[0, RANDOM_SPAN)` so play is not deterministic
//! - `CENTER_BONUS` inside the central 3x3 region
//! - minus `SELF_ATARI_PENALTY` if the placed group would be left in atari
//!
//! The highest score wins; ties go to the first candidate in row-major order.
//! There is no look-ahead and no model of the opponent.

use tracing::trace;

use crate::board::{Board, Color, Point};
use crate::constants::{CENTER, CENTER_BONUS, RANDOM_SPAN, SELF_ATARI_PENALTY};
use crate::group::liberties_at;
use crate::rules::play_stone;

/// A move chosen by the engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EngineMove {
    Place(Point),
    Pass,
}

/// Score every legal move for `color` and return the best, or a pass.
pub fn select_move(
    board: &Board,
    ko: Option<Point>,
    color: Color,
    rng: &mut fastrand::Rng,
) -> EngineMove {
    let mut best: Option<(Point, f64)> = None;

    for pt in Board::points() {
        if board.get(pt).is_some() {
            continue;
        }
        let mut scratch = board.clone();
        if play_stone(&mut scratch, ko, pt, color).is_err() {
            continue;
        }

        let score = rng.f64() * RANDOM_SPAN + positional_bonus(&scratch, pt);
        trace!(?pt, score, "engine candidate");

        if best.is_none_or(|(_, s)| score > s) {
            best = Some((pt, score));
        }
    }

    match best {
        Some((pt, _)) => EngineMove::Place(pt),
        None => EngineMove::Pass,
    }
}

/// Deterministic part of a candidate's score, evaluated after the stone at
/// `pt` has been placed and captures resolved.
fn positional_bonus(after: &Board, pt: Point) -> f64 {
    let mut bonus = 0.0;
    if CENTER.contains(&pt.0) && CENTER.contains(&pt.1) {
        bonus += CENTER_BONUS;
    }
    if liberties_at(after, pt) == 1 {
        bonus -= SELF_ATARI_PENALTY;
    }
    bonus
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::N;
    use crate::rules::is_legal;

    #[test]
    fn test_opening_move_is_legal() {
        let mut rng = fastrand::Rng::with_seed(1);
        match select_move(&Board::new(), None, Color::White, &mut rng) {
            EngineMove::Place(pt) => assert!(is_legal(&Board::new(), None, pt, Color::White)),
            EngineMove::Pass => panic!("empty board must have a move"),
        }
    }

    #[test]
    fn test_bonus_values() {
        let mut board = Board::new();
        board.set((4, 4), Some(Color::White));
        assert_eq!(positional_bonus(&board, (4, 4)), CENTER_BONUS);

        let mut board = Board::new();
        board.set((0, 0), Some(Color::White));
        board.set((0, 1), Some(Color::Black));
        assert_eq!(positional_bonus(&board, (0, 0)), -SELF_ATARI_PENALTY);
    }

    #[test]
    fn test_avoids_self_atari() {
        // White at (0,0) would be left with a single liberty at (1,0).
        let mut board = Board::new();
        board.set((0, 1), Some(Color::Black));

        for seed in 0..50 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let mv = select_move(&board, None, Color::White, &mut rng);
            assert_ne!(mv, EngineMove::Place((0, 0)), "seed {seed}");
        }
    }

    #[test]
    fn test_respects_ko() {
        let mut board = Board::new();
        for pt in Board::points() {
            board.set(pt, Some(Color::Black));
        }
        board.set((0, 0), None);
        board.set((0, 1), Some(Color::White));
        board.set((0, 2), None);
        board.set((1, 1), Some(Color::White));
        // (0,0) and (0,2) both capture nothing and touch white; the ko ban
        // leaves only (0,2) playable.
        let mut rng = fastrand::Rng::with_seed(9);
        assert_eq!(
            select_move(&board, Some((0, 0)), Color::White, &mut rng),
            EngineMove::Place((0, 2))
        );
    }

    #[test]
    fn test_passes_without_legal_moves() {
        // Every empty point is a black eye: suicide for White.
        let mut board = Board::new();
        for pt in Board::points() {
            board.set(pt, Some(Color::Black));
        }
        board.set((0, 0), None);
        board.set((N - 1, N - 1), None);
        let mut rng = fastrand::Rng::with_seed(3);
        assert_eq!(
            select_move(&board, None, Color::White, &mut rng),
            EngineMove::Pass
        );
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let board = Board::new();
        let a = select_move(&board, None, Color::Black, &mut fastrand::Rng::with_seed(42));
        let b = select_move(&board, None, Color::Black, &mut fastrand::Rng::with_seed(42));
        assert_eq!(a, b);
    }
}
