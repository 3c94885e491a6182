//! Move legality, capture resolution and the ko ban.
//!
//! A placement goes through three steps:
//! - [`check_move`] decides legality (occupancy, ko, suicide) on a scratch copy
//! - the stone is committed to the board
//! - [`resolve_captures`] removes dead enemy groups and computes the new ko point
//!
//! [`play_stone`] runs all three in order.

use tracing::trace;

use crate::board::{Board, Color, Point, in_bounds, neighbors};
use crate::error::MoveError;
use crate::group::{connected_group, group_liberties};

/// Stones removed by a placement and the ko point it leaves behind.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Capture {
    pub captured: Vec<Point>,
    pub ko: Option<Point>,
}

/// Check whether `color` may play at `pt`.
///
/// # Errors
/// - [`MoveError::OutOfBounds`] if the point is off the board
/// - [`MoveError::Occupied`] if the point holds a stone
/// - [`MoveError::Ko`] if the point is the current ko ban
/// - [`MoveError::Suicide`] if the stone would have no liberties and captures nothing
pub fn check_move(
    board: &Board,
    ko: Option<Point>,
    pt: Point,
    color: Color,
) -> Result<(), MoveError> {
    if !in_bounds(pt) {
        return Err(MoveError::OutOfBounds);
    }
    if board.get(pt).is_some() {
        return Err(MoveError::Occupied);
    }
    if ko == Some(pt) {
        return Err(MoveError::Ko);
    }

    let mut scratch = board.clone();
    scratch.set(pt, Some(color));

    let own = connected_group(&scratch, pt, color);
    if group_liberties(&scratch, &own) > 0 || captures_any(&scratch, pt, color.opponent()) {
        Ok(())
    } else {
        Err(MoveError::Suicide)
    }
}

pub fn is_legal(board: &Board, ko: Option<Point>, pt: Point, color: Color) -> bool {
    check_move(board, ko, pt, color).is_ok()
}

/// True if some `enemy` group next to `pt` has run out of liberties.
fn captures_any(board: &Board, pt: Point, enemy: Color) -> bool {
    neighbors(pt).any(|n| {
        board.get(n) == Some(enemy)
            && group_liberties(board, &connected_group(board, n, enemy)) == 0
    })
}

/// Remove enemy groups left without liberties by the stone just placed at `pt`.
///
/// All captured groups are removed together. The ko point is set to the
/// captured point only when exactly one stone was taken by a lone stone that
/// is left with a single liberty.
pub fn resolve_captures(board: &mut Board, pt: Point, color: Color) -> Capture {
    let enemy = color.opponent();
    let mut captured: Vec<Point> = Vec::new();

    for n in neighbors(pt) {
        if board.get(n) != Some(enemy) || captured.contains(&n) {
            continue;
        }
        let group = connected_group(board, n, enemy);
        if group_liberties(board, &group) == 0 {
            captured.extend(group);
        }
    }

    for &r in &captured {
        board.set(r, None);
    }

    let ko = if captured.len() == 1 {
        let own = connected_group(board, pt, color);
        (own.len() == 1 && group_liberties(board, &own) == 1).then_some(captured[0])
    } else {
        None
    };

    if !captured.is_empty() {
        trace!(?pt, ?color, count = captured.len(), ?ko, "captured stones");
    }
    Capture { captured, ko }
}

/// Validate, commit and resolve a placement. The board is unchanged on error.
pub fn play_stone(
    board: &mut Board,
    ko: Option<Point>,
    pt: Point,
    color: Color,
) -> Result<Capture, MoveError> {
    check_move(board, ko, pt, color)?;
    board.set(pt, Some(color));
    Ok(resolve_captures(board, pt, color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::group::liberties_at;

    fn setup(black: &[Point], white: &[Point]) -> Board {
        let mut board = Board::new();
        for &pt in black {
            board.set(pt, Some(Color::Black));
        }
        for &pt in white {
            board.set(pt, Some(Color::White));
        }
        board
    }

    #[test]
    fn test_occupied() {
        let board = setup(&[(4, 4)], &[]);
        assert_eq!(
            check_move(&board, None, (4, 4), Color::White),
            Err(MoveError::Occupied)
        );
    }

    #[test]
    fn test_out_of_bounds() {
        let board = Board::new();
        assert_eq!(
            check_move(&board, None, (9, 0), Color::Black),
            Err(MoveError::OutOfBounds)
        );
    }

    #[test]
    fn test_ko_point_rejected() {
        let board = Board::new();
        assert_eq!(
            check_move(&board, Some((3, 3)), (3, 3), Color::Black),
            Err(MoveError::Ko)
        );
        assert!(is_legal(&board, Some((3, 3)), (3, 4), Color::Black));
    }

    #[test]
    fn test_corner_suicide() {
        let board = setup(&[(0, 1), (1, 0)], &[]);
        assert_eq!(
            check_move(&board, None, (0, 0), Color::White),
            Err(MoveError::Suicide)
        );
        // Filling one's own eye is not suicide while the group has liberties
        assert!(is_legal(&board, None, (0, 0), Color::Black));
    }

    #[test]
    fn test_suicide_allowed_when_capturing() {
        let board = setup(&[(1, 0)], &[(0, 0), (0, 2), (1, 1)]);
        // Black at (0,1) is surrounded by white but removes (0,0)'s last liberty
        assert!(is_legal(&board, None, (0, 1), Color::Black));
    }

    #[test]
    fn test_capture_single_stone() {
        let mut board = setup(&[(1, 3), (3, 3), (2, 4)], &[(2, 3)]);
        let cap = play_stone(&mut board, None, (2, 2), Color::Black).unwrap();
        assert_eq!(cap.captured, vec![(2, 3)]);
        assert_eq!(board.get((2, 3)), None);
        // The placing stone keeps four liberties, so no ko
        assert_eq!(cap.ko, None);
    }

    #[test]
    fn test_capture_sets_ko() {
        // Classic ko shape around (4,4)/(4,5)
        let mut board = setup(&[(4, 4), (3, 5), (5, 5), (4, 6)], &[(3, 4), (5, 4), (4, 3)]);
        let cap = play_stone(&mut board, None, (4, 5), Color::White).unwrap();
        assert_eq!(cap.captured, vec![(4, 4)]);
        assert_eq!(cap.ko, Some((4, 4)));
        assert_eq!(liberties_at(&board, (4, 5)), 1);
    }

    #[test]
    fn test_capture_multiple_groups() {
        // Two separate white stones each with their last liberty at (0,1)
        let mut board = setup(&[(1, 0), (1, 2), (0, 3)], &[(0, 0), (0, 2)]);
        let mut cap = play_stone(&mut board, None, (0, 1), Color::Black).unwrap();
        cap.captured.sort();
        assert_eq!(cap.captured, vec![(0, 0), (0, 2)]);
        assert_eq!(cap.ko, None);
        assert_eq!(board.count(Color::White), 0);
    }

    #[test]
    fn test_play_stone_leaves_board_on_error() {
        let mut board = setup(&[(0, 1), (1, 0)], &[]);
        let before = board.clone();
        assert!(play_stone(&mut board, None, (0, 0), Color::White).is_err());
        assert_eq!(board, before);
    }
}
